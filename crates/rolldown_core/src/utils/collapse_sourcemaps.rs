use sourcemap::{SourceMap, SourceMapBuilder};

/// Compose maps of successive transformations into one map from the last output to the
/// original sources. `maps` goes from the earliest transformation to the latest.
pub(crate) fn collapse_sourcemaps(mut maps: Vec<SourceMap>) -> Option<SourceMap> {
  let mut collapsed = maps.pop()?;
  while let Some(previous) = maps.pop() {
    collapsed = compose(&previous, &collapsed);
  }
  Some(collapsed)
}

/// `first` maps `b -> a` and `second` maps `c -> b`. The result maps `c -> a`.
fn compose(first: &SourceMap, second: &SourceMap) -> SourceMap {
  let mut builder = SourceMapBuilder::new(second.get_file());
  for token in second.tokens() {
    let Some(original) = first.lookup_token(token.get_src_line(), token.get_src_col()) else {
      continue;
    };
    // A token of an earlier line means the position was never mapped
    if original.get_dst_line() != token.get_src_line() {
      continue;
    }
    builder.add(
      token.get_dst_line(),
      token.get_dst_col(),
      original.get_src_line(),
      original.get_src_col(),
      original.get_source(),
      original.get_name().or_else(|| token.get_name()),
    );
  }
  builder.into_sourcemap()
}

#[cfg(test)]
mod tests {
  use rolldown_magic_string::{MagicString, SourceMapOptions};

  use super::*;

  fn hires(source: &str) -> SourceMapOptions {
    SourceMapOptions {
      source: source.to_string(),
      file: Some("out.js".to_string()),
      hires: true,
      include_content: false,
    }
  }

  #[test]
  fn collapse_two_rewrites() {
    // original -> step1: `AAAA` becomes `b`
    let original = "x(AAAA, y);";
    let mut first = MagicString::new(original);
    first.overwrite(2, 6, "b").unwrap();
    let step1 = first.to_string();
    assert_eq!(step1, "x(b, y);");

    // step1 -> step2: `x` becomes `longer`
    let mut second = MagicString::new(&step1);
    second.overwrite(0, 1, "longer").unwrap();
    let step2 = second.to_string();
    assert_eq!(step2, "longer(b, y);");

    let map = collapse_sourcemaps(vec![
      first.generate_map(&hires("app.js")),
      second.generate_map(&hires("out.js")),
    ])
    .unwrap();

    // `y` in the final output maps back to `y` in the original
    let y_col = step2.find('y').unwrap() as u32;
    let token = map.lookup_token(0, y_col).unwrap();
    assert_eq!(token.get_dst_col(), y_col);
    assert_eq!(token.get_src_col(), original.find('y').unwrap() as u32);
    assert_eq!(token.get_source(), Some("app.js"));

    // `b` maps back to the start of `AAAA`
    let b_col = step2.find('b').unwrap() as u32;
    let token = map.lookup_token(0, b_col).unwrap();
    assert_eq!(token.get_src_col(), 2);
  }

  #[test]
  fn nothing_to_collapse() {
    assert!(collapse_sourcemaps(vec![]).is_none());
  }
}
