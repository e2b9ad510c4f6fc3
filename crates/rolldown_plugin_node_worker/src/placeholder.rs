use once_cell::sync::Lazy;
use regex::Regex;
use rolldown_common::ReferenceId;

pub(crate) const PLACEHOLDER_PREFIX: &str = "__ROLLDOWN_NODE_WORKER__";
const PLACEHOLDER_SUFFIX: &str = "__";

/// Matches `__ROLLDOWN_NODE_WORKER__<reference id>__`. The first group is the reference id.
pub(crate) static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(&format!(
    "{PLACEHOLDER_PREFIX}([a-z\\d]{{{}}}){PLACEHOLDER_SUFFIX}",
    ReferenceId::LEN
  ))
  .expect("placeholder pattern is valid")
});

/// The placeholder is a plain identifier, so any transform between `load` and `render_chunk`
/// keeps it as is.
pub(crate) fn placeholder_for(reference_id: &ReferenceId) -> String {
  format!("{PLACEHOLDER_PREFIX}{reference_id}{PLACEHOLDER_SUFFIX}")
}

pub fn contains_placeholder(code: &str) -> bool {
  PLACEHOLDER_RE.is_match(code)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pattern_only_matches_well_formed_placeholders() {
    assert!(contains_placeholder("require.resolve(__ROLLDOWN_NODE_WORKER__abcd1234__)"));
    assert!(!contains_placeholder("__ROLLDOWN_NODE_WORKER__abcd123__"));
    assert!(!contains_placeholder("__ROLLDOWN_NODE_WORKER__ABCD1234__"));
    assert!(!contains_placeholder("__ROLLDOWN_NODE_WORKER__abcd-234__"));
  }

  #[test]
  fn adjacent_placeholders_are_found_separately() {
    let code = "__ROLLDOWN_NODE_WORKER__aaaaaaaa____ROLLDOWN_NODE_WORKER__bbbbbbbb__";
    let ids = PLACEHOLDER_RE
      .captures_iter(code)
      .filter_map(|c| c.get(1).map(|m| m.as_str()))
      .collect::<Vec<_>>();
    assert_eq!(ids, vec!["aaaaaaaa", "bbbbbbbb"]);
  }
}
