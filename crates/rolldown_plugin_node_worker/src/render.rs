use rolldown_common::{posix_relative, to_relative_request, SourceMapType};
use rolldown_error::Error as BuildError;
use rolldown_magic_string::{MagicString, SourceMapOptions};
use rolldown_plugin::{PluginContext, RenderChunkArgs, RenderChunkHookOutput, RenderChunkOutput};

use crate::placeholder::{PLACEHOLDER_PREFIX, PLACEHOLDER_RE};

/// Replace every placeholder in the chunk with a string literal of the worker chunk's path,
/// relative to the directory of the chunk.
pub(crate) fn resolve_placeholders(
  ctx: &PluginContext,
  args: &RenderChunkArgs,
  sourcemap: Option<SourceMapType>,
) -> RenderChunkHookOutput {
  let code = args.code;
  let chunk = args.chunk;
  if let Some(malformed) = find_malformed_placeholder(code) {
    return Err(
      BuildError::unresolved_placeholder(malformed, &chunk.file_name)
        .context("The placeholder is not a well-formed worker reference".to_string()),
    );
  }
  if !PLACEHOLDER_RE.is_match(code) {
    return Ok(None);
  }

  let mut s = MagicString::new(code);
  for captures in PLACEHOLDER_RE.captures_iter(code) {
    let (Some(placeholder), Some(reference_id)) = (captures.get(0), captures.get(1)) else {
      return Err(BuildError::panic(format!(
        "Malformed node worker placeholder in chunk \"{}\"",
        chunk.file_name
      )));
    };

    let file_name = ctx
      .get_file_name(reference_id.as_str())
      .map_err(|err| {
        BuildError::unresolved_placeholder(placeholder.as_str(), &chunk.file_name)
          .context(err.to_string())
      })?;

    let relative_path = to_relative_request(posix_relative(chunk.dir(), &file_name));
    let replacement =
      serde_json::to_string(&relative_path).map_err(rolldown_error::anyhow::Error::from)?;
    tracing::trace!(
      "{} resolved to {} in {}",
      placeholder.as_str(),
      replacement,
      chunk.file_name
    );
    s.overwrite(placeholder.start(), placeholder.end(), replacement)?;
  }

  let map = sourcemap.map(|_| {
    s.generate_map(&SourceMapOptions {
      source: chunk.file_name.clone(),
      file: Some(chunk.file_name.clone()),
      hires: true,
      include_content: false,
    })
  });

  Ok(Some(RenderChunkOutput {
    code: s.to_string(),
    map,
  }))
}

/// Every occurrence of the prefix must start a well-formed placeholder.
fn find_malformed_placeholder(code: &str) -> Option<&str> {
  code
    .match_indices(PLACEHOLDER_PREFIX)
    .find(|(start, _)| {
      PLACEHOLDER_RE
        .find_at(code, *start)
        .map_or(true, |m| m.start() != *start)
    })
    .map(|(start, _)| {
      let token_len = code[start..]
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(code.len() - start);
      &code[start..start + token_len]
    })
}

#[cfg(test)]
mod tests {
  use super::find_malformed_placeholder;

  #[test]
  fn only_broken_prefixes_are_reported() {
    assert_eq!(
      find_malformed_placeholder("a(__ROLLDOWN_NODE_WORKER__abcd1234__); b()"),
      None
    );
    assert_eq!(
      find_malformed_placeholder(
        "a(__ROLLDOWN_NODE_WORKER__abcd1234__, __ROLLDOWN_NODE_WORKER__abc__)"
      ),
      Some("__ROLLDOWN_NODE_WORKER__abc__")
    );
    assert_eq!(
      find_malformed_placeholder("x = __ROLLDOWN_NODE_WORKER__"),
      Some("__ROLLDOWN_NODE_WORKER__")
    );
  }
}
