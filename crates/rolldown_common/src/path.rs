//! `/`-separated path helpers for output file names.
//!
//! Output file names are urls rather than OS paths, so these never touch `std::path`
//! and behave the same on every host.

/// Same as `path.posix.dirname` of node.
pub fn posix_dirname(path: &str) -> &str {
  let trimmed = path.trim_end_matches('/');
  if trimmed.is_empty() {
    return if path.starts_with('/') { "/" } else { "." };
  }
  match trimmed.rfind('/') {
    None => ".",
    Some(idx) => {
      let dir = trimmed[..idx].trim_end_matches('/');
      if dir.is_empty() {
        "/"
      } else {
        dir
      }
    }
  }
}

fn normalized_segments(path: &str) -> Vec<&str> {
  let mut segments = vec![];
  for segment in path.split('/') {
    match segment {
      "" | "." => {}
      ".." => {
        segments.pop();
      }
      segment => segments.push(segment),
    }
  }
  segments
}

/// Same as `path.posix.relative` of node, with both paths resolved against the same root.
pub fn posix_relative(from: &str, to: &str) -> String {
  let from = normalized_segments(from);
  let to = normalized_segments(to);
  let common = from
    .iter()
    .zip(to.iter())
    .take_while(|(a, b)| a == b)
    .count();

  std::iter::repeat("..")
    .take(from.len() - common)
    .chain(to[common..].iter().copied())
    .collect::<Vec<_>>()
    .join("/")
}

/// Runtime resolvers treat `foo/bar.js` as a package request, so relative paths must be marked.
pub fn to_relative_request(relative_path: String) -> String {
  if relative_path.starts_with("./") || relative_path.starts_with("../") {
    relative_path
  } else {
    format!("./{relative_path}")
  }
}
