use rustc_hash::FxHashMap;

/// Parse the query part of a module request into key/value pairs.
///
/// - `./worker.js?nodeWorker` => `{ "nodeWorker": "" }`
/// - `./worker.js` and `./worker.js?` => `None`
///
/// Values are decoded the way `URLSearchParams` decodes them. For duplicated keys, the last one wins.
pub fn parse_request(id: &str) -> Option<FxHashMap<String, String>> {
  let (_, search) = id.split_once('?')?;
  if search.is_empty() {
    return None;
  }
  Some(
    url::form_urlencoded::parse(search.as_bytes())
      .into_owned()
      .collect(),
  )
}

/// Strip the query and the hash from a module request.
pub fn clean_url(id: &str) -> &str {
  match id.find(|c| c == '?' || c == '#') {
    Some(idx) => &id[..idx],
    None => id,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn requests_without_query_are_not_parsed() {
    assert!(parse_request("./task.js").is_none());
    assert!(parse_request("./task.js?").is_none());
  }

  #[test]
  fn flag_only_keys_map_to_empty_values() {
    let query = parse_request("./task.js?nodeWorker").unwrap();
    assert_eq!(query.get("nodeWorker").map(String::as_str), Some(""));
    assert_eq!(query.len(), 1);
  }

  #[test]
  fn values_are_percent_decoded() {
    let query = parse_request("./task.js?nodeWorker&importer=%2Fsrc%2Fa%26b.js").unwrap();
    assert_eq!(query["importer"], "/src/a&b.js");
    assert!(query.contains_key("nodeWorker"));
  }

  #[test]
  fn last_duplicated_key_wins() {
    let query = parse_request("./task.js?a=1&a=2").unwrap();
    assert_eq!(query["a"], "2");
  }

  #[test]
  fn clean_url_strips_query_and_hash() {
    assert_eq!(clean_url("./task.js?nodeWorker&importer=x"), "./task.js");
    assert_eq!(clean_url("/abs/task.js#frag"), "/abs/task.js");
    assert_eq!(clean_url("/abs/task.js"), "/abs/task.js");
  }
}
