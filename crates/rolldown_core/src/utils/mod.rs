use std::hash::{Hash, Hasher};

use rolldown_common::clean_url;
use rustc_hash::FxHasher;
use sugar_path::AsPath;

mod resolve_id;
pub(crate) use resolve_id::*;
mod scan_imports;
pub(crate) use scan_imports::*;
mod collapse_sourcemaps;
pub(crate) use collapse_sourcemaps::*;

/// 8 hex chars, used for `[hash]` in file names.
pub(crate) fn hash_content(content: &str) -> String {
  let mut hasher = FxHasher::default();
  content.hash(&mut hasher);
  format!("{:016x}", hasher.finish())[..8].to_string()
}

/// `/src/task.js?nodeWorker` -> `task`
pub(crate) fn name_of_module_id(id: &str) -> String {
  clean_url(id)
    .as_path()
    .file_stem()
    .map(|stem| stem.to_string_lossy().to_string())
    .filter(|stem| !stem.is_empty())
    .unwrap_or_else(|| "chunk".to_string())
}
