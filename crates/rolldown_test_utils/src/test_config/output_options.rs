use serde::Deserialize;

use crate::impl_serde_default;

fn entry_file_names_default() -> String {
  "[name].js".to_string()
}

fn chunk_file_names_default() -> String {
  "[name].js".to_string()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputOptions {
  #[serde(default = "entry_file_names_default")]
  pub entry_file_names: String,

  /// Hashes are left out by default to keep snapshots stable.
  #[serde(default = "chunk_file_names_default")]
  pub chunk_file_names: String,

  /// `"file"`, `"inline"` or `"hidden"`
  #[serde(default)]
  pub sourcemap: Option<String>,
}

impl_serde_default!(OutputOptions);
