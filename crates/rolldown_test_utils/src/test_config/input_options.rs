use serde::Deserialize;

use crate::impl_serde_default;

fn input_default() -> Vec<InputItem> {
  vec![InputItem {
    name: "main".to_string(),
    import: "./main.js".to_string(),
  }]
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InputOptions {
  #[serde(default = "input_default")]
  pub input: Vec<InputItem>,

  #[serde(default)]
  pub external: Vec<String>,

  #[serde(default)]
  pub builtins: Builtins,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InputItem {
  pub name: String,
  pub import: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Builtins {
  /// `None` disables the builtin.
  #[serde(default = "node_worker_default")]
  pub node_worker: Option<NodeWorker>,
}

fn node_worker_default() -> Option<NodeWorker> {
  Some(Default::default())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NodeWorker {
  /// `"file"`, `"inline"` or `"hidden"`
  #[serde(default)]
  pub sourcemap: Option<String>,
  /// `"cjs"` or `"esm"`
  #[serde(default = "esm_by_default")]
  pub format: String,
}

fn esm_by_default() -> String {
  "esm".to_string()
}

impl_serde_default!(InputOptions);
impl_serde_default!(Builtins);
impl_serde_default!(NodeWorker);
