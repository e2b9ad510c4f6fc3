use std::path::Path;

use serde::Deserialize;

use crate::impl_serde_default;

mod input_options;
pub use input_options::*;
mod output_options;
pub use output_options::*;

/// Content of a `test.config.json` next to the fixture.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TestConfig {
  #[serde(default)]
  pub input: InputOptions,
  #[serde(default)]
  pub output: OutputOptions,
  /// When set, the build must fail with exactly this error.
  #[serde(default)]
  pub expected_error: Option<ExpectedError>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpectedError {
  pub code: String,
  pub message: String,
}

impl_serde_default!(TestConfig);

impl TestConfig {
  pub fn from_config_path(filepath: &Path) -> Self {
    let content = std::fs::read_to_string(filepath).unwrap_or_else(|_| "{}".to_string());
    serde_json::from_str(&content)
      .unwrap_or_else(|err| panic!("Invalid test config {}: {err}", filepath.display()))
  }
}
