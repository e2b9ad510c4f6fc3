use derivative::Derivative;
use rolldown_common::SourceMapType;

pub mod file_name;
use file_name::FileNameTemplate;

#[derive(Derivative)]
#[derivative(Debug)]
pub struct BuildOutputOptions {
  pub entry_file_names: FileNameTemplate,
  pub chunk_file_names: FileNameTemplate,
  /// `None` disables sourcemaps.
  pub sourcemap: Option<SourceMapType>,
}

impl Default for BuildOutputOptions {
  fn default() -> Self {
    Self {
      entry_file_names: FileNameTemplate::from("[name].js".to_string()),
      chunk_file_names: FileNameTemplate::from("[name]-[hash].js".to_string()),
      sourcemap: None,
    }
  }
}
