use derivative::Derivative;
use rolldown_common::SourceMapType;
pub use rolldown_core::file_name::FileNameTemplate;

#[derive(Derivative)]
#[derivative(Debug)]
pub struct OutputOptions {
  /// Defaults to `<cwd>/dist` when writing.
  pub dir: Option<String>,
  pub entry_file_names: FileNameTemplate,
  pub chunk_file_names: FileNameTemplate,
  pub sourcemap: Option<SourceMapType>,
}

impl Default for OutputOptions {
  fn default() -> Self {
    Self {
      entry_file_names: FileNameTemplate::from("[name].js".to_string()),
      chunk_file_names: FileNameTemplate::from("[name]-[hash].js".to_string()),
      dir: None,
      sourcemap: None,
    }
  }
}

impl OutputOptions {
  pub(crate) fn to_build_output_options(&self) -> rolldown_core::BuildOutputOptions {
    rolldown_core::BuildOutputOptions {
      entry_file_names: self.entry_file_names.clone(),
      chunk_file_names: self.chunk_file_names.clone(),
      sourcemap: self.sourcemap,
    }
  }
}
