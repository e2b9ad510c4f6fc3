mod bundler;
mod input_options;
mod output_options;
pub use {
  bundler::Bundler,
  input_options::{
    default_warning_handler, BuiltinsOptions, InputItem, InputOptions, IsExternal,
    WarningHandler,
  },
  output_options::{FileNameTemplate, OutputOptions},
  rolldown_common::SourceMapType,
  rolldown_core::{Asset, BuildError, BuildResult},
  rolldown_plugin_node_worker::{NodeWorkerPluginOptions, WrapperFormat},
};
