use std::sync::Arc;

use rolldown_common::{FileEmitter, SharedFileEmitter};
use rolldown_plugin::BuildPlugin;
use tracing::instrument;

use crate::{
  BuildInputOptions, BuildOutputOptions, BuildPluginDriver, BuildResult, Bundle, Graph,
  SharedBuildInputOptions, SharedBuildPluginDriver,
};

pub struct BundlerCore {
  input_options: SharedBuildInputOptions,
  plugin_driver: SharedBuildPluginDriver,
  file_emitter: SharedFileEmitter,
}

#[derive(Debug)]
pub struct Asset {
  pub filename: String,
  pub content: String,
}

impl BundlerCore {
  pub fn new(input_opts: BuildInputOptions) -> Self {
    Self::with_plugins(input_opts, vec![])
  }

  pub fn with_plugins(input_opts: BuildInputOptions, plugins: Vec<Box<dyn BuildPlugin>>) -> Self {
    rolldown_tracing::enable_tracing_on_demand();
    let file_emitter: SharedFileEmitter = Arc::new(FileEmitter::default());
    Self {
      plugin_driver: BuildPluginDriver::new(
        plugins,
        file_emitter.clone(),
        input_opts.on_warn.clone(),
      )
      .into_shared(),
      input_options: Arc::new(input_opts),
      file_emitter,
    }
  }

  #[instrument(skip_all)]
  pub async fn build(&mut self, output_opts: BuildOutputOptions) -> BuildResult<Vec<Asset>> {
    tracing::debug!("{:#?}", self.input_options);
    tracing::debug!("{:#?}", output_opts);
    // Reference ids only live as long as one build
    self.file_emitter.reset();

    let mut graph = Graph::new(self.plugin_driver.clone());
    graph
      .generate_module_graph(&self.input_options, self.file_emitter.clone())
      .await?;
    let mut bundle = Bundle::new(
      &self.input_options,
      &output_opts,
      &graph,
      &self.file_emitter,
    );
    let assets = bundle.generate().await?;
    Ok(assets)
  }
}
