use std::path::PathBuf;

use rolldown_core::{Asset, BuildResult, BundlerCore};
use rolldown_plugin::BuildPlugin;
use rolldown_plugin_node_worker::NodeWorkerPlugin;

use crate::{InputOptions, OutputOptions};

pub struct Bundler {
  core: BundlerCore,
  cwd: PathBuf,
}

impl Bundler {
  pub fn new(input_opts: InputOptions) -> Self {
    Self::with_plugins(input_opts, vec![])
  }

  pub fn with_plugins(input_opts: InputOptions, plugins: Vec<Box<dyn BuildPlugin>>) -> Self {
    rolldown_tracing::enable_tracing_on_demand();
    let cwd = input_opts.cwd.clone();

    // Worker requests must be claimed before any user plugin resolves `./task.js?nodeWorker`
    let mut builtin_pre_plugins = vec![];
    if let Some(node_worker) = input_opts.builtins.node_worker {
      builtin_pre_plugins.push(NodeWorkerPlugin::new_boxed(node_worker));
    }

    let plugins = builtin_pre_plugins.into_iter().chain(plugins).collect();

    let bundler = BundlerCore::with_plugins(
      rolldown_core::BuildInputOptions {
        input: input_opts.input,
        cwd: input_opts.cwd,
        is_external: input_opts.is_external,
        on_warn: input_opts.on_warn,
      },
      plugins,
    );
    Self { cwd, core: bundler }
  }

  pub async fn write(&mut self, output_options: OutputOptions) -> BuildResult<Vec<Asset>> {
    let dir = output_options.dir.clone().map_or_else(
      || self.cwd.join("dist"),
      |dir| self.cwd.join(dir),
    );
    let output = self
      .core
      .build(output_options.to_build_output_options())
      .await?;

    std::fs::create_dir_all(&dir).map_err(|err| {
      rolldown_error::Error::io_error(err).context(format!(
        "Could not create directory for output chunks: {}",
        dir.display()
      ))
    })?;
    for asset in &output {
      let dest = dir.join(&asset.filename);
      if let Some(p) = dest.parent() {
        if !p.exists() {
          std::fs::create_dir_all(p).map_err(|err| {
            rolldown_error::Error::io_error(err)
              .context(format!("Could not create directory {}", p.display()))
          })?;
        }
      };
      std::fs::write(&dest, &asset.content).map_err(|err| {
        rolldown_error::Error::io_error(err)
          .context(format!("Failed to write file {}", dest.display()))
      })?;
    }
    tracing::debug!("wrote {} files to {}", output.len(), dir.display());
    Ok(output)
  }

  pub async fn generate(&mut self, output_options: OutputOptions) -> BuildResult<Vec<Asset>> {
    self
      .core
      .build(output_options.to_build_output_options())
      .await
  }
}
