use futures::future::try_join_all;
use rolldown_common::ModuleId;
use rolldown_plugin::ResolveArgs;
use tracing::instrument;

use super::Msg;
use crate::{
  resolve_id, scan_imports, BuildError, BuildResult, ImportRecord, IsExternal, Module,
  SharedBuildPluginDriver, SharedResolver,
};

pub(crate) struct ModuleTask {
  pub(crate) id: ModuleId,
  pub(crate) is_user_defined_entry: bool,
  pub(crate) tx: tokio::sync::mpsc::UnboundedSender<Msg>,
  pub(crate) resolver: SharedResolver,
  pub(crate) plugin_driver: SharedBuildPluginDriver,
  pub(crate) is_external: IsExternal,
}

impl ModuleTask {
  async fn resolve_id(&self, specifier: &str) -> BuildResult<ModuleId> {
    let resolved = resolve_id(
      &self.resolver,
      ResolveArgs {
        importer: Some(self.id.id()),
        specifier,
      },
      &self.is_external,
      &self.plugin_driver,
    )
    .await?;

    resolved.ok_or_else(|| BuildError::unresolved_import(specifier, self.id.id()))
  }

  #[instrument(skip_all)]
  pub(crate) async fn run(self) {
    let tx = self.tx.clone();
    let msg = match self.run_inner().await {
      Ok(module) => Msg::Loaded(module),
      Err(err) => Msg::Error(err),
    };
    // The receiver only goes away once the loader has given up on the build
    if tx.send(msg).is_err() {
      tracing::trace!("module loader is gone");
    }
  }

  async fn run_inner(self) -> BuildResult<Module> {
    let loaded = self.plugin_driver.read().await.load(&self.id).await?;
    let code = match loaded {
      Some(code) => code,
      None => tokio::fs::read_to_string(self.id.id())
        .await
        .map_err(rolldown_error::anyhow::Error::from)
        .map_err(|e| e.context(format!("Read file: {}", self.id.id())))?,
    };

    let code = self
      .plugin_driver
      .read()
      .await
      .transform(&self.id, code)
      .await?;

    let task = &self;
    let import_records = try_join_all(scan_imports(&code).into_iter().map(|raw| async move {
      let resolved = task.resolve_id(&raw.specifier).await?;
      BuildResult::Ok(ImportRecord::new(raw, resolved))
    }))
    .await?;

    Ok(Module {
      id: self.id,
      code,
      import_records,
      is_user_defined_entry: self.is_user_defined_entry,
    })
  }
}
