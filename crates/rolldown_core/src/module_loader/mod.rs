use futures::future::join_all;
use rolldown_common::{EmittedChunk, ModuleId, ReferenceId, SharedFileEmitter};
use rolldown_error::format_err;
use rolldown_plugin::ResolveArgs;
use rustc_hash::FxHashSet;

pub(crate) mod module_task;

use module_task::ModuleTask;

use crate::{
  resolve_id, BuildError, BuildInputOptions, BuildResult, Graph, Module, SharedBuildPluginDriver,
  SharedResolver,
};

pub(crate) struct ModuleLoader<'a> {
  input_options: &'a BuildInputOptions,
  graph: &'a mut Graph,
  build_plugin_driver: SharedBuildPluginDriver,
  file_emitter: SharedFileEmitter,
  loaded_modules: FxHashSet<ModuleId>,
  remaining_tasks: usize,
  tx: tokio::sync::mpsc::UnboundedSender<Msg>,
  rx: tokio::sync::mpsc::UnboundedReceiver<Msg>,
  resolver: SharedResolver,
  errors: Vec<BuildError>,
}

#[derive(Debug)]
pub(crate) enum Msg {
  Loaded(Module),
  Error(BuildError),
}

impl<'a> ModuleLoader<'a> {
  pub(crate) fn new(
    graph: &'a mut Graph,
    resolver: SharedResolver,
    plugin_driver: SharedBuildPluginDriver,
    file_emitter: SharedFileEmitter,
    input_opts: &'a BuildInputOptions,
  ) -> Self {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Msg>();
    Self {
      graph,
      loaded_modules: Default::default(),
      remaining_tasks: 0,
      tx,
      rx,
      resolver,
      errors: Default::default(),
      build_plugin_driver: plugin_driver,
      file_emitter,
      input_options: input_opts,
    }
  }

  async fn resolve_entry(
    &self,
    specifier: &str,
    importer: Option<&str>,
  ) -> BuildResult<ModuleId> {
    let id = resolve_id(
      &self.resolver,
      ResolveArgs {
        importer,
        specifier,
      },
      &self.input_options.is_external,
      &self.build_plugin_driver,
    )
    .await?;

    let Some(id) = id else {
      return Err(match importer {
        Some(importer) => BuildError::unresolved_import(specifier, importer),
        None => BuildError::unresolved_entry(specifier),
      });
    };

    if id.is_external() {
      return Err(BuildError::entry_cannot_be_external(id.id()));
    }
    Ok(id)
  }

  pub(crate) async fn fetch_all_modules(mut self) -> BuildResult<()> {
    let input_options = self.input_options;
    if input_options.input.is_empty() {
      return Err(format_err!("You must supply options.input to rolldown").into());
    }

    let resolved_entries = join_all(
      input_options
        .input
        .iter()
        .map(|item| self.resolve_entry(&item.import, None)),
    )
    .await;

    resolved_entries
      .into_iter()
      .zip(input_options.input.iter())
      .try_for_each(|(entry, item)| -> BuildResult<()> {
        let id = entry?;
        self.graph.entries.push((item.name.clone(), id.clone()));
        if self.loaded_modules.insert(id.clone()) {
          self.spawn_new_module_task(id, true);
        }
        Ok(())
      })?;

    // Plugins may emit chunks while the entries are being resolved
    self.fetch_emitted_chunks().await;

    while self.remaining_tasks > 0 {
      let Some(msg) = self.rx.recv().await else {
        return Err(format_err!("Module loader stopped with {} pending tasks", self.remaining_tasks).into());
      };
      match msg {
        Msg::Loaded(module) => {
          tracing::trace!("finish: {}", module.id);
          self.remaining_tasks -= 1;
          self.handle_msg_loaded(module);
        }
        Msg::Error(err) => {
          self.remaining_tasks -= 1;
          self.errors.push(err);
        }
      }
      self.fetch_emitted_chunks().await;
      tracing::trace!("remaining: {}", self.remaining_tasks);
    }

    if self.errors.is_empty() {
      Ok(())
    } else {
      // Only the first error in arrival order is reported
      self.errors.into_iter().try_for_each(Err)
    }
  }

  /// Emitted chunks become entries. Their ids are resolved against their importer like imports.
  async fn fetch_emitted_chunks(&mut self) {
    for (reference_id, chunk) in self.file_emitter.take_pending_chunks() {
      match self.resolve_emitted_chunk(&chunk).await {
        Ok(id) => self.add_emitted_entry(reference_id, chunk, id),
        Err(err) => self.errors.push(err),
      }
    }
  }

  async fn resolve_emitted_chunk(&self, chunk: &EmittedChunk) -> BuildResult<ModuleId> {
    self
      .resolve_entry(&chunk.id, chunk.importer.as_deref())
      .await
      .map_err(|err| err.context(format!("Emitted chunk {}", chunk.id)))
  }

  fn add_emitted_entry(&mut self, reference_id: ReferenceId, chunk: EmittedChunk, id: ModuleId) {
    tracing::debug!("emitted chunk {} resolved to {}", reference_id, id);
    self
      .graph
      .emitted_entries
      .push((reference_id, chunk.name, id.clone()));
    if self.loaded_modules.insert(id.clone()) {
      self.spawn_new_module_task(id, false);
    }
  }

  fn spawn_new_module_task(&mut self, module_id: ModuleId, is_user_defined_entry: bool) {
    tracing::trace!("spawning new job for {}", module_id);
    self.remaining_tasks += 1;
    let task = ModuleTask {
      id: module_id,
      tx: self.tx.clone(),
      is_user_defined_entry,
      resolver: self.resolver.clone(),
      plugin_driver: self.build_plugin_driver.clone(),
      is_external: self.input_options.is_external.clone(),
    };
    tokio::spawn(task.run());
  }

  fn handle_msg_loaded(&mut self, module: Module) {
    let dependencies = module.dependencies().cloned().collect::<Vec<_>>();
    dependencies.into_iter().for_each(|id| {
      if self.loaded_modules.insert(id.clone()) {
        self.spawn_new_module_task(id, false);
      }
    });
    self.graph.add_module(module);
  }
}
