use std::sync::Arc;

use derivative::Derivative;
use itertools::Itertools;
use rolldown_common::{ModuleId, ReferenceId, SharedFileEmitter};
use rolldown_resolver::Resolver;
use rustc_hash::FxHashMap;

use crate::module_loader::ModuleLoader;
use crate::{BuildInputOptions, BuildResult, Module, SharedBuildPluginDriver};

pub(crate) type ModuleById = FxHashMap<ModuleId, Module>;

#[derive(Derivative)]
#[derivative(Debug)]
pub struct Graph {
  /// `(name, id)` of user defined entries, in the order of `input`.
  pub entries: Vec<(String, ModuleId)>,
  /// `(reference id, name, id)` of emitted chunks, in emission order.
  pub emitted_entries: Vec<(ReferenceId, Option<String>, ModuleId)>,
  #[derivative(Debug = "ignore")]
  pub(crate) module_by_id: ModuleById,
  #[derivative(Debug = "ignore")]
  pub(crate) build_plugin_driver: SharedBuildPluginDriver,
}

impl Graph {
  pub(crate) fn new(build_plugin_driver: SharedBuildPluginDriver) -> Self {
    Self {
      entries: Default::default(),
      emitted_entries: Default::default(),
      module_by_id: Default::default(),
      build_plugin_driver,
    }
  }

  pub(crate) fn add_module(&mut self, module: Module) {
    debug_assert!(!self.module_by_id.contains_key(&module.id));
    self.module_by_id.insert(module.id.clone(), module);
  }

  pub(crate) fn get_module(&self, id: &ModuleId) -> Option<&Module> {
    self.module_by_id.get(id)
  }

  /// Modules that are neither user defined entries nor emitted chunks, sorted by id.
  pub(crate) fn non_entry_modules(&self) -> Vec<&ModuleId> {
    self
      .module_by_id
      .values()
      .filter(|module| !module.is_user_defined_entry)
      .filter(|module| {
        !self
          .emitted_entries
          .iter()
          .any(|(_, _, id)| id == &module.id)
      })
      .map(|module| &module.id)
      .sorted()
      .collect()
  }

  #[tracing::instrument(skip_all)]
  pub(crate) async fn generate_module_graph(
    &mut self,
    input_opts: &BuildInputOptions,
    file_emitter: SharedFileEmitter,
  ) -> BuildResult<()> {
    let resolver = Arc::new(Resolver::with_cwd(input_opts.cwd.clone()));
    let plugin_driver = self.build_plugin_driver.clone();

    ModuleLoader::new(self, resolver, plugin_driver, file_emitter, input_opts)
      .fetch_all_modules()
      .await?;

    tracing::debug!(
      "module graph: {:#?}",
      self
        .module_by_id
        .values()
        .map(|module| (module.id.id(), module.dependencies().map(|id| id.id()).collect_vec()))
        .sorted()
        .collect_vec()
    );
    Ok(())
  }
}
