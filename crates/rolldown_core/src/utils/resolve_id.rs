use rolldown_common::{clean_url, ModuleId};
use rolldown_plugin::ResolveArgs;
use rolldown_resolver::Resolver;
use sugar_path::AsPath;

use crate::{BuildResult, IsExternal, SharedBuildPluginDriver};

/// Plugins first, then the fs resolver. `Ok(None)` means nobody could resolve it.
pub(crate) async fn resolve_id(
  resolver: &Resolver,
  args: ResolveArgs<'_>,
  is_external: &IsExternal,
  plugin_driver: &SharedBuildPluginDriver,
) -> BuildResult<Option<ModuleId>> {
  let plugin_result = plugin_driver.read().await.resolve_id(&args).await?;

  if let Some(plugin_result) = plugin_result {
    return Ok(Some(ModuleId::new(
      plugin_result.id,
      plugin_result.external,
    )));
  }

  let ResolveArgs {
    importer,
    specifier,
  } = args;

  // external modules (non-entry modules that start with neither '.' or '/')
  // are skipped at this stage.
  if importer.is_some() && !specifier.as_path().is_absolute() && !specifier.starts_with('.') {
    return Ok(Some(ModuleId::new(specifier, true)));
  }

  if is_external(specifier, importer, false).await? {
    return Ok(Some(ModuleId::new(specifier, true)));
  }

  // Virtual importers like `./task.js?nodeWorker&importer=..` still live next to their file
  let resolved = resolver.resolve(importer.map(clean_url), specifier)?;

  match resolved {
    Some(resolved) => {
      let external = is_external(&resolved, importer, true).await?;
      Ok(Some(ModuleId::new(resolved, external)))
    }
    None => Ok(None),
  }
}
