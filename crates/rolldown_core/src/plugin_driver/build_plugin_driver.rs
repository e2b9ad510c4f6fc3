use std::sync::Arc;

use rolldown_common::{ModuleId, RenderedChunk, SharedFileEmitter, SourceMapType};
use rolldown_plugin::{
  BuildPlugin, LoadArgs, LoadOutput, PluginContext, RenderChunkArgs, ResolveArgs, ResolveOutput,
  TransformArgs,
};
use sourcemap::SourceMap;
use tokio::sync::RwLock;

use crate::{BuildError, BuildResult, WarningHandler};

pub(crate) type SharedBuildPluginDriver = Arc<RwLock<BuildPluginDriver>>;

#[derive(derivative::Derivative)]
#[derivative(Debug)]
pub(crate) struct BuildPluginDriver {
  pub plugins: Vec<Box<dyn BuildPlugin>>,
  file_emitter: SharedFileEmitter,
  #[derivative(Debug = "ignore")]
  on_warn: WarningHandler,
}

impl BuildPluginDriver {
  pub(crate) fn new(
    plugins: Vec<Box<dyn BuildPlugin>>,
    file_emitter: SharedFileEmitter,
    on_warn: WarningHandler,
  ) -> Self {
    Self {
      plugins,
      file_emitter,
      on_warn,
    }
  }

  pub(crate) fn into_shared(self) -> SharedBuildPluginDriver {
    Arc::new(RwLock::new(self))
  }

  fn context(&self) -> PluginContext {
    PluginContext::new(self.file_emitter.clone())
  }

  pub(crate) async fn resolve_id(&self, args: &ResolveArgs<'_>) -> ResolveOutput {
    for plugin in &self.plugins {
      let output = plugin.resolve_id(&mut self.context(), args).await?;
      if output.is_some() {
        return Ok(output);
      }
    }
    Ok(None)
  }

  pub(crate) async fn load(&self, id: &ModuleId) -> LoadOutput {
    for plugin in &self.plugins {
      let output = plugin
        .load(&mut self.context(), &LoadArgs { id: id.id() })
        .await?;
      if output.is_some() {
        return Ok(output);
      }
    }
    Ok(None)
  }

  pub(crate) async fn transform(&self, id: &ModuleId, code: String) -> BuildResult<String> {
    let mut code = code;
    for plugin in &self.plugins {
      let output = plugin
        .transform(
          &mut self.context(),
          &TransformArgs {
            id: id.id(),
            code: &code,
          },
        )
        .await?;
      if let Some(output) = output {
        code = output
      }
    }
    Ok(code)
  }

  /// Returns the final code and the maps of every plugin that changed it, in the order they ran.
  pub(crate) async fn render_chunk(
    &self,
    code: String,
    chunk: &RenderedChunk,
    sourcemap: Option<SourceMapType>,
  ) -> BuildResult<(String, Vec<SourceMap>)> {
    let mut code = code;
    let mut maps = vec![];
    for plugin in &self.plugins {
      let output = plugin
        .render_chunk(
          &mut self.context(),
          &RenderChunkArgs {
            code: &code,
            chunk,
            sourcemap,
          },
        )
        .await
        .map_err(|err| err.context(format!("render_chunk of {}", plugin.name())))?;
      let Some(output) = output else {
        continue;
      };
      match output.map {
        Some(map) => maps.push(map),
        None if sourcemap.is_some() && output.code != code => {
          (self.on_warn)(BuildError::sourcemap_broken(plugin.name()))
        }
        None => {}
      }
      code = output.code;
    }
    Ok((code, maps))
  }
}
