use std::{borrow::Cow, fmt::Debug};

use sourcemap::SourceMap;

use crate::{LoadArgs, PluginContext, RenderChunkArgs, ResolveArgs, TransformArgs};

#[derive(Debug)]
pub struct ResolvedId {
  pub id: String,
  pub external: bool,
}

#[derive(Debug)]
pub struct RenderChunkOutput {
  pub code: String,
  pub map: Option<SourceMap>,
}

pub type ResolveOutput = rolldown_error::Result<Option<ResolvedId>>;
pub type LoadOutput = rolldown_error::Result<Option<String>>;
pub type TransformOutput = rolldown_error::Result<Option<String>>;
pub type RenderChunkHookOutput = rolldown_error::Result<Option<RenderChunkOutput>>;
pub type PluginName<'a> = Cow<'a, str>;

#[async_trait::async_trait]
pub trait BuildPlugin: Debug + Send + Sync {
  fn name(&self) -> PluginName;

  async fn resolve_id(&self, _ctx: &mut PluginContext, _args: &ResolveArgs) -> ResolveOutput {
    Ok(None)
  }

  async fn load(&self, _ctx: &mut PluginContext, _args: &LoadArgs) -> LoadOutput {
    Ok(None)
  }

  async fn transform(&self, _ctx: &mut PluginContext, _args: &TransformArgs) -> TransformOutput {
    Ok(None)
  }

  async fn render_chunk(
    &self,
    _ctx: &mut PluginContext,
    _args: &RenderChunkArgs,
  ) -> RenderChunkHookOutput {
    Ok(None)
  }
}
