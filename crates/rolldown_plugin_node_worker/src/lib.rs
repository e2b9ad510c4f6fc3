use rolldown_common::{clean_url, parse_request, EmittedChunk, SourceMapType};
use rolldown_plugin::{
  async_trait, BuildPlugin, LoadArgs, LoadOutput, PluginContext, RenderChunkArgs,
  RenderChunkHookOutput, ResolveArgs, ResolveOutput, ResolvedId,
};

mod placeholder;
pub use placeholder::contains_placeholder;
mod render;
mod wrapper;
pub use wrapper::WrapperFormat;

/// Presence of this query key turns an import into a worker import. Its value is ignored.
pub const NODE_WORKER_QUERY: &str = "nodeWorker";
/// `load` has no access to the importer, so `resolve_id` carries it in the id.
const IMPORTER_QUERY: &str = "importer";

#[derive(Debug, Default, Clone)]
pub struct NodeWorkerPluginOptions {
  /// Overrides `output.sourcemap` for the maps of rewritten chunks. `None` follows the output.
  pub sourcemap: Option<SourceMapType>,
  pub format: WrapperFormat,
}

/// Bundles `import makeWorker from './task.js?nodeWorker'` as a separate chunk, and gives the
/// importer a function that starts a `worker_threads` `Worker` with the final file of that chunk.
#[derive(Debug, Default)]
pub struct NodeWorkerPlugin {
  options: NodeWorkerPluginOptions,
}

impl NodeWorkerPlugin {
  pub fn new(options: NodeWorkerPluginOptions) -> Self {
    Self { options }
  }

  pub fn new_boxed(options: NodeWorkerPluginOptions) -> Box<dyn BuildPlugin> {
    Box::new(Self::new(options))
  }
}

#[async_trait::async_trait]
impl BuildPlugin for NodeWorkerPlugin {
  fn name(&self) -> rolldown_plugin::PluginName {
    std::borrow::Cow::Borrowed("builtin:node-worker")
  }

  async fn resolve_id(&self, _ctx: &mut PluginContext, args: &ResolveArgs) -> ResolveOutput {
    let is_worker_request =
      parse_request(args.specifier).map_or(false, |query| query.contains_key(NODE_WORKER_QUERY));
    if !is_worker_request {
      return Ok(None);
    }
    let Some(importer) = args.importer else {
      return Ok(None);
    };

    let importer = url::form_urlencoded::byte_serialize(importer.as_bytes()).collect::<String>();
    Ok(Some(ResolvedId {
      id: format!("{}&{IMPORTER_QUERY}={importer}", args.specifier),
      external: false,
    }))
  }

  async fn load(&self, ctx: &mut PluginContext, args: &LoadArgs) -> LoadOutput {
    let Some(mut query) = parse_request(args.id) else {
      return Ok(None);
    };
    if !query.contains_key(NODE_WORKER_QUERY) {
      return Ok(None);
    }
    let Some(importer) = query.remove(IMPORTER_QUERY) else {
      return Ok(None);
    };

    let reference_id = ctx.emit_chunk(EmittedChunk {
      id: clean_url(args.id).to_string(),
      importer: Some(importer),
      name: None,
    });
    tracing::debug!("{} is emitted as {}", args.id, reference_id);

    Ok(Some(wrapper::render_wrapper(
      &placeholder::placeholder_for(&reference_id),
      self.options.format,
    )))
  }

  async fn render_chunk(
    &self,
    ctx: &mut PluginContext,
    args: &RenderChunkArgs,
  ) -> RenderChunkHookOutput {
    render::resolve_placeholders(ctx, args, self.options.sourcemap.or(args.sourcemap))
  }
}
