use rolldown_common::{RenderedChunk, SourceMapType};

#[derive(Debug, Clone)]
pub struct ResolveArgs<'a> {
  pub importer: Option<&'a str>,
  pub specifier: &'a str,
}

#[derive(Debug, Clone)]
pub struct LoadArgs<'a> {
  pub id: &'a str,
}

#[derive(Debug)]
pub struct TransformArgs<'a> {
  pub id: &'a str,
  pub code: &'a String,
}

#[derive(Debug)]
pub struct RenderChunkArgs<'a> {
  pub code: &'a str,
  pub chunk: &'a RenderedChunk,
  /// `output.sourcemap` of the build. `None` means no map is expected back.
  pub sourcemap: Option<SourceMapType>,
}
