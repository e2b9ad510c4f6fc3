use rolldown_common::{EmittedChunk, ReferenceId, SharedFileEmitter};

/// The `this` of rollup plugin hooks.
#[derive(Debug, Clone)]
pub struct PluginContext {
  file_emitter: SharedFileEmitter,
}

impl PluginContext {
  pub fn new(file_emitter: SharedFileEmitter) -> Self {
    Self { file_emitter }
  }

  pub fn emit_chunk(&self, chunk: EmittedChunk) -> ReferenceId {
    self.file_emitter.emit_chunk(chunk)
  }

  /// Only works after the bundle has assigned file names, which is guaranteed in `render_chunk`.
  pub fn get_file_name(&self, reference_id: &str) -> rolldown_error::Result<String> {
    self.file_emitter.get_file_name(reference_id)
  }
}
