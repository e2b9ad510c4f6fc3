use crate::posix_dirname;

/// What plugins get to know about a chunk in `render_chunk`.
#[derive(Debug, Clone)]
pub struct RenderedChunk {
  pub name: String,
  /// Final file name, relative to the output directory and always `/`-separated.
  pub file_name: String,
  pub facade_module_id: String,
  pub is_entry: bool,
}

impl RenderedChunk {
  /// Directory that relative requests in this chunk are resolved against.
  pub fn dir(&self) -> &str {
    posix_dirname(&self.file_name)
  }
}
