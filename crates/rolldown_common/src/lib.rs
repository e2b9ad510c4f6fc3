use std::borrow::Cow;
use std::fmt::Display;

mod file_emitter;
pub use file_emitter::*;
mod path;
pub use path::*;
mod rendered_chunk;
pub use rendered_chunk::*;
mod request;
pub use request::*;
mod source_map_type;
pub use source_map_type::*;

#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct ChunkId(String);

impl ChunkId {
  pub fn new(value: impl Into<String>) -> Self {
    Self(value.into())
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl From<String> for ChunkId {
  fn from(value: String) -> Self {
    Self(value)
  }
}

impl AsRef<str> for ChunkId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct ModuleId {
  value: String,
  is_external: bool,
}

impl Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.value)
  }
}

impl ModuleId {
  pub fn new(value: impl Into<String>, is_external: bool) -> Self {
    Self {
      value: value.into(),
      is_external,
    }
  }

  pub fn is_external(&self) -> bool {
    self.is_external
  }

  pub fn id(&self) -> &str {
    &self.value
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    &self.value
  }
}

pub type StaticStr = Cow<'static, str>;
