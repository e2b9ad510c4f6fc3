use std::str::FromStr;

/// Mirrors rollup's `output.sourcemap: true | 'inline' | 'hidden'`. Use `Option::None` for `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMapType {
  File,
  Inline,
  Hidden,
}

impl SourceMapType {
  pub fn is_file(&self) -> bool {
    matches!(self, Self::File)
  }

  pub fn is_inline(&self) -> bool {
    matches!(self, Self::Inline)
  }

  pub fn is_hidden(&self) -> bool {
    matches!(self, Self::Hidden)
  }
}

impl FromStr for SourceMapType {
  type Err = rolldown_error::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "true" | "file" => Ok(Self::File),
      "inline" => Ok(Self::Inline),
      "hidden" => Ok(Self::Hidden),
      _ => Err(rolldown_error::Error::panic(format!(
        "Unknown sourcemap value \"{}\"",
        s
      ))),
    }
  }
}
