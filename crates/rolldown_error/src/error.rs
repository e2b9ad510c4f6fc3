use std::{fmt::Display, path::Path};

use crate::ErrorKind;

#[derive(Debug)]
pub struct Error {
  contexts: Vec<String>,
  pub kind: ErrorKind,
}

impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    self.kind.to_string().eq(&other.kind.to_string())
  }
}

impl Eq for Error {}

impl PartialOrd for Error {
  fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Error {
  fn cmp(&self, other: &Self) -> std::cmp::Ordering {
    self.kind.to_string().cmp(&other.kind.to_string())
  }
}

impl Error {
  fn with_kind(kind: ErrorKind) -> Self {
    Self {
      contexts: vec![],
      kind,
    }
  }

  pub fn context(mut self, context: String) -> Self {
    self.contexts.push(context);
    self
  }

  pub fn contexts(&self) -> &[String] {
    &self.contexts
  }

  // --- Aligned with rollup
  pub fn entry_cannot_be_external(unresolved_id: impl AsRef<Path>) -> Self {
    Self::with_kind(ErrorKind::ExternalEntry {
      id: unresolved_id.as_ref().to_path_buf(),
    })
  }

  pub fn unresolved_entry(unresolved_id: impl AsRef<Path>) -> Self {
    Self::with_kind(ErrorKind::UnresolvedEntry {
      unresolved_id: unresolved_id.as_ref().to_path_buf(),
    })
  }

  pub fn unresolved_import(specifier: impl Into<String>, importer: impl AsRef<Path>) -> Self {
    Self::with_kind(ErrorKind::UnresolvedImport {
      specifier: specifier.into(),
      importer: importer.as_ref().to_path_buf(),
    })
  }

  pub fn unknown_file_reference(reference_id: impl Into<String>) -> Self {
    Self::with_kind(ErrorKind::UnknownFileReference {
      reference_id: reference_id.into(),
    })
  }

  pub fn file_name_not_generated(reference_id: impl Into<String>) -> Self {
    Self::with_kind(ErrorKind::FileNameNotGenerated {
      reference_id: reference_id.into(),
    })
  }

  pub fn sourcemap_broken(plugin: impl Into<String>) -> Self {
    Self::with_kind(ErrorKind::SourcemapBroken {
      plugin: plugin.into(),
    })
  }

  // --- rolldown special

  pub fn unresolved_placeholder(placeholder: impl Into<String>, chunk: impl Into<String>) -> Self {
    Self::with_kind(ErrorKind::UnresolvedPlaceholder {
      placeholder: placeholder.into(),
      chunk: chunk.into(),
    })
  }

  pub fn io_error(e: std::io::Error) -> Self {
    Self::with_kind(ErrorKind::IoError(e))
  }

  pub fn panic(msg: String) -> Self {
    anyhow::format_err!(msg).into()
  }
}

impl std::convert::From<anyhow::Error> for Error {
  fn from(value: anyhow::Error) -> Self {
    Self::with_kind(ErrorKind::Panic { source: value })
  }
}

impl std::convert::From<std::io::Error> for Error {
  fn from(value: std::io::Error) -> Self {
    Self::io_error(value)
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match &self.kind {
      ErrorKind::Panic { source, .. } => Some(source.as_ref()),
      ErrorKind::IoError(source) => Some(source),
      _ => None,
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for ctx in self.contexts.iter().rev() {
      writeln!(f, "{}: {}", ansi_term::Color::Yellow.paint("context"), ctx)?;
    }

    self.kind.fmt(f)
  }
}
