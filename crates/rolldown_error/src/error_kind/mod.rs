use std::{
  fmt::Display,
  path::{Path, PathBuf},
};

use crate::utils::PathExt;
use crate::CWD;

pub mod error_code;

#[derive(Debug)]
pub enum ErrorKind {
  // --- Aligned with rollup
  UnresolvedEntry {
    unresolved_id: PathBuf,
  },
  ExternalEntry {
    id: PathBuf,
  },
  UnresolvedImport {
    specifier: String,
    importer: PathBuf,
  },
  UnknownFileReference {
    reference_id: String,
  },
  FileNameNotGenerated {
    reference_id: String,
  },
  SourcemapBroken {
    plugin: String,
  },

  // --- Rolldown specific
  /// A placeholder survived until `render_chunk` but its reference id never got a file name.
  UnresolvedPlaceholder {
    placeholder: String,
    chunk: String,
  },

  /// This error means that rolldown panics because unrecoverable error happens.
  ///
  /// This error is also used to emulate plain error `throw`ed by rollup.
  /// For `throw new Error("Errored")` in js, you can use `ErrorKind::anyhow(anyhow::format_err!("Errored"))`
  ///
  /// We also use this to replace `panic!()` in the code for graceful shutdown.
  /// But this is not recommended.
  Panic {
    source: anyhow::Error,
  },

  // --- Custom
  IoError(std::io::Error),
}

impl Display for ErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      // Aligned with rollup
      ErrorKind::UnresolvedEntry { unresolved_id } => write!(f, "Could not resolve entry module \"{}\"", unresolved_id.may_display_relative()),
      ErrorKind::ExternalEntry { id } => write!(f, "Entry module \"{}\" cannot be external.", id.may_display_relative()),
      ErrorKind::UnresolvedImport { specifier, importer } => write!(f, r#"Could not resolve "{specifier}" from "{}""#, importer.may_display_relative()),
      ErrorKind::UnknownFileReference { reference_id } => write!(f, r#"Plugin error - Unable to get file name for unknown file "{reference_id}"."#),
      ErrorKind::FileNameNotGenerated { reference_id } => write!(f, r#"Plugin error - Unable to get file name for emitted chunk "{reference_id}". You can only get file names once chunks have been generated after the "renderStart" hook."#),
      ErrorKind::SourcemapBroken { plugin } => write!(f, r#"Sourcemap is likely to be incorrect: a plugin ({plugin}) was used to transform files, but didn't generate a sourcemap for the transformation."#),
      // Rolldown specific
      ErrorKind::UnresolvedPlaceholder { placeholder, chunk } => write!(f, r#"Could not resolve placeholder "{placeholder}" in chunk "{chunk}"."#),
      ErrorKind::Panic { source } => source.fmt(f),
      ErrorKind::IoError(e) => e.fmt(f),
    }
  }
}

impl ErrorKind {
  /// Shorten the file paths in messages by make them relative to CWD.
  pub fn to_readable_string(&self, cwd: impl AsRef<Path>) -> String {
    let cwd = cwd.as_ref().to_path_buf();
    CWD.set(&cwd, || self.to_string())
  }

  pub fn code(&self) -> &'static str {
    match self {
      // Aligned with rollup
      ErrorKind::UnresolvedEntry { .. } => error_code::UNRESOLVED_ENTRY,
      ErrorKind::ExternalEntry { .. } => error_code::UNRESOLVED_ENTRY,
      ErrorKind::UnresolvedImport { .. } => error_code::UNRESOLVED_IMPORT,
      ErrorKind::UnknownFileReference { .. } => error_code::FILE_NOT_FOUND,
      ErrorKind::FileNameNotGenerated { .. } => error_code::FILE_NAME_NOT_GENERATED,
      ErrorKind::SourcemapBroken { .. } => error_code::SOURCEMAP_BROKEN,
      // Rolldown specific
      ErrorKind::UnresolvedPlaceholder { .. } => error_code::UNRESOLVED_PLACEHOLDER,
      ErrorKind::Panic { .. } => error_code::PANIC,
      ErrorKind::IoError(_) => error_code::IO_ERROR,
    }
  }
}
