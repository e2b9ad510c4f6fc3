use rolldown_common::ModuleId;

use crate::{ImportKind, RawImportRecord};

#[derive(Debug, Clone)]
pub(crate) struct ImportRecord {
  pub(crate) specifier: String,
  /// Byte range of the specifier between its quotes in `Module::code`.
  pub(crate) start: usize,
  pub(crate) end: usize,
  pub(crate) kind: ImportKind,
  pub(crate) resolved: ModuleId,
}

impl ImportRecord {
  pub(crate) fn new(raw: RawImportRecord, resolved: ModuleId) -> Self {
    Self {
      specifier: raw.specifier,
      start: raw.start,
      end: raw.end,
      kind: raw.kind,
      resolved,
    }
  }
}

/// A loaded and transformed module. Externals never become a `Module`.
#[derive(Debug)]
pub(crate) struct Module {
  pub(crate) id: ModuleId,
  pub(crate) code: String,
  pub(crate) import_records: Vec<ImportRecord>,
  pub(crate) is_user_defined_entry: bool,
}

impl Module {
  pub(crate) fn dependencies(&self) -> impl Iterator<Item = &ModuleId> {
    self
      .import_records
      .iter()
      .map(|record| &record.resolved)
      .filter(|id| !id.is_external())
  }
}
