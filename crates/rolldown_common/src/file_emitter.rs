use std::{
  borrow::Borrow,
  fmt::Display,
  hash::{Hash, Hasher},
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex, PoisonError,
  },
};

use dashmap::{mapref::entry::Entry, DashMap};
use rolldown_error::Error as BuildError;
use rustc_hash::FxHasher;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque handle of a file emitted by `this.emitFile`. Always 8 characters of `[a-z0-9]`.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReferenceId(String);

impl ReferenceId {
  pub const LEN: usize = 8;

  fn mint(chunk: &EmittedChunk, seed: usize) -> Self {
    let mut hasher = FxHasher::default();
    chunk.id.hash(&mut hasher);
    chunk.importer.hash(&mut hasher);
    seed.hash(&mut hasher);
    let mut value = hasher.finish();

    let mut bytes = [b'0'; Self::LEN];
    for byte in bytes.iter_mut().rev() {
      *byte = BASE36[(value % 36) as usize];
      value /= 36;
    }
    Self(bytes.iter().map(|b| *b as char).collect())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl AsRef<str> for ReferenceId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl Borrow<str> for ReferenceId {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl Display for ReferenceId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

/// A module that should be bundled as its own chunk, like `this.emitFile({ type: 'chunk' })`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedChunk {
  /// Unresolved id of the module. It's resolved against `importer`.
  pub id: String,
  pub importer: Option<String>,
  pub name: Option<String>,
}

#[derive(Debug)]
struct EmittedChunkState {
  chunk: EmittedChunk,
  file_name: Option<String>,
}

/// Build-wide registry of emitted chunks.
///
/// Reference ids are handed out while modules are loaded, and only get a file name once the bundle
/// has decided every output file name.
#[derive(Debug, Default)]
pub struct FileEmitter {
  chunks: DashMap<ReferenceId, EmittedChunkState>,
  pending: Mutex<Vec<ReferenceId>>,
  seed: AtomicUsize,
}

pub type SharedFileEmitter = Arc<FileEmitter>;

impl FileEmitter {
  pub fn emit_chunk(&self, chunk: EmittedChunk) -> ReferenceId {
    let reference_id = loop {
      let seed = self.seed.fetch_add(1, Ordering::SeqCst);
      let candidate = ReferenceId::mint(&chunk, seed);
      if let Entry::Vacant(entry) = self.chunks.entry(candidate.clone()) {
        entry.insert(EmittedChunkState {
          chunk: chunk.clone(),
          file_name: None,
        });
        break candidate;
      }
    };
    tracing::trace!("emit chunk {} as {}", chunk.id, reference_id);
    self
      .pending
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push(reference_id.clone());
    reference_id
  }

  /// Chunks emitted since the last call, in emission order.
  pub fn take_pending_chunks(&self) -> Vec<(ReferenceId, EmittedChunk)> {
    let pending = std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner));
    pending
      .into_iter()
      .filter_map(|reference_id| {
        let chunk = self.chunks.get(&reference_id)?.chunk.clone();
        Some((reference_id, chunk))
      })
      .collect()
  }

  pub fn assign_file_name(
    &self,
    reference_id: &ReferenceId,
    file_name: String,
  ) -> rolldown_error::Result<()> {
    let mut state = self
      .chunks
      .get_mut(reference_id)
      .ok_or_else(|| BuildError::unknown_file_reference(reference_id.as_str()))?;
    state.file_name = Some(file_name);
    Ok(())
  }

  pub fn get_file_name(&self, reference_id: &str) -> rolldown_error::Result<String> {
    let state = self
      .chunks
      .get(reference_id)
      .ok_or_else(|| BuildError::unknown_file_reference(reference_id))?;
    state
      .file_name
      .clone()
      .ok_or_else(|| BuildError::file_name_not_generated(reference_id))
  }

  pub fn len(&self) -> usize {
    self.chunks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.chunks.is_empty()
  }

  pub fn reset(&self) {
    self.chunks.clear();
    self
      .pending
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clear();
    self.seed.store(0, Ordering::SeqCst);
  }
}
