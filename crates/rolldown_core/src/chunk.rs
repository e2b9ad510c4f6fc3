use rolldown_common::{
  posix_dirname, posix_relative, to_relative_request, ChunkId, ModuleId, RenderedChunk,
};
use rolldown_magic_string::{MagicString, SourceMapOptions};
use rustc_hash::FxHashMap;
use sourcemap::SourceMap;
use sugar_path::{AsPath, SugarPath};

use crate::{
  file_name, BuildError, BuildInputOptions, BuildOutputOptions, BuildResult, Graph, Module,
};

/// Every internal module is emitted as its own chunk.
#[derive(Debug)]
pub struct Chunk {
  pub(crate) id: ChunkId,
  pub(crate) name: String,
  pub(crate) module_id: ModuleId,
  pub(crate) is_user_defined_entry: bool,
  pub(crate) is_emitted_entry: bool,
  pub(crate) file_name: Option<String>,
}

impl Chunk {
  pub fn new(
    name: String,
    module_id: ModuleId,
    is_user_defined_entry: bool,
    is_emitted_entry: bool,
  ) -> Self {
    Self {
      id: ChunkId::new(module_id.id()),
      name,
      module_id,
      is_user_defined_entry,
      is_emitted_entry,
      file_name: None,
    }
  }

  pub(crate) fn file_name(&self) -> BuildResult<&str> {
    self
      .file_name
      .as_deref()
      .ok_or_else(|| BuildError::panic(format!("File name of chunk {:?} is not generated", self.id)))
  }

  pub(crate) fn gen_file_name(&self, output_options: &BuildOutputOptions, hash: &str) -> String {
    let template = if self.is_user_defined_entry {
      &output_options.entry_file_names
    } else {
      &output_options.chunk_file_names
    };
    template.render(file_name::RenderOptions {
      name: Some(&self.name),
      hash: Some(hash),
    })
  }

  pub(crate) fn module<'g>(&self, graph: &'g Graph) -> BuildResult<&'g Module> {
    graph
      .get_module(&self.module_id)
      .ok_or_else(|| BuildError::panic(format!("Module {} of chunk is missing", self.module_id)))
  }

  pub(crate) fn to_rendered_chunk(&self) -> BuildResult<RenderedChunk> {
    Ok(RenderedChunk {
      name: self.name.clone(),
      file_name: self.file_name()?.to_string(),
      facade_module_id: self.module_id.id().to_string(),
      is_entry: self.is_user_defined_entry || self.is_emitted_entry,
    })
  }

  /// Point every internal import to the file of the chunk it ended up in.
  pub(crate) fn render(
    &self,
    graph: &Graph,
    file_name_by_module: &FxHashMap<ModuleId, String>,
    input_options: &BuildInputOptions,
    output_options: &BuildOutputOptions,
  ) -> BuildResult<(String, Option<SourceMap>)> {
    let module = self.module(graph)?;
    let file_name = self.file_name()?;
    let mut s = MagicString::new(&module.code);

    for record in module
      .import_records
      .iter()
      .filter(|record| !record.resolved.is_external())
    {
      let target = file_name_by_module.get(&record.resolved).ok_or_else(|| {
        BuildError::panic(format!("Module {} is not in any chunk", record.resolved))
      })?;
      let request = to_relative_request(posix_relative(posix_dirname(file_name), target));
      tracing::trace!(
        "{:?} import {} in {} -> {}",
        record.kind,
        record.specifier,
        file_name,
        request
      );
      if request != record.specifier {
        s.overwrite(record.start, record.end, request)?;
      }
    }

    let map = output_options.sourcemap.map(|_| {
      s.generate_map(&SourceMapOptions {
        source: source_path_of(&module.id, input_options),
        file: Some(file_name.to_string()),
        hires: true,
        include_content: true,
      })
    });

    Ok((s.to_string(), map))
  }
}

/// `sources` entry of a module: its path relative to `cwd`, or the raw id for virtual modules.
fn source_path_of(id: &ModuleId, input_options: &BuildInputOptions) -> String {
  let id_str = id.id();
  let path = id_str.as_path();
  if path.is_absolute() {
    path
      .relative(&input_options.cwd)
      .to_string_lossy()
      .replace('\\', "/")
  } else {
    id.id().to_string()
  }
}
