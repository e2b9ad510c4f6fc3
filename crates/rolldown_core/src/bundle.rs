use base64::Engine;
use futures::future::try_join_all;
use rayon::prelude::*;
use rolldown_common::{FileEmitter, ModuleId, SourceMapType};
use rustc_hash::{FxHashMap, FxHashSet};
use sourcemap::SourceMap;

use crate::{
  collapse_sourcemaps, hash_content, name_of_module_id, Asset, BuildInputOptions,
  BuildOutputOptions, BuildResult, Chunk, Graph,
};

#[derive(Debug)]
pub struct Bundle<'a> {
  pub input_options: &'a BuildInputOptions,
  pub output_options: &'a BuildOutputOptions,
  pub graph: &'a Graph,
  file_emitter: &'a FileEmitter,
}

impl<'a> Bundle<'a> {
  pub fn new(
    input_options: &'a BuildInputOptions,
    output_options: &'a BuildOutputOptions,
    graph: &'a Graph,
    file_emitter: &'a FileEmitter,
  ) -> Self {
    Self {
      input_options,
      output_options,
      graph,
      file_emitter,
    }
  }

  /// User defined entries first, then emitted chunks, then everything else by id.
  fn generate_chunks(&self) -> Vec<Chunk> {
    let mut seen = FxHashSet::default();
    let mut chunks = vec![];

    for (name, id) in &self.graph.entries {
      if seen.insert(id.clone()) {
        chunks.push(Chunk::new(name.clone(), id.clone(), true, false));
      }
    }
    for (_, name, id) in &self.graph.emitted_entries {
      if seen.insert(id.clone()) {
        let name = name.clone().unwrap_or_else(|| name_of_module_id(id.id()));
        chunks.push(Chunk::new(name, id.clone(), false, true));
      } else if let Some(chunk) = chunks.iter_mut().find(|chunk| &chunk.module_id == id) {
        chunk.is_emitted_entry = true;
      }
    }
    for id in self.graph.non_entry_modules() {
      if seen.insert(id.clone()) {
        chunks.push(Chunk::new(name_of_module_id(id.id()), id.clone(), false, false));
      }
    }
    chunks
  }

  /// Also hands the file names of emitted chunks to the `FileEmitter`.
  fn assign_file_names(&self, chunks: &mut [Chunk]) -> BuildResult<FxHashMap<ModuleId, String>> {
    let hashes = chunks
      .par_iter()
      .map(|chunk| Ok(hash_content(&chunk.module(self.graph)?.code)))
      .collect::<BuildResult<Vec<_>>>()?;

    let mut used_file_names = FxHashSet::default();
    for (chunk, hash) in chunks.iter_mut().zip(hashes) {
      let file_name = make_unique(
        chunk.gen_file_name(self.output_options, &hash),
        &mut used_file_names,
      );
      tracing::debug!("{} -> {}", chunk.module_id, file_name);
      chunk.file_name = Some(file_name);
    }

    let file_name_by_module = chunks
      .iter()
      .map(|chunk| Ok((chunk.module_id.clone(), chunk.file_name()?.to_string())))
      .collect::<BuildResult<FxHashMap<_, _>>>()?;
    for (reference_id, _, id) in &self.graph.emitted_entries {
      if let Some(file_name) = file_name_by_module.get(id) {
        self
          .file_emitter
          .assign_file_name(reference_id, file_name.clone())?;
      }
    }
    Ok(file_name_by_module)
  }

  #[tracing::instrument(skip_all)]
  pub async fn generate(&mut self) -> BuildResult<Vec<Asset>> {
    let mut chunks = self.generate_chunks();
    let file_name_by_module = self.assign_file_names(&mut chunks)?;

    let rendered = chunks
      .iter()
      .map(|chunk| {
        chunk.render(
          self.graph,
          &file_name_by_module,
          self.input_options,
          self.output_options,
        )
      })
      .collect::<BuildResult<Vec<_>>>()?;

    let sourcemap = self.output_options.sourcemap;
    let plugin_driver = self.graph.build_plugin_driver.read().await;
    let outputs = try_join_all(chunks.iter().zip(rendered).map(|(chunk, (code, map))| {
      let plugin_driver = &plugin_driver;
      async move {
        let rendered_chunk = chunk.to_rendered_chunk()?;
        let (code, plugin_maps) = plugin_driver
          .render_chunk(code, &rendered_chunk, sourcemap)
          .await?;
        let map = map.and_then(|map| {
          collapse_sourcemaps(std::iter::once(map).chain(plugin_maps).collect())
        });
        BuildResult::Ok((rendered_chunk.file_name, code, map))
      }
    }))
    .await?;

    let mut assets = vec![];
    for (file_name, code, map) in outputs {
      match (sourcemap, map) {
        (Some(sourcemap), Some(map)) => {
          assets.extend(emit_with_sourcemap(file_name, code, &map, sourcemap)?)
        }
        _ => assets.push(Asset {
          filename: file_name,
          content: code,
        }),
      }
    }
    Ok(assets)
  }
}

/// `task.js` -> `task2.js` -> `task3.js`, compared case-insensitively like rollup.
fn make_unique(file_name: String, used: &mut FxHashSet<String>) -> String {
  if used.insert(file_name.to_lowercase()) {
    return file_name;
  }
  let base_name_start = file_name.rfind('/').map_or(0, |idx| idx + 1);
  let stem_end = match file_name[base_name_start..].rfind('.') {
    Some(idx) if idx > 0 => base_name_start + idx,
    _ => file_name.len(),
  };
  let (stem, ext) = file_name.split_at(stem_end);
  let mut index = 1;
  loop {
    index += 1;
    let candidate = format!("{stem}{index}{ext}");
    if used.insert(candidate.to_lowercase()) {
      return candidate;
    }
  }
}

fn emit_with_sourcemap(
  file_name: String,
  code: String,
  map: &SourceMap,
  sourcemap: SourceMapType,
) -> BuildResult<Vec<Asset>> {
  let mut json = vec![];
  map
    .to_writer(&mut json)
    .map_err(rolldown_error::anyhow::Error::from)?;
  let json = String::from_utf8(json).map_err(rolldown_error::anyhow::Error::from)?;

  let assets = match sourcemap {
    SourceMapType::File => {
      let base_name = file_name.rsplit('/').next().unwrap_or(&file_name);
      let content = format!("{code}\n//# sourceMappingURL={base_name}.map");
      let map_file_name = format!("{file_name}.map");
      vec![
        Asset {
          filename: file_name,
          content,
        },
        Asset {
          filename: map_file_name,
          content: json,
        },
      ]
    }
    SourceMapType::Hidden => {
      let map_file_name = format!("{file_name}.map");
      vec![
        Asset {
          filename: file_name,
          content: code,
        },
        Asset {
          filename: map_file_name,
          content: json,
        },
      ]
    }
    SourceMapType::Inline => {
      let encoded = base64::engine::general_purpose::STANDARD.encode(json);
      vec![Asset {
        filename: file_name,
        content: format!(
          "{code}\n//# sourceMappingURL=data:application/json;charset=utf-8;base64,{encoded}"
        ),
      }]
    }
  };
  Ok(assets)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unique_file_names() {
    let mut used = FxHashSet::default();
    assert_eq!(make_unique("task.js".to_string(), &mut used), "task.js");
    assert_eq!(make_unique("Task.js".to_string(), &mut used), "Task2.js");
    assert_eq!(make_unique("task.js".to_string(), &mut used), "task3.js");
    assert_eq!(make_unique("a.b/task".to_string(), &mut used), "a.b/task");
    assert_eq!(make_unique("a.b/task".to_string(), &mut used), "a.b/task2");
  }
}
