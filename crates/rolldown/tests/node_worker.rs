use std::{
  path::PathBuf,
  sync::{Arc, Mutex},
};

use rolldown::{
  Asset, BuildError, BuiltinsOptions, Bundler, InputItem, InputOptions, NodeWorkerPluginOptions,
  OutputOptions, SourceMapType,
};
use rolldown_plugin::{
  async_trait, BuildPlugin, PluginContext, RenderChunkArgs, RenderChunkHookOutput,
  TransformArgs, TransformOutput,
};
use rolldown_plugin_node_worker::{contains_placeholder, NodeWorkerPlugin};

fn fixture(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests/fixtures/node_worker")
    .join(name)
}

fn input_options(cwd: PathBuf, node_worker: NodeWorkerPluginOptions) -> InputOptions {
  InputOptions {
    input: vec![InputItem {
      name: "main".to_string(),
      import: "./main.js".to_string(),
    }],
    cwd,
    builtins: BuiltinsOptions {
      node_worker: Some(node_worker),
    },
    ..Default::default()
  }
}

fn readable_names() -> OutputOptions {
  OutputOptions {
    chunk_file_names: "chunks/[name].js".into(),
    ..Default::default()
  }
}

fn find<'a>(assets: &'a [Asset], filename: &str) -> &'a Asset {
  assets
    .iter()
    .find(|asset| asset.filename == filename)
    .unwrap_or_else(|| panic!("{filename} is not emitted"))
}

/// Records which modules carry a placeholder after `load`, and which chunks still carry one
/// when they reach this plugin's `render_chunk`.
#[derive(Debug, Default, Clone)]
struct Recorder(Arc<RecorderState>);

#[derive(Debug, Default)]
struct RecorderState {
  modules_with_placeholder: Mutex<Vec<String>>,
  chunks_with_placeholder: Mutex<Vec<String>>,
  rendered_chunks: Mutex<Vec<String>>,
}

impl Recorder {
  fn take(field: &Mutex<Vec<String>>) -> Vec<String> {
    let mut values = std::mem::take(&mut *field.lock().unwrap());
    values.sort();
    values
  }
}

#[async_trait::async_trait]
impl BuildPlugin for Recorder {
  fn name(&self) -> rolldown_plugin::PluginName {
    "recorder".into()
  }

  async fn transform(&self, _ctx: &mut PluginContext, args: &TransformArgs) -> TransformOutput {
    if contains_placeholder(args.code) {
      self
        .0
        .modules_with_placeholder
        .lock()
        .unwrap()
        .push(args.id.to_string());
    }
    Ok(None)
  }

  async fn render_chunk(
    &self,
    _ctx: &mut PluginContext,
    args: &RenderChunkArgs,
  ) -> RenderChunkHookOutput {
    let file_name = args.chunk.file_name.clone();
    if contains_placeholder(args.code) {
      self
        .0
        .chunks_with_placeholder
        .lock()
        .unwrap()
        .push(file_name.clone());
    }
    self.0.rendered_chunks.lock().unwrap().push(file_name);
    Ok(None)
  }
}

#[tokio::test]
async fn placeholders_reach_render_chunk_untouched() {
  let recorder = Recorder::default();
  let mut bundler = Bundler::with_plugins(
    InputOptions {
      builtins: BuiltinsOptions { node_worker: None },
      ..input_options(fixture("basic"), Default::default())
    },
    vec![
      Box::new(recorder.clone()),
      NodeWorkerPlugin::new_boxed(Default::default()),
    ],
  );
  let assets = bundler.generate(readable_names()).await.unwrap();
  assert!(!assets
    .iter()
    .any(|asset| contains_placeholder(&asset.content)));

  let modules = Recorder::take(&recorder.0.modules_with_placeholder);
  assert_eq!(modules.len(), 1);
  assert!(modules[0].starts_with("./task.js?nodeWorker&importer="));
  assert_eq!(
    Recorder::take(&recorder.0.chunks_with_placeholder),
    vec!["chunks/task2.js"]
  );
}

#[tokio::test]
async fn builtin_resolves_placeholders_before_user_plugins() {
  let recorder = Recorder::default();
  let mut bundler = Bundler::with_plugins(
    input_options(fixture("basic"), Default::default()),
    vec![Box::new(recorder.clone())],
  );
  let assets = bundler.generate(readable_names()).await.unwrap();
  assert_eq!(assets.len(), 4);

  assert_eq!(Recorder::take(&recorder.0.modules_with_placeholder).len(), 1);
  assert!(Recorder::take(&recorder.0.chunks_with_placeholder).is_empty());
  assert_eq!(
    Recorder::take(&recorder.0.rendered_chunks),
    vec![
      "chunks/math.js",
      "chunks/task.js",
      "chunks/task2.js",
      "main.js"
    ]
  );
}

#[tokio::test]
async fn write_puts_assets_under_dir() {
  let dir = std::env::temp_dir().join(format!("rolldown-node-worker-{}", std::process::id()));
  let mut bundler = Bundler::new(input_options(fixture("basic"), Default::default()));
  let assets = bundler
    .write(OutputOptions {
      dir: Some(dir.to_string_lossy().to_string()),
      ..readable_names()
    })
    .await
    .unwrap();

  for asset in &assets {
    let written = std::fs::read_to_string(dir.join(&asset.filename)).unwrap();
    assert_eq!(written, asset.content);
  }
  assert!(std::fs::read_to_string(dir.join("chunks/task2.js"))
    .unwrap()
    .contains(r#"require.resolve("./task.js")"#));
  std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn worker_chunk_maps_are_chained_with_the_plugin_map() {
  let warnings = Arc::new(Mutex::new(Vec::<BuildError>::new()));
  let collector = warnings.clone();
  let mut bundler = Bundler::new(InputOptions {
    on_warn: Arc::new(move |err| collector.lock().unwrap().push(err)),
    ..input_options(
      fixture("basic"),
      NodeWorkerPluginOptions {
        sourcemap: Some(SourceMapType::File),
        ..Default::default()
      },
    )
  });
  let assets = bundler
    .generate(OutputOptions {
      sourcemap: Some(SourceMapType::File),
      ..readable_names()
    })
    .await
    .unwrap();

  assert_eq!(assets.len(), 8);
  assert!(warnings.lock().unwrap().is_empty());

  let wrapper = find(&assets, "chunks/task2.js");
  assert!(wrapper
    .content
    .ends_with("\n//# sourceMappingURL=task2.js.map"));
  let map: serde_json::Value =
    serde_json::from_str(&find(&assets, "chunks/task2.js.map").content).unwrap();
  assert_eq!(map["version"], 3);
  assert!(!map["mappings"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn worker_maps_follow_the_output_sourcemap() {
  let warnings = Arc::new(Mutex::new(Vec::<BuildError>::new()));
  let collector = warnings.clone();
  let mut bundler = Bundler::new(InputOptions {
    on_warn: Arc::new(move |err| collector.lock().unwrap().push(err)),
    ..input_options(fixture("shared_worker"), Default::default())
  });
  let assets = bundler
    .generate(OutputOptions {
      sourcemap: Some(SourceMapType::Hidden),
      ..readable_names()
    })
    .await
    .unwrap();

  assert!(warnings.lock().unwrap().is_empty());
  for wrapper in ["chunks/task2.js", "chunks/task3.js"] {
    assert!(find(&assets, wrapper)
      .content
      .contains("createRequire(import.meta.url)"));
    let map: serde_json::Value =
      serde_json::from_str(&find(&assets, &format!("{wrapper}.map")).content).unwrap();
    assert!(!map["mappings"].as_str().unwrap().is_empty());
  }
}

#[tokio::test]
async fn write_reports_directories_it_cannot_create() {
  let dir =
    std::env::temp_dir().join(format!("rolldown-node-worker-blocked-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  // A file where the chunk directory should go
  std::fs::write(dir.join("chunks"), "").unwrap();

  let mut bundler = Bundler::new(input_options(fixture("basic"), Default::default()));
  let err = bundler
    .write(OutputOptions {
      dir: Some(dir.to_string_lossy().to_string()),
      chunk_file_names: "chunks/nested/[name].js".into(),
      ..Default::default()
    })
    .await
    .unwrap_err();
  std::fs::remove_dir_all(&dir).unwrap();

  assert_eq!(err.kind.code(), "IO_ERROR");
  assert_eq!(err.contexts().len(), 1);
  assert!(err.contexts()[0].contains("Could not create directory"));
  assert!(err.contexts()[0].contains("nested"));
}
