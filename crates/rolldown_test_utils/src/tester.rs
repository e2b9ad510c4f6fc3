use std::{
  collections::HashSet,
  path::{Path, PathBuf},
  sync::{Arc, Mutex},
};

use futures::FutureExt;
use rolldown_error::Error as BuildError;

use crate::test_config::TestConfig;

pub struct Tester {
  pub config: TestConfig,
  pub warnings: Arc<Mutex<Vec<BuildError>>>,
}

impl Tester {
  pub fn from_config_path(filepath: &Path) -> Self {
    let test_config = TestConfig::from_config_path(filepath);
    Self {
      config: test_config,
      warnings: Default::default(),
    }
  }

  pub fn input_options(&self, cwd: PathBuf) -> rolldown::InputOptions {
    let warning_collector = self.warnings.clone();
    rolldown::InputOptions {
      input: self
        .config
        .input
        .input
        .iter()
        .map(|item| rolldown::InputItem {
          name: item.name.clone(),
          import: item.import.clone(),
        })
        .collect(),
      cwd,
      is_external: {
        let external = self
          .config
          .input
          .external
          .clone()
          .into_iter()
          .collect::<HashSet<_>>();
        Arc::new(move |specifier, _importer, _| {
          let external = external.clone();
          futures::future::ready(Ok(external.contains(specifier))).boxed()
        })
      },
      on_warn: Arc::new(move |err| {
        warning_collector.lock().unwrap().push(err);
      }),
      builtins: rolldown::BuiltinsOptions {
        node_worker: self.config.input.builtins.node_worker.as_ref().map(|node_worker| {
          rolldown::NodeWorkerPluginOptions {
            sourcemap: node_worker.sourcemap.as_deref().map(parse_sourcemap),
            format: node_worker
              .format
              .parse()
              .unwrap_or_else(|err| panic!("{err}")),
          }
        }),
      },
    }
  }

  pub fn output_options(&self) -> rolldown::OutputOptions {
    let output = &self.config.output;
    rolldown::OutputOptions {
      entry_file_names: output.entry_file_names.as_str().into(),
      chunk_file_names: output.chunk_file_names.as_str().into(),
      sourcemap: output.sourcemap.as_deref().map(parse_sourcemap),
      ..Default::default()
    }
  }
}

fn parse_sourcemap(value: &str) -> rolldown::SourceMapType {
  value.parse().unwrap_or_else(|err| panic!("{err}"))
}
