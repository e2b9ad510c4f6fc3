use std::{path::PathBuf, pin::Pin, sync::Arc};

use derivative::Derivative;
use futures::{future, Future, FutureExt};

use crate::{BuildError, BuildResult};

mod input_item;
pub use input_item::*;

type PinFutureBox<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// `(specifier, importer, is_resolved)`
pub type IsExternal =
  Arc<dyn Fn(&str, Option<&str>, bool) -> PinFutureBox<BuildResult<bool>> + Send + Sync>;

pub type WarningHandler = Arc<dyn Fn(BuildError) + Send + Sync>;

#[derive(Derivative)]
#[derivative(Debug)]
pub struct BuildInputOptions {
  pub input: Vec<InputItem>,
  pub cwd: PathBuf,
  #[derivative(Debug = "ignore")]
  pub is_external: IsExternal,
  #[derivative(Debug = "ignore")]
  pub on_warn: WarningHandler,
}

impl Default for BuildInputOptions {
  fn default() -> Self {
    Self {
      input: Default::default(),
      cwd: std::env::current_dir().unwrap_or_default(),
      is_external: Arc::new(|_, _, _| future::ready(Ok(false)).boxed()),
      on_warn: Arc::new(|err| {
        eprintln!("{}", err);
      }),
    }
  }
}
