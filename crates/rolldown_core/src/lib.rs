use std::sync::Arc;

mod bundler;
pub use bundler::*;
mod chunk;
pub use chunk::*;
mod module;
pub(crate) use module::*;
mod options;
pub use options::*;
mod graph;
pub use graph::*;
mod module_loader;
use rolldown_resolver::Resolver;
mod bundle;
pub use bundle::*;
mod plugin_driver;
pub(crate) use plugin_driver::*;
mod utils;
pub(crate) use utils::*;

pub(crate) type SharedResolver = Arc<Resolver>;

// public exports

pub type BuildResult<T> = rolldown_error::Result<T>;
pub type BuildError = rolldown_error::Error;
