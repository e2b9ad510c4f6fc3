mod input_options;
pub use input_options::*;
mod output_options;
pub use output_options::*;

use std::sync::Arc;

pub(crate) type SharedBuildInputOptions = Arc<BuildInputOptions>;
