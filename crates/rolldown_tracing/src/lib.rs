use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Level;

static IS_INIT: AtomicBool = AtomicBool::new(false);

/// Name of the env var that turns logging on, e.g. `LOG=rolldown_core=trace`.
pub const LOG_ENV: &str = "LOG";

pub fn init() {
  use tracing_subscriber::{fmt, prelude::*, EnvFilter};
  if !IS_INIT.swap(true, Ordering::SeqCst) {
    let registry = tracing_subscriber::registry()
      .with(fmt::layer())
      .with(EnvFilter::from_env(LOG_ENV))
      .with(
        tracing_subscriber::filter::Targets::new().with_targets(vec![
          ("rolldown", Level::TRACE),
          ("rolldown_core", Level::TRACE),
          ("rolldown_common", Level::TRACE),
          ("rolldown_resolver", Level::TRACE),
          ("rolldown_plugin_node_worker", Level::TRACE),
        ]),
      );
    // Someone else may have installed a global subscriber already
    if registry.try_init().is_err() {
      tracing::trace!("global tracing subscriber already exists");
    }
  }
}

/// Install the subscriber only when `LOG` is set.
pub fn enable_tracing_on_demand() {
  if std::env::var_os(LOG_ENV).is_some() {
    init();
  }
}
