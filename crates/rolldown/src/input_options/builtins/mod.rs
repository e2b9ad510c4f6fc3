use derivative::Derivative;
use rolldown_plugin_node_worker::NodeWorkerPluginOptions;

#[derive(Derivative)]
#[derivative(Debug)]
pub struct BuiltinsOptions {
  /// None means disable the builtin
  pub node_worker: Option<NodeWorkerPluginOptions>,
}

impl Default for BuiltinsOptions {
  fn default() -> Self {
    Self {
      node_worker: Some(Default::default()),
    }
  }
}
