#[derive(Debug, Clone)]
pub struct InputItem {
  /// Name of the entry chunk, used for `[name]` in `entry_file_names`.
  pub name: String,
  pub import: String,
}
