#[derive(Debug, Clone)]
pub struct FileNameTemplate {
  template: String,
}

impl FileNameTemplate {
  pub fn new(template: String) -> Self {
    Self { template }
  }

  pub fn template(&self) -> &str {
    &self.template
  }
}

impl From<String> for FileNameTemplate {
  fn from(template: String) -> Self {
    Self { template }
  }
}

impl From<&str> for FileNameTemplate {
  fn from(template: &str) -> Self {
    Self {
      template: template.to_string(),
    }
  }
}

#[derive(Debug, Default)]
pub struct RenderOptions<'me> {
  pub name: Option<&'me str>,
  pub hash: Option<&'me str>,
}

impl FileNameTemplate {
  pub fn render(&self, options: RenderOptions) -> String {
    let mut tmp = self.template.clone();
    if let Some(name) = options.name {
      tmp = tmp.replace("[name]", name);
    }
    if let Some(hash) = options.hash {
      tmp = tmp.replace("[hash]", hash);
    }
    tmp
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn render_placeholders() {
    let template = FileNameTemplate::from("assets/[name]-[hash].js");
    assert_eq!(
      template.render(RenderOptions {
        name: Some("task"),
        hash: Some("0badf00d"),
      }),
      "assets/task-0badf00d.js"
    );
    assert_eq!(
      FileNameTemplate::from("[name].js").render(RenderOptions {
        name: Some("app"),
        hash: Some("0badf00d"),
      }),
      "app.js"
    );
  }
}
