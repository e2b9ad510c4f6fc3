use std::{borrow::Cow, path::Path};

use sugar_path::SugarPath;

use crate::CWD;

pub trait PathExt {
  fn may_display_relative(&self) -> Cow<str>;
}

impl PathExt for Path {
  fn may_display_relative(&self) -> Cow<str> {
    let path = if CWD.is_set() && self.is_absolute() {
      CWD.with(|cwd| self.relative(cwd))
    } else {
      return self.to_string_lossy();
    };
    Cow::Owned(path.display().to_string())
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  #[test]
  fn paths_are_shortened_only_inside_a_cwd_scope() {
    let cwd = PathBuf::from("/project");
    let id = Path::new("/project/src/app.js");
    assert_eq!(id.may_display_relative(), "/project/src/app.js");
    CWD.set(&cwd, || {
      assert_eq!(
        id.may_display_relative(),
        Path::new("src").join("app.js").display().to_string()
      );
    });
  }
}
