use std::path::{Path, PathBuf};

use sugar_path::{AsPath, SugarPathBuf};

#[derive(Debug)]
pub struct Resolver {
  cwd: PathBuf,
}

impl Resolver {
  pub fn with_cwd(cwd: PathBuf) -> Self {
    Self { cwd }
  }

  pub fn cwd(&self) -> &PathBuf {
    &self.cwd
  }
}

impl Default for Resolver {
  fn default() -> Self {
    Self {
      cwd: std::env::current_dir().unwrap_or_default(),
    }
  }
}

impl Resolver {
  /// Resolve `specifier` to an absolute path of an existing file.
  ///
  /// Relative specifiers are joined to the directory of `importer`, or to `cwd` for entries.
  /// `Ok(None)` means there is no such file.
  pub fn resolve(
    &self,
    importer: Option<&str>,
    specifier: &str,
  ) -> rolldown_error::Result<Option<String>> {
    let mut path = if specifier.as_path().is_absolute() {
      specifier.as_path().to_path_buf().into_absolutize()
    } else if let Some(importer) = importer {
      importer
        .as_path()
        .parent()
        .unwrap_or_else(|| self.cwd.as_path())
        .join(specifier)
        .into_absolutize()
    } else {
      self.cwd.as_path().join(specifier).into_absolutize()
    };

    add_js_extension(&mut path);
    if !is_file(&path) {
      tracing::trace!("{} doesn't exist", path.display());
      return Ok(None);
    }
    Ok(Some(path.to_string_lossy().to_string()))
  }
}

fn add_js_extension(path: &mut PathBuf) {
  if path.extension().is_none() {
    path.set_extension("js");
  }
}

fn is_file(path: &Path) -> bool {
  path.metadata().map_or(false, |meta| meta.is_file())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fixture_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rolldown_resolver_{name}_{}", std::process::id()));
    std::fs::create_dir_all(dir.join("src/nested")).unwrap();
    std::fs::write(dir.join("src/app.js"), "").unwrap();
    std::fs::write(dir.join("src/nested/task.js"), "").unwrap();
    dir
  }

  #[test]
  fn resolve_relative_to_importer_or_cwd() {
    let dir = fixture_dir("relative");
    let resolver = Resolver::with_cwd(dir.clone());

    let entry = resolver.resolve(None, "./src/app").unwrap().unwrap();
    assert_eq!(entry, dir.join("src/app.js").to_string_lossy());

    let task = resolver
      .resolve(Some(&entry), "./nested/task.js")
      .unwrap()
      .unwrap();
    assert_eq!(task, dir.join("src/nested/task.js").to_string_lossy());

    let back = resolver.resolve(Some(&task), "../app.js").unwrap().unwrap();
    assert_eq!(back, entry);
  }

  #[test]
  fn missing_files_are_not_resolved() {
    let dir = fixture_dir("missing");
    let resolver = Resolver::with_cwd(dir);
    assert_eq!(resolver.resolve(None, "./src/missing.js").unwrap(), None);
    assert_eq!(resolver.resolve(None, "./src/nested/").unwrap(), None);
  }
}
