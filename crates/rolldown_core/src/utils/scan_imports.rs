use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImportKind {
  Static,
  Dynamic,
}

/// A string specifier found in the source. `start..end` covers the text between the quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawImportRecord {
  pub(crate) specifier: String,
  pub(crate) start: usize,
  pub(crate) end: usize,
  pub(crate) kind: ImportKind,
}

const QUOTED: &str = r#"(?:'([^'\n]*)'|"([^"\n]*)")"#;

static STATIC_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(&format!(
    r"(?:^|[^\w$.])(?:import|export)\s*(?:[\w$*{{}},\s]*?\bfrom\s*)?{QUOTED}"
  ))
  .expect("static import pattern is valid")
});

static DYNAMIC_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(&format!(r"(?:^|[^\w$.])import\s*\(\s*{QUOTED}\s*\)"))
    .expect("dynamic import pattern is valid")
});

/// Find `import .. from '..'`, `import '..'`, `export .. from '..'` and `import('..')`.
///
/// This is a textual scan. Specifiers inside comments or strings that look like imports
/// are reported too.
pub(crate) fn scan_imports(code: &str) -> Vec<RawImportRecord> {
  let mut records = [
    (&*STATIC_IMPORT_RE, ImportKind::Static),
    (&*DYNAMIC_IMPORT_RE, ImportKind::Dynamic),
  ]
  .into_iter()
  .flat_map(|(re, kind)| {
    re.captures_iter(code).filter_map(move |captures| {
      let specifier = captures.get(1).or_else(|| captures.get(2))?;
      Some(RawImportRecord {
        specifier: specifier.as_str().to_string(),
        start: specifier.start(),
        end: specifier.end(),
        kind,
      })
    })
  })
  .filter(|record| !record.specifier.is_empty())
  .collect::<Vec<_>>();
  records.sort_by_key(|record| record.start);
  records
}

#[cfg(test)]
mod tests {
  use super::*;

  fn specifiers(code: &str) -> Vec<(&str, ImportKind)> {
    scan_imports(code)
      .into_iter()
      .map(|record| (&code[record.start..record.end], record.kind))
      .collect()
  }

  #[test]
  fn finds_every_kind_of_import() {
    let code = r#"import makeWorker from './task.js?nodeWorker';
import { a, b as c } from "./ab.js";
import * as ns from './ns.js';
import './side-effect.js';
export { d } from './d.js';
export * from "./all.js";
const lazy = () => import('./lazy.js');
"#;
    assert_eq!(
      specifiers(code),
      vec![
        ("./task.js?nodeWorker", ImportKind::Static),
        ("./ab.js", ImportKind::Static),
        ("./ns.js", ImportKind::Static),
        ("./side-effect.js", ImportKind::Static),
        ("./d.js", ImportKind::Static),
        ("./all.js", ImportKind::Static),
        ("./lazy.js", ImportKind::Dynamic),
      ]
    );
  }

  #[test]
  fn ignores_lookalikes() {
    let code = r#"export default function () {}
export const x = "./not-a-module.js";
foo.import('./member.js');
const reimport = 1;
"#;
    assert!(scan_imports(code).is_empty());
  }

  #[test]
  fn spans_point_between_the_quotes() {
    let code = "import x from './x.js';";
    let records = scan_imports(code);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].specifier, "./x.js");
    assert_eq!(&code[records[0].start - 1..records[0].end + 1], "'./x.js'");
  }
}
