use std::str::FromStr;

/// How the generated wrapper gets hold of `require`.
///
/// The wrapper itself is always written with `import`/`export`, so `Cjs` is only valid when a
/// later step converts the chunks to CommonJS.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WrapperFormat {
  /// Use the `require` of the CommonJS module scope.
  Cjs,
  /// Create `require` from `import.meta.url`, for chunks that stay ES modules.
  #[default]
  Esm,
}

impl FromStr for WrapperFormat {
  type Err = rolldown_error::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "cjs" => Ok(Self::Cjs),
      "esm" | "es" => Ok(Self::Esm),
      _ => Err(rolldown_error::Error::panic(format!(
        "Unknown worker wrapper format \"{s}\""
      ))),
    }
  }
}

pub(crate) fn render_wrapper(placeholder: &str, format: WrapperFormat) -> String {
  let require_shim = match format {
    WrapperFormat::Cjs => "",
    WrapperFormat::Esm => {
      "import { createRequire } from 'node:module';\nconst require = createRequire(import.meta.url);\n"
    }
  };
  format!(
    "import {{ Worker }} from 'node:worker_threads';\n{require_shim}export default function (options) {{ return new Worker(require.resolve({placeholder}), options); }}\n"
  )
}
