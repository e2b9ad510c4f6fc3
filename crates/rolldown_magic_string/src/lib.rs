use std::fmt::Display;

use rolldown_error::Error;
use sourcemap::{SourceMap, SourceMapBuilder};

#[derive(Debug, Clone)]
struct Edit {
  start: usize,
  end: usize,
  content: String,
}

/// A list of edits against an immutable source.
///
/// Offsets always refer to the original source, no matter how many edits were recorded before.
/// The edited text is only materialized by `to_string()`.
#[derive(Debug, Clone)]
pub struct MagicString<'s> {
  source: &'s str,
  // Sorted by `start` and never overlapping.
  edits: Vec<Edit>,
}

#[derive(Debug, Default, Clone)]
pub struct SourceMapOptions {
  /// Name of the original source in `sources`.
  pub source: String,
  pub file: Option<String>,
  /// Map every character instead of only line starts and edit boundaries.
  pub hires: bool,
  pub include_content: bool,
}

#[derive(Debug, Default, Clone, Copy)]
struct Position {
  line: u32,
  // In UTF-16 code units, like browsers and node count columns.
  col: u32,
}

impl Position {
  fn advance(&mut self, ch: char) {
    if ch == '\n' {
      self.line += 1;
      self.col = 0;
    } else {
      self.col += ch.len_utf16() as u32;
    }
  }

  fn advance_str(&mut self, s: &str) {
    s.chars().for_each(|ch| self.advance(ch));
  }
}

impl<'s> MagicString<'s> {
  pub fn new(source: &'s str) -> Self {
    Self {
      source,
      edits: vec![],
    }
  }

  pub fn original(&self) -> &'s str {
    self.source
  }

  pub fn has_changed(&self) -> bool {
    !self.edits.is_empty()
  }

  /// Replace `source[start..end]` with `content`.
  pub fn overwrite(
    &mut self,
    start: usize,
    end: usize,
    content: impl Into<String>,
  ) -> rolldown_error::Result<&mut Self> {
    if start >= end {
      return Err(Error::panic(format!(
        "Cannot overwrite a zero-length range {start}..{end}"
      )));
    }
    if end > self.source.len() {
      return Err(Error::panic(format!(
        "Range {start}..{end} is out of bounds of a source with length {}",
        self.source.len()
      )));
    }
    if !self.source.is_char_boundary(start) || !self.source.is_char_boundary(end) {
      return Err(Error::panic(format!(
        "Range {start}..{end} doesn't lie on character boundaries"
      )));
    }

    let idx = self.edits.partition_point(|edit| edit.start < start);
    let overlaps_prev = idx > 0 && self.edits[idx - 1].end > start;
    let overlaps_next = self
      .edits
      .get(idx)
      .map_or(false, |next| next.start < end);
    if overlaps_prev || overlaps_next {
      return Err(Error::panic(format!(
        "Cannot overwrite {start}..{end} because it overlaps an edited range"
      )));
    }

    self.edits.insert(
      idx,
      Edit {
        start,
        end,
        content: content.into(),
      },
    );
    Ok(self)
  }

  pub fn generate_map(&self, options: &SourceMapOptions) -> SourceMap {
    let mut builder = SourceMapBuilder::new(options.file.as_deref());
    let src_id = builder.add_source(&options.source);
    if options.include_content {
      builder.set_source_contents(src_id, Some(self.source));
    }

    let mut generated = Position::default();
    let mut original = Position::default();
    let map_unchanged = |builder: &mut SourceMapBuilder,
                             segment: &str,
                             generated: &mut Position,
                             original: &mut Position| {
      for (idx, ch) in segment.chars().enumerate() {
        if ch != '\n' && (options.hires || idx == 0 || original.col == 0) {
          builder.add_raw(
            generated.line,
            generated.col,
            original.line,
            original.col,
            Some(src_id),
            None,
          );
        }
        generated.advance(ch);
        original.advance(ch);
      }
    };

    let mut cursor = 0;
    for edit in &self.edits {
      map_unchanged(
        &mut builder,
        &self.source[cursor..edit.start],
        &mut generated,
        &mut original,
      );
      if !edit.content.is_empty() {
        builder.add_raw(
          generated.line,
          generated.col,
          original.line,
          original.col,
          Some(src_id),
          None,
        );
      }
      generated.advance_str(&edit.content);
      original.advance_str(&self.source[edit.start..edit.end]);
      cursor = edit.end;
    }
    map_unchanged(
      &mut builder,
      &self.source[cursor..],
      &mut generated,
      &mut original,
    );

    builder.into_sourcemap()
  }
}

impl Display for MagicString<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut cursor = 0;
    for edit in &self.edits {
      f.write_str(&self.source[cursor..edit.start])?;
      f.write_str(&edit.content)?;
      cursor = edit.end;
    }
    f.write_str(&self.source[cursor..])
  }
}
