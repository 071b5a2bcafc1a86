use std::ops::Range;

use codespan_reporting::files;

/// The byte offset each line of a script starts at, recorded
/// by the scanner as it passes newlines
#[derive(Default, Clone, Debug)]
pub struct LineOffsets {
  /// Start offset of every line, the first always zero
  starts: Vec<usize>,

  /// Length of the script in bytes
  len: usize,
}

impl LineOffsets {
  pub fn new(starts: Vec<usize>, len: usize) -> Self {
    Self { starts, len }
  }

  /// The number of lines in the script
  ///
  /// # Examples
  /// ```
  /// use lox_interp::source::LineOffsets;
  ///
  /// let offsets = LineOffsets::new(vec![0, 10], 20);
  /// assert_eq!(offsets.lines(), 2);
  /// ```
  pub fn lines(&self) -> usize {
    self.starts.len()
  }

  /// The zero based line holding the byte at `offset`. The
  /// script's length itself is the end of the last line
  ///
  /// # Examples
  /// ```
  /// use lox_interp::source::LineOffsets;
  ///
  /// let offsets = LineOffsets::new(vec![0, 10], 20);
  /// assert_eq!(offsets.line_index(5), Some(0));
  /// assert_eq!(offsets.line_index(10), Some(1));
  /// assert_eq!(offsets.line_index(20), Some(1));
  /// assert_eq!(offsets.line_index(25), None);
  /// ```
  pub fn line_index(&self, offset: usize) -> Option<usize> {
    if offset > self.len {
      return None;
    }

    self
      .starts
      .partition_point(|start| *start <= offset)
      .checked_sub(1)
  }

  /// The byte range of a zero based line, newline included
  pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
    let start = *self.starts.get(line)?;
    let end = self.starts.get(line + 1).copied().unwrap_or(self.len);

    Some(start..end)
  }
}

/// A single script along with its name and line information,
/// used to render diagnostics
pub struct SourceFile<'a> {
  /// The name of this file
  name: String,

  /// The full source of this file
  source: &'a str,

  /// The line offsets for this file
  line_offsets: LineOffsets,
}

impl<'a> SourceFile<'a> {
  pub fn new(name: impl Into<String>, source: &'a str, line_offsets: LineOffsets) -> Self {
    Self {
      name: name.into(),
      source,
      line_offsets,
    }
  }
}

impl<'f, 'a: 'f> files::Files<'f> for SourceFile<'a> {
  type FileId = ();
  type Name = &'f str;
  type Source = &'f str;

  fn name(&'f self, _id: Self::FileId) -> Result<Self::Name, files::Error> {
    Ok(&self.name)
  }

  fn source(&'f self, _id: Self::FileId) -> Result<Self::Source, files::Error> {
    Ok(self.source)
  }

  fn line_index(&'f self, _id: Self::FileId, byte_index: usize) -> Result<usize, files::Error> {
    self
      .line_offsets
      .line_index(byte_index)
      .ok_or(files::Error::IndexTooLarge {
        given: byte_index,
        max: self.source.len(),
      })
  }

  fn line_range(&'f self, _id: Self::FileId, line_index: usize) -> Result<Range<usize>, files::Error> {
    self
      .line_offsets
      .line_range(line_index)
      .ok_or(files::Error::LineTooLarge {
        given: line_index,
        max: self.line_offsets.lines().saturating_sub(1),
      })
  }
}

#[cfg(test)]
mod test {
  use super::*;

  mod line_offsets {
    use super::*;

    #[test]
    fn line_index() {
      let offsets = LineOffsets::new(vec![0, 4, 5], 9);

      assert_eq!(offsets.line_index(0), Some(0));
      assert_eq!(offsets.line_index(3), Some(0));
      assert_eq!(offsets.line_index(4), Some(1));
      assert_eq!(offsets.line_index(8), Some(2));
      assert_eq!(offsets.line_index(9), Some(2));
      assert_eq!(offsets.line_index(10), None);
    }

    #[test]
    fn line_range() {
      let offsets = LineOffsets::new(vec![0, 4, 5], 9);

      assert_eq!(offsets.line_range(0), Some(0..4));
      assert_eq!(offsets.line_range(1), Some(4..5));
      assert_eq!(offsets.line_range(2), Some(5..9));
      assert_eq!(offsets.line_range(3), None);
    }

    #[test]
    fn empty_script() {
      let offsets = LineOffsets::new(vec![0], 0);

      assert_eq!(offsets.lines(), 1);
      assert_eq!(offsets.line_index(0), Some(0));
      assert_eq!(offsets.line_range(0), Some(0..0));
    }
  }

  mod source_file {
    use super::*;
    use codespan_reporting::files::Files;

    #[test]
    fn files() {
      let source = "1 +\n2";
      let file = SourceFile::new("test.lox", source, LineOffsets::new(vec![0, 4], 5));

      assert_eq!(file.name(()).ok(), Some("test.lox"));
      assert_eq!(file.source(()).ok(), Some(source));
      assert_eq!(file.line_index((), 4).ok(), Some(1));
      assert_eq!(file.line_range((), 0).ok(), Some(0..4));
      assert!(file.line_range((), 2).is_err());
    }
  }
}
