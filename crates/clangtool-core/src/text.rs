//! Line bookkeeping for byte buffers.
//!
//! Front-end positions are 1-based rows and 1-based *byte* columns. The
//! [`LineIndex`] answers whether such a position exists in a given snapshot so
//! callers can turn out-of-range requests into empty results before handing
//! them to the front end.

pub use text_size::TextSize;
use text_size::TextRange;

/// A 0-based line / byte-column pair.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

fn size(offset: usize) -> TextSize {
    TextSize::from(offset as u32)
}

/// The byte range of every line in one text snapshot, terminators excluded.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. A trailing terminator
/// starts one more, empty, line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineIndex {
    lines: Vec<TextRange>,
    text_len: TextSize,
}

impl LineIndex {
    pub fn new(text: &[u8]) -> Self {
        let mut lines = Vec::new();
        let mut line_start = 0usize;
        let mut bytes = text.iter().enumerate();

        while let Some((i, &byte)) = bytes.next() {
            let terminator = match byte {
                b'\n' => 1,
                b'\r' if text.get(i + 1) == Some(&b'\n') => {
                    bytes.next();
                    2
                }
                b'\r' => 1,
                _ => continue,
            };
            lines.push(TextRange::new(size(line_start), size(i)));
            line_start = i + terminator;
        }
        lines.push(TextRange::new(size(line_start), size(text.len())));

        Self {
            lines,
            text_len: size(text.len()),
        }
    }

    pub fn text_len(&self) -> TextSize {
        self.text_len
    }

    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    pub fn line_start(&self, line: u32) -> Option<TextSize> {
        self.lines.get(line as usize).map(|range| range.start())
    }

    pub fn line_end(&self, line: u32) -> Option<TextSize> {
        self.lines.get(line as usize).map(|range| range.end())
    }

    /// Length in bytes of a 0-based line, excluding its terminator.
    pub fn line_len(&self, line: u32) -> Option<u32> {
        self.lines
            .get(line as usize)
            .map(|range| u32::from(range.len()))
    }

    /// 0-based position of a byte offset. Offsets inside a terminator clamp to
    /// the end of their line; offsets past the text clamp to its end.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.text_len);
        // The first line always starts at 0, so at least one range qualifies.
        let line = self
            .lines
            .partition_point(|range| range.start() <= offset)
            .saturating_sub(1);
        let range = self.lines[line];
        LineCol {
            line: line as u32,
            col: u32::from(offset.min(range.end()) - range.start()),
        }
    }

    /// Byte offset of a 0-based position, if the line has that column.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let range = self.lines.get(line_col.line as usize)?;
        let offset = range.start() + TextSize::from(line_col.col);
        (offset <= range.end()).then_some(offset)
    }

    /// Whether the 1-based `(row, col)` names a position in this snapshot.
    ///
    /// The column may point one past the last byte of the line (the cursor
    /// position at end of line).
    pub fn contains(&self, row: u32, col: u32) -> bool {
        if row == 0 || col == 0 {
            return false;
        }
        self.line_len(row - 1).is_some_and(|len| col - 1 <= len)
    }
}
