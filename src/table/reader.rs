//! Owned text buffer exposing lazily scanned row ranges.

use std::fs;
use std::path::Path;

use super::row::Row;
use crate::error::Result;

/// Owns the full text of one delimited-text source.
///
/// Every row handed out borrows the reader's buffer, so the reader must
/// outlive them; the borrow checker enforces this.
#[derive(Debug, Default, Clone)]
pub struct Reader {
    text: String,
}

impl Reader {
    /// Reads an entire file into memory.
    ///
    /// # Errors
    ///
    /// Returns [`CandlemillError::Io`](crate::CandlemillError::Io) when
    /// the file cannot be opened or read; the underlying OS error is
    /// preserved for diagnostics.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Reader> {
        let text = fs::read_to_string(path)?;
        Ok(Reader { text })
    }

    /// Wraps an in-memory string.
    pub fn from_text(text: impl Into<String>) -> Reader {
        Reader { text: text.into() }
    }

    /// Size of the underlying text in bytes.
    pub fn text_size(&self) -> usize {
        self.text.len()
    }

    /// All rows, starting at the first non-whitespace position.
    ///
    /// The returned cursor is finite and consumed by iteration; call again
    /// for a fresh pass over the buffer.
    pub fn rows(&self) -> Rows<'_> {
        Rows::new(&self.text)
    }

    /// All rows except the first record; used to discard a header line.
    ///
    /// An empty buffer yields no rows.
    pub fn rows_after_header(&self) -> Rows<'_> {
        let mut rows = Rows::new(&self.text);
        rows.skip_record();
        rows
    }
}

/// Lending cursor over the rows of a buffer.
///
/// Not a std `Iterator`: each yielded [`Row`] borrows the cursor, so rows
/// are consumed one at a time with a `while let` loop:
///
/// ```
/// use candlemill::table::Reader;
///
/// let reader = Reader::from_text("1,2\n3,4\n");
/// let mut rows = reader.rows();
/// while let Some(row) = rows.next_row() {
///     let left: u32 = row.field().unwrap();
///     let right: u32 = row.last_field().unwrap();
///     assert!(left < right);
/// }
/// ```
#[derive(Debug)]
pub struct Rows<'a> {
    row: Row<'a>,
    started: bool,
}

impl<'a> Rows<'a> {
    fn new(text: &'a str) -> Rows<'a> {
        let mut row = Row::new(text);
        row.skip_whitespace();
        Rows { row, started: false }
    }

    fn skip_record(&mut self) {
        if !self.row.at_end() {
            self.row.skip_line();
            self.row.skip_whitespace();
        }
    }

    /// Advances to the next record and returns a cursor over its fields.
    ///
    /// Whatever the previous row left unconsumed (including its newline)
    /// is skipped first.
    pub fn next_row(&mut self) -> Option<&mut Row<'a>> {
        if self.started {
            self.skip_record();
        }
        self.started = true;
        if self.row.at_end() { None } else { Some(&mut self.row) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_all_rows() {
        let reader = Reader::from_text("1,2\n3,4\n5,6\n");
        let mut rows = reader.rows();
        let mut seen = Vec::new();
        while let Some(row) = rows.next_row() {
            let first: u32 = row.field().unwrap();
            let second: u32 = row.last_field().unwrap();
            seen.push((first, second));
        }
        assert_eq!(seen, vec![(1, 2), (3, 4), (5, 6)]);
    }

    #[test]
    fn skips_exactly_one_header_record() {
        let reader = Reader::from_text("alpha,beta\n1,2\n");
        let mut rows = reader.rows_after_header();
        let row = rows.next_row().unwrap();
        assert_eq!(row.field::<u32>(), Some(1));
        assert_eq!(row.last_field::<u32>(), Some(2));
        assert!(rows.next_row().is_none());
    }

    #[test]
    fn empty_buffer_has_no_rows() {
        let reader = Reader::from_text("");
        assert!(reader.rows().next_row().is_none());
        assert!(reader.rows_after_header().next_row().is_none());
    }

    #[test]
    fn leading_whitespace_is_ignored() {
        let reader = Reader::from_text("  \t1,2\n");
        let mut rows = reader.rows();
        let row = rows.next_row().unwrap();
        assert_eq!(row.field::<u32>(), Some(1));
        assert_eq!(row.last_field::<u32>(), Some(2));
    }

    #[test]
    fn unparsed_rows_are_skipped_whole() {
        let reader = Reader::from_text("1,2\n3,4\n");
        let mut rows = reader.rows();
        assert!(rows.next_row().is_some());
        let row = rows.next_row().unwrap();
        assert_eq!(row.field::<u32>(), Some(3));
        assert_eq!(row.last_field::<u32>(), Some(4));
        assert!(rows.next_row().is_none());
    }

    #[test]
    fn rows_are_reobtainable() {
        let reader = Reader::from_text("9,8\n");
        for _ in 0..2 {
            let mut rows = reader.rows();
            let row = rows.next_row().unwrap();
            assert_eq!(row.field::<u32>(), Some(9));
            assert_eq!(row.last_field::<u32>(), Some(8));
        }
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = Reader::from_file("/nonexistent/candlemill-reader").unwrap_err();
        assert!(matches!(err, crate::CandlemillError::Io(_)));
    }
}
