//! Growable output buffer with typed comma-separated row formatting.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Accumulates formatted records in memory before flushing them at once.
///
/// Buffer capacity grows to the next power of two so repeated row appends
/// amortize reallocation; the logical length only ever covers bytes
/// actually written.
#[derive(Debug, Default, Clone)]
pub struct Writer {
    buf: String,
}

impl Writer {
    pub fn new() -> Writer {
        Writer { buf: String::new() }
    }

    /// Pre-allocates at least `n` bytes of capacity, rounded up to the
    /// next power of two (minimum 2).
    ///
    /// Purely an optimization hint; correctness never depends on it.
    pub fn reserve(&mut self, n: usize) {
        let target = next_power_of_two(n);
        if target > self.buf.capacity() {
            self.buf.reserve_exact(target - self.buf.len());
        }
    }

    /// Starts a new comma-separated record.
    pub fn row(&mut self) -> RowWriter<'_> {
        RowWriter { writer: self, written: false }
    }

    /// Logical length in bytes of the formatted output.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Current physical capacity of the buffer.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The formatted output so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consumes the writer, returning the formatted output.
    pub fn into_string(self) -> String {
        self.buf
    }

    /// Writes the whole buffer to a file in one shot.
    ///
    /// # Errors
    ///
    /// Returns [`CandlemillError::Io`](crate::CandlemillError::Io) when
    /// the file cannot be created or written; the underlying OS error is
    /// preserved for diagnostics.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, &self.buf)?;
        Ok(())
    }

    /// Ensures room for `additional` bytes using the power-of-two policy.
    fn grow(&mut self, additional: usize) {
        let needed = self.buf.len() + additional;
        if needed > self.buf.capacity() {
            let target = next_power_of_two(needed);
            self.buf.reserve_exact(target - self.buf.len());
        }
    }
}

fn next_power_of_two(n: usize) -> usize {
    if n < 2 { 2 } else { n.next_power_of_two() }
}

/// Builder for one record: append fields in order, then terminate the
/// line with [`end`](RowWriter::end).
#[derive(Debug)]
pub struct RowWriter<'w> {
    writer: &'w mut Writer,
    written: bool,
}

impl RowWriter<'_> {
    /// Appends one field, preceded by a comma for every field but the
    /// first.
    pub fn field<T: WriteField>(mut self, value: T) -> Self {
        if self.written {
            self.writer.grow(1);
            self.writer.buf.push(',');
        }
        self.written = true;
        value.write_field(self.writer);
        self
    }

    /// Terminates the record with a single newline.
    pub fn end(self) {
        self.writer.grow(1);
        self.writer.buf.push('\n');
    }
}

/// Formatting of one typed value into a writer's buffer.
///
/// Numeric types produce their shortest round-trippable representation
/// and reserve a worst-case width up front (i32 ≤ 11, u32 ≤ 10, i64 ≤ 19,
/// u64 ≤ 18, f32 ≤ 16, f64 ≤ 32 bytes; the buffer still grows past the
/// reservation if a value needs more). Strings are wrapped in literal
/// quotes with **no escaping**: a value containing a quote or newline
/// produces output the reader cannot parse back.
pub trait WriteField {
    fn write_field(&self, writer: &mut Writer);
}

macro_rules! numeric_write_field {
    ($($t:ty => $width:expr),* $(,)?) => {$(
        impl WriteField for $t {
            fn write_field(&self, writer: &mut Writer) {
                writer.grow($width);
                // Formatting into a String cannot fail.
                let _ = write!(writer.buf, "{self}");
            }
        }
    )*};
}

numeric_write_field! {
    i32 => 11,
    u32 => 10,
    i64 => 19,
    u64 => 18,
    f32 => 16,
    f64 => 32,
}

impl WriteField for &str {
    fn write_field(&self, writer: &mut Writer) {
        writer.grow(self.len() + 2);
        writer.buf.push('"');
        writer.buf.push_str(self);
        writer.buf.push('"');
    }
}

impl WriteField for &String {
    fn write_field(&self, writer: &mut Writer) {
        self.as_str().write_field(writer);
    }
}
