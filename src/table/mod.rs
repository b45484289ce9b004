//! Delimited-text codec: a zero-copy row cursor over an owned text buffer
//! and a growable buffer writer.
//!
//! The on-disk format is one record per line with comma-separated fields.
//! Numeric fields are written bare; string fields are always quoted. The
//! reader additionally accepts doubled-quote escaping inside quoted
//! fields, which the writer never produces.

mod reader;
mod row;
mod writer;

pub use reader::{Reader, Rows};
pub use row::{Field, FromField, Row};
pub use writer::{RowWriter, WriteField, Writer};
