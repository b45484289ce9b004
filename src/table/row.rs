//! Zero-copy scanning of one record's fields out of a shared text buffer.

/// Cursor over one record of a delimited-text buffer.
///
/// A `Row` is a plain byte offset into the buffer it was created from; it
/// never copies the underlying text. Fields are pulled in order with
/// [`field`](Row::field) and the record is closed with
/// [`last_field`](Row::last_field), which also verifies that no extra
/// fields follow. Once any call returns `None` the cursor position is
/// unspecified and the whole read must be abandoned.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    buf: &'a str,
    pos: usize,
}

impl<'a> Row<'a> {
    pub(crate) fn new(buf: &'a str) -> Row<'a> {
        Row { buf, pos: 0 }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn peek(&self) -> Option<u8> {
        self.buf.as_bytes().get(self.pos).copied()
    }

    /// Consumes the remainder of the current line including its newline.
    pub(crate) fn skip_line(&mut self) {
        let bytes = self.buf.as_bytes();
        while let Some(&byte) = bytes.get(self.pos) {
            self.pos += 1;
            if byte == b'\n' {
                break;
            }
        }
    }

    /// Skips spaces, tabs and carriage returns before a field.
    pub(crate) fn skip_whitespace(&mut self) {
        let bytes = self.buf.as_bytes();
        while let Some(b' ' | b'\t' | b'\r') = bytes.get(self.pos) {
            self.pos += 1;
        }
    }

    /// Parses one field followed by its separating comma.
    pub fn field<T: FromField>(&mut self) -> Option<T> {
        let value = self.value()?;
        self.skip_whitespace();
        if self.peek() != Some(b',') {
            return None;
        }
        self.pos += 1;
        self.skip_whitespace();
        Some(value)
    }

    /// Parses the final field and requires the record to end after it.
    ///
    /// The terminating newline is not consumed; advancing past it is the
    /// row cursor's job. Anything but a newline or the end of the buffer
    /// after the field is a parse failure.
    pub fn last_field<T: FromField>(&mut self) -> Option<T> {
        let value = self.value()?;
        self.skip_whitespace();
        match self.peek() {
            None | Some(b'\n') => Some(value),
            Some(_) => None,
        }
    }

    fn value<T: FromField>(&mut self) -> Option<T> {
        if self.peek() == Some(b'"') {
            let (text, escaped) = self.scan_quoted()?;
            T::from_field(Field::Quoted { text, escaped })
        } else {
            T::from_field(Field::Bare(self.scan_bare()?))
        }
    }

    /// Scans a quoted field, returning the span between the quotes.
    ///
    /// A doubled quote is an escape and does not terminate the field. A
    /// raw newline or the end of the buffer before the closing quote is a
    /// failure.
    fn scan_quoted(&mut self) -> Option<(&'a str, bool)> {
        let bytes = self.buf.as_bytes();
        let start = self.pos + 1;
        let mut pos = start;
        let mut escaped = false;
        loop {
            match bytes.get(pos) {
                None | Some(b'\n') => return None,
                Some(b'"') => {
                    if bytes.get(pos + 1) == Some(&b'"') {
                        escaped = true;
                        pos += 2;
                        continue;
                    }
                    self.pos = pos + 1;
                    return Some((&self.buf[start..pos], escaped));
                }
                Some(_) => pos += 1,
            }
        }
    }

    /// Scans a bare field running to the next terminator.
    ///
    /// Terminators are tab, carriage return, newline, comma and the end of
    /// the buffer; an empty field is a failure.
    fn scan_bare(&mut self) -> Option<&'a str> {
        let bytes = self.buf.as_bytes();
        let start = self.pos;
        let mut pos = start;
        while let Some(&byte) = bytes.get(pos) {
            match byte {
                b'\t' | b'\r' | b'\n' | b',' => break,
                _ => pos += 1,
            }
        }
        if pos == start {
            return None;
        }
        self.pos = pos;
        Some(&self.buf[start..pos])
    }
}

/// One scanned field, before typed conversion.
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    /// An unquoted run of characters.
    Bare(&'a str),
    /// The content between quotes; `escaped` marks embedded `""` pairs.
    Quoted { text: &'a str, escaped: bool },
}

impl<'a> Field<'a> {
    /// The scanned span exactly as it appears in the buffer.
    fn raw(self) -> &'a str {
        match self {
            Field::Bare(text) | Field::Quoted { text, .. } => text,
        }
    }
}

/// Conversion of one scanned field into exactly one target type.
///
/// Implemented for the integer and float widths the format supports plus
/// `String`. Numeric conversions are strict and locale-independent: the
/// whole span must be consumed and a leading `+` is rejected.
pub trait FromField: Sized {
    fn from_field(field: Field<'_>) -> Option<Self>;
}

macro_rules! numeric_from_field {
    ($($t:ty),*) => {$(
        impl FromField for $t {
            fn from_field(field: Field<'_>) -> Option<Self> {
                let text = field.raw();
                if text.starts_with('+') {
                    return None;
                }
                text.parse().ok()
            }
        }
    )*};
}

numeric_from_field!(i32, u32, i64, u64, f32, f64);

impl FromField for String {
    fn from_field(field: Field<'_>) -> Option<Self> {
        match field {
            Field::Bare(text) | Field::Quoted { text, escaped: false } => Some(text.to_owned()),
            Field::Quoted { text, escaped: true } => Some(text.replace("\"\"", "\"")),
        }
    }
}
