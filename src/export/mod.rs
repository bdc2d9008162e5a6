//! Order exports
//!
//! Exports are UTF-8 CSV documents prefixed with a byte-order mark, one row
//! per line, `\n` between rows and nothing after the last one. Only product
//! names are quoted, and only when they need it.

use std::borrow::Cow;

pub mod current;
pub mod sink;
pub mod summary;

pub use current::current_order;
pub use sink::{DirectorySink, ExportSink, MemorySink, SinkError, deliver_or_log};
pub use summary::order_summary;

/// UTF-8 byte-order mark, so spreadsheets detect the encoding.
pub const BOM: char = '\u{feff}';

/// A rendered export and the name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Suggested file name.
    pub filename: String,

    /// Document bytes, BOM included.
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    /// Join `rows` into a BOM-prefixed document.
    pub(crate) fn from_rows(filename: String, rows: &[String]) -> Self {
        let mut text = String::new();
        text.push(BOM);
        text.push_str(&rows.join("\n"));

        Self {
            filename,
            bytes: text.into_bytes(),
        }
    }

    /// Document text without the byte-order mark.
    pub fn text(&self) -> Cow<'_, str> {
        let text = String::from_utf8_lossy(&self.bytes);

        match text {
            Cow::Borrowed(text) => Cow::Borrowed(text.trim_start_matches(BOM)),
            Cow::Owned(text) => Cow::Owned(text.trim_start_matches(BOM).to_string()),
        }
    }
}

/// Quote a name field if it contains a comma, a double quote or a line break,
/// doubling any embedded quotes.
pub fn escape_name(name: &str) -> Cow<'_, str> {
    if name.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", name.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(name)
    }
}
