//! Low-level PDF generator for Rust
//!
//! Builds an in-memory graph of PDF objects (dictionaries, arrays, streams,
//! strings and content stream operators) and serializes it into a complete
//! PDF file, cross-reference table and trailer included.
//!
//! ```
//! use pdf_assembler::pdf::{Array, Dictionary, Stream};
//! use pdf_assembler::{PDFDocument, PDFError};
//!
//! # fn main() -> Result<(), PDFError> {
//! let mut document = PDFDocument::new();
//!
//! let mut draw = Stream::new();
//! draw.rectangle(2.0, 2.0, 5.0, 6.0);
//! draw.fill(false);
//! let contents = document.add_object(draw);
//!
//! let mut page = Dictionary::with_type("Page");
//! page.set_reference("Parent", document.pages());
//! page.set_reference("Contents", contents);
//! page.set("MediaBox", Array::from(vec![0, 0, 10, 10]));
//! document.add_page(page)?;
//!
//! let mut output = Vec::new();
//! document.write(&mut output)?;
//! assert!(output.starts_with(b"%PDF-1.7\n"));
//! assert!(output.ends_with(b"%%EOF\n"));
//! # Ok(())
//! # }
//! ```

use std::fmt;

mod document;
mod error;
pub mod pdf;
mod writer;

pub use document::PDFDocument;
pub use error::{PDFError, PDFResult};
pub use writer::PDFWriter;

/// PDF version declared in the file header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PDFVersion {
    /// PDF 1.4 (Acrobat 5)
    V1_4,
    /// PDF 1.5 (Acrobat 6)
    V1_5,
    /// PDF 1.6 (Acrobat 7)
    V1_6,
    /// PDF 1.7 (ISO 32000-1)
    #[default]
    V1_7,
    /// PDF 2.0 (ISO 32000-2)
    V2_0,
}

impl fmt::Display for PDFVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PDFVersion::V1_4 => write!(f, "1.4"),
            PDFVersion::V1_5 => write!(f, "1.5"),
            PDFVersion::V1_6 => write!(f, "1.6"),
            PDFVersion::V1_7 => write!(f, "1.7"),
            PDFVersion::V2_0 => write!(f, "2.0"),
        }
    }
}
