//! PDF string objects

use byteorder::{BigEndian, ByteOrder};

use super::PDFObjectCommon;

/// Byte order mark of UTF-16BE text strings
const BOM_UTF16_BE: [u8; 2] = [0xFE, 0xFF];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Text(String),
    Bytes(Vec<u8>),
}

/// PDF string object
///
/// ASCII text is written as a literal `(text)`. Anything else falls back to a
/// hexadecimal `<feff...>` string holding the UTF-16BE encoding, so every
/// Rust string can be represented.
///
/// Literal strings are written without escaping. Text containing a
/// backslash or unbalanced parentheses must be escaped by the caller
/// (`\(`, `\)`, `\\`), otherwise the literal is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PDFString {
    content: Content,
}

impl PDFString {
    /// Create new text string
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content: Content::Text(text.into()),
        }
    }

    /// Create new string from bytes, written literally
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            content: Content::Bytes(bytes.into()),
        }
    }

    /// Whether the string renders as a literal `( )` string
    pub fn is_literal(&self) -> bool {
        match &self.content {
            Content::Text(text) => text.is_ascii(),
            Content::Bytes(_) => true,
        }
    }

    fn encode_utf16(text: &str) -> Vec<u8> {
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut encoded = vec![0u8; BOM_UTF16_BE.len() + units.len() * 2];
        encoded[..BOM_UTF16_BE.len()].copy_from_slice(&BOM_UTF16_BE);
        BigEndian::write_u16_into(&units, &mut encoded[BOM_UTF16_BE.len()..]);
        encoded
    }
}

impl PDFObjectCommon for PDFString {
    fn write_to(&self, output: &mut Vec<u8>) {
        match &self.content {
            Content::Text(text) if text.is_ascii() => {
                output.push(b'(');
                output.extend_from_slice(text.as_bytes());
                output.push(b')');
            }
            Content::Text(text) => {
                output.push(b'<');
                output.extend_from_slice(hex::encode(Self::encode_utf16(text)).as_bytes());
                output.push(b'>');
            }
            Content::Bytes(bytes) => {
                output.push(b'(');
                output.extend_from_slice(bytes);
                output.push(b')');
            }
        }
    }
}

impl From<&str> for PDFString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for PDFString {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
