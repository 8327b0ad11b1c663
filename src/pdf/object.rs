//! PDF value types and registered indirect objects

use std::fmt;

use log::trace;

use crate::error::{PDFError, PDFResult};
use super::{Array, Dictionary, PDFObjectCommon, PDFString, Stream};

/// Generation number of the head of the free-object list
pub const SENTINEL_GENERATION: u16 = 65535;

/// Reference to a registered indirect object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number
    pub number: usize,
    /// Generation number
    pub generation: u16,
}

impl ObjectRef {
    /// Create new object reference
    pub fn new(number: usize, generation: u16) -> Self {
        Self { number, generation }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

/// PDF value types
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real value, integral values render without a fraction
    Real(f64),
    /// Name object, stored without the leading slash
    Name(String),
    /// Already serialized token, written as is
    Text(String),
    /// Opaque byte payload, written as is
    Raw(Vec<u8>),
    /// Indirect reference
    Reference(ObjectRef),
    /// String object
    String(PDFString),
    /// Array object
    Array(Array),
    /// Dictionary object
    Dictionary(Dictionary),
    /// Stream object
    Stream(Stream),
}

impl Value {
    /// Name of the variant, used in error reports
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Name(_) => "name",
            Value::Text(_) => "text",
            Value::Raw(_) => "raw",
            Value::Reference(_) => "reference",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Dictionary(_) => "dictionary",
            Value::Stream(_) => "stream",
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Real(n) if n.fract() == 0.0 => Some(*n as i64),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Value::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Value::Reference(reference) => Some(*reference),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_dictionary_mut(&mut self) -> Option<&mut Dictionary> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_stream(&self) -> Option<&Stream> {
        match self {
            Value::Stream(stream) => Some(stream),
            _ => None,
        }
    }

    pub fn as_stream_mut(&mut self) -> Option<&mut Stream> {
        match self {
            Value::Stream(stream) => Some(stream),
            _ => None,
        }
    }
}

impl PDFObjectCommon for Value {
    fn write_to(&self, output: &mut Vec<u8>) {
        match self {
            Value::Null => output.extend_from_slice(b"null"),
            Value::Boolean(true) => output.extend_from_slice(b"true"),
            Value::Boolean(false) => output.extend_from_slice(b"false"),
            Value::Integer(n) => output.extend_from_slice(n.to_string().as_bytes()),
            Value::Real(n) => output.extend_from_slice(format_number(*n).as_bytes()),
            Value::Name(name) => {
                output.push(b'/');
                output.extend_from_slice(name.as_bytes());
            }
            Value::Text(text) => output.extend_from_slice(text.as_bytes()),
            Value::Raw(bytes) => output.extend_from_slice(bytes),
            Value::Reference(reference) => {
                output.extend_from_slice(reference.to_string().as_bytes())
            }
            Value::String(string) => string.write_to(output),
            Value::Array(array) => array.write_to(output),
            Value::Dictionary(dict) => dict.write_to(output),
            Value::Stream(stream) => stream.write_to(output),
        }
    }
}

/// Format a number as a PDF numeric token
///
/// Values without a fractional part are written as integers, so `12.0`
/// becomes `12`. Finite values never use an exponent. Non-finite values are
/// passed through as `NaN`, `inf` or `-inf`, which are not PDF numbers:
/// callers must not hand them in.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Real(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Raw(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Raw(value.to_vec())
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::Reference(value)
    }
}

impl From<PDFString> for Value {
    fn from(value: PDFString) -> Self {
        Value::String(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Dictionary> for Value {
    fn from(value: Dictionary) -> Self {
        Value::Dictionary(value)
    }
}

impl From<Stream> for Value {
    fn from(value: Stream) -> Self {
        Value::Stream(value)
    }
}

/// Cross-reference entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Object in use, written to the body
    InUse,
    /// Free object, only listed in the cross-reference table
    Free,
}

impl EntryKind {
    /// Flag character used in cross-reference entries
    pub fn as_char(self) -> char {
        match self {
            EntryKind::InUse => 'n',
            EntryKind::Free => 'f',
        }
    }
}

/// Object registered in a document's object table
#[derive(Debug, Clone)]
pub struct PDFObject {
    /// Object number
    pub number: usize,
    /// Generation number
    pub generation: u16,
    /// In-use or free
    pub kind: EntryKind,
    /// Byte offset of the object block, set while writing
    pub offset: usize,
    value: Option<Value>,
}

impl PDFObject {
    /// Create new in-use object
    pub fn new(number: usize, value: Value) -> Self {
        Self {
            number,
            generation: 0,
            kind: EntryKind::InUse,
            offset: 0,
            value: Some(value),
        }
    }

    /// Create the head of the free-object list, object 0
    pub fn sentinel() -> Self {
        Self {
            number: 0,
            generation: SENTINEL_GENERATION,
            kind: EntryKind::Free,
            offset: 0,
            value: None,
        }
    }

    /// Reference pointing at this object
    pub fn reference(&self) -> ObjectRef {
        ObjectRef::new(self.number, self.generation)
    }

    pub fn is_free(&self) -> bool {
        self.kind == EntryKind::Free
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut Value> {
        self.value.as_mut()
    }

    /// Render the object body
    pub fn data(&self) -> PDFResult<Vec<u8>> {
        self.value
            .as_ref()
            .map(PDFObjectCommon::data)
            .ok_or(PDFError::EmptyObject(self.number))
    }

    /// Render the complete `N G obj ... endobj` block
    pub fn indirect(&self) -> PDFResult<Vec<u8>> {
        let data = self.data()?;
        trace!("Rendering object {} ({} bytes)", self.number, data.len());

        let mut output = format!("{} {} obj\n", self.number, self.generation).into_bytes();
        output.extend_from_slice(&data);
        output.extend_from_slice(b"\nendobj");
        Ok(output)
    }
}
