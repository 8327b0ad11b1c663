//! PDF object model: values, containers and the cross-reference table

mod array;
mod dict;
mod object;
mod stream;
mod string;
mod xref;

pub use array::Array;
pub use dict::Dictionary;
pub use object::{format_number, EntryKind, ObjectRef, PDFObject, Value, SENTINEL_GENERATION};
pub use stream::Stream;
pub use string::PDFString;
pub use xref::{XRefEntry, XRefTable};

/// Common rendering interface for every PDF value
pub trait PDFObjectCommon {
    /// Append the PDF syntax of this value to `output`
    fn write_to(&self, output: &mut Vec<u8>);

    /// Render this value to a fresh byte buffer
    fn data(&self) -> Vec<u8> {
        let mut output = Vec::new();
        self.write_to(&mut output);
        output
    }
}
