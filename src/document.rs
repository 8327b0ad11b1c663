//! PDF document assembler
//!
//! The document owns the object table. Object numbers are indexes into that
//! table, so registering never reorders anything and objects are only ever
//! flagged free, never removed.

use std::io::Write;

use log::{debug, trace};

use crate::error::{PDFError, PDFResult};
use crate::pdf::{
    Array, Dictionary, EntryKind, ObjectRef, PDFObject, PDFObjectCommon, Value, XRefTable,
};
use crate::writer::PDFWriter;
use crate::PDFVersion;

/// In-memory PDF document
#[derive(Debug, Clone)]
pub struct PDFDocument {
    objects: Vec<PDFObject>,
    pages: ObjectRef,
    info: ObjectRef,
    catalog: ObjectRef,
    version: PDFVersion,
    identifier: bool,
    xref_position: Option<usize>,
}

impl Default for PDFDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PDFDocument {
    /// Create new document with its page tree, info and catalog objects
    pub fn new() -> Self {
        let mut document = Self {
            objects: vec![PDFObject::sentinel()],
            pages: ObjectRef::new(0, 0),
            info: ObjectRef::new(0, 0),
            catalog: ObjectRef::new(0, 0),
            version: PDFVersion::default(),
            identifier: false,
            xref_position: None,
        };

        let mut pages = Dictionary::with_type("Pages");
        pages.set("Kids", Array::new());
        pages.set("Count", 0);
        document.pages = document.add_object(pages);

        document.info = document.add_object(Dictionary::new());

        let mut catalog = Dictionary::with_type("Catalog");
        catalog.set_reference("Pages", document.pages);
        document.catalog = document.add_object(catalog);

        document
    }

    /// Create new document declaring the given version in its header
    pub fn with_version(version: PDFVersion) -> Self {
        let mut document = Self::new();
        document.version = version;
        document
    }

    pub fn version(&self) -> PDFVersion {
        self.version
    }

    pub fn set_version(&mut self, version: PDFVersion) {
        self.version = version;
    }

    /// Add an `ID` entry to the trailer, derived from the written objects
    pub fn set_identifier(&mut self, identifier: bool) {
        self.identifier = identifier;
    }

    /// Register a top-level object and return its reference
    pub fn add_object(&mut self, value: impl Into<Value>) -> ObjectRef {
        let number = self.objects.len();
        let object = PDFObject::new(number, value.into());
        trace!(
            "Registered object {} ({})",
            number,
            object.value().map_or("empty", Value::type_name)
        );
        let reference = object.reference();
        self.objects.push(object);
        reference
    }

    /// Register a page and append it to the page tree
    pub fn add_page(&mut self, page: Dictionary) -> PDFResult<ObjectRef> {
        let reference = ObjectRef::new(self.objects.len(), 0);

        let pages = self.pages_mut()?;
        pages
            .get_mut("Kids")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| PDFError::missing_entry("Kids"))?
            .push(reference);
        let count = pages.get_integer("Count").unwrap_or(0);
        pages.set("Count", count + 1);

        let registered = self.add_object(page);
        debug!("Added page {} as object {}", count + 1, registered.number);
        Ok(registered)
    }

    /// Flag a registered object as free
    ///
    /// Free objects keep their slot and their cross-reference entry but are
    /// not written to the body.
    pub fn mark_free(&mut self, reference: ObjectRef) -> PDFResult<()> {
        let object = self
            .objects
            .get_mut(reference.number)
            .ok_or(PDFError::ObjectNotFound(reference.number))?;
        object.kind = EntryKind::Free;
        object.offset = 0;
        debug!("Marked object {} as free", reference.number);
        Ok(())
    }

    pub fn get(&self, reference: ObjectRef) -> Option<&PDFObject> {
        self.objects.get(reference.number)
    }

    pub fn get_mut(&mut self, reference: ObjectRef) -> Option<&mut PDFObject> {
        self.objects.get_mut(reference.number)
    }

    /// Get the dictionary stored in a registered object
    pub fn dictionary_mut(&mut self, reference: ObjectRef) -> PDFResult<&mut Dictionary> {
        let object = self
            .objects
            .get_mut(reference.number)
            .ok_or(PDFError::ObjectNotFound(reference.number))?;
        match object.value_mut() {
            Some(Value::Dictionary(dict)) => Ok(dict),
            Some(other) => Err(PDFError::invalid_type("dictionary", other.type_name())),
            None => Err(PDFError::EmptyObject(reference.number)),
        }
    }

    /// Reference to the page tree root
    pub fn pages(&self) -> ObjectRef {
        self.pages
    }

    /// Reference to the document information dictionary
    pub fn info(&self) -> ObjectRef {
        self.info
    }

    /// Reference to the document catalog
    pub fn catalog(&self) -> ObjectRef {
        self.catalog
    }

    pub fn pages_mut(&mut self) -> PDFResult<&mut Dictionary> {
        self.dictionary_mut(self.pages)
    }

    pub fn info_mut(&mut self) -> PDFResult<&mut Dictionary> {
        self.dictionary_mut(self.info)
    }

    pub fn catalog_mut(&mut self) -> PDFResult<&mut Dictionary> {
        self.dictionary_mut(self.catalog)
    }

    /// Registered objects in table order, sentinel included
    pub fn objects(&self) -> &[PDFObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Byte offset of the `xref` keyword, known after a write
    pub fn xref_position(&self) -> Option<usize> {
        self.xref_position
    }

    /// Serialize the whole document to `output`
    ///
    /// Offsets are recomputed from scratch on every call, so writing an
    /// unchanged document twice produces identical bytes.
    pub fn write<W: Write>(&mut self, output: &mut W) -> PDFResult<()> {
        debug!(
            "Writing PDF {} document with {} objects",
            self.version,
            self.objects.len()
        );

        let mut writer = PDFWriter::new(output);
        self.write_header(&mut writer)?;
        let identifier = self.write_body(&mut writer)?;
        self.write_cross_reference_table(&mut writer)?;
        self.write_trailer(&mut writer, identifier)?;
        writer.flush()?;

        debug!("PDF document written ({} bytes)", writer.position());
        Ok(())
    }

    fn write_header<W: Write>(&self, writer: &mut PDFWriter<'_, W>) -> PDFResult<()> {
        writer.write_line(format!("%PDF-{}", self.version).as_bytes())
    }

    /// Write every in-use object, returning the file identifier if enabled
    fn write_body<W: Write>(&mut self, writer: &mut PDFWriter<'_, W>) -> PDFResult<Option<String>> {
        let mut context = self.identifier.then(md5::Context::new);

        for object in self.objects.iter_mut() {
            if object.is_free() {
                continue;
            }
            object.offset = writer.position();
            trace!("Object {} at offset {}", object.number, object.offset);

            let block = object.indirect()?;
            if let Some(context) = context.as_mut() {
                context.consume(&block);
            }
            writer.write_block(&block)?;
        }

        Ok(context.map(|context| hex::encode(context.finalize().0)))
    }

    fn write_cross_reference_table<W: Write>(&mut self, writer: &mut PDFWriter<'_, W>) -> PDFResult<()> {
        self.xref_position = Some(writer.position());
        trace!("Cross-reference table at offset {}", writer.position());

        for line in XRefTable::from_objects(&self.objects).lines() {
            writer.write_line(line.as_bytes())?;
        }
        Ok(())
    }

    fn write_trailer<W: Write>(
        &self,
        writer: &mut PDFWriter<'_, W>,
        identifier: Option<String>,
    ) -> PDFResult<()> {
        let mut trailer = Dictionary::new();
        trailer.set("Size", self.objects.len());
        trailer.set_reference("Root", self.catalog);
        trailer.set_reference("Info", self.info);
        if let Some(identifier) = identifier {
            let id = Value::Text(format!("<{}>", identifier));
            trailer.set("ID", Array::from(vec![id.clone(), id]));
        }

        let xref_position = self.xref_position.unwrap_or_default();

        writer.write_line(b"trailer")?;
        writer.write_block(&trailer.data())?;
        writer.write_line(b"startxref")?;
        writer.write_line(xref_position.to_string().as_bytes())?;
        writer.write_line(b"%%EOF")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    fn written(document: &mut PDFDocument) -> PDFResult<String> {
        let mut output = Vec::new();
        document.write(&mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_initial_objects() {
        let document = PDFDocument::new();

        assert_eq!(document.len(), 4);
        assert_eq!(document.pages(), ObjectRef::new(1, 0));
        assert_eq!(document.info(), ObjectRef::new(2, 0));
        assert_eq!(document.catalog(), ObjectRef::new(3, 0));
        assert!(document.objects()[0].is_free());
        assert_eq!(document.xref_position(), None);
    }

    #[test]
    fn test_empty_document() -> PDFResult<()> {
        let mut document = PDFDocument::new();
        let expected = "%PDF-1.7\n\
            1 0 obj\n<<\n/Type /Pages\n/Kids [ ]\n/Count 0\n>>\nendobj\n\
            2 0 obj\n<<\n>>\nendobj\n\
            3 0 obj\n<<\n/Type /Catalog\n/Pages 1 0 R\n>>\nendobj\n\
            xref\n0 4\n\
            0000000000 65535 f \n\
            0000000009 00000 n \n\
            0000000062 00000 n \n\
            0000000083 00000 n \n\
            trailer\n<<\n/Size 4\n/Root 3 0 R\n/Info 2 0 R\n>>\n\
            startxref\n132\n%%EOF\n";

        assert_eq!(written(&mut document)?, expected);
        assert_eq!(document.xref_position(), Some(132));
        Ok(())
    }

    #[test]
    fn test_add_page() -> PDFResult<()> {
        let mut document = PDFDocument::new();
        let first = document.add_page(Dictionary::with_type("Page"))?;
        let second = document.add_page(Dictionary::with_type("Page"))?;

        assert_eq!(first, ObjectRef::new(4, 0));
        assert_eq!(second, ObjectRef::new(5, 0));

        let pages = document.pages_mut()?;
        assert_eq!(pages.get_integer("Count"), Some(2));
        assert_eq!(String::from_utf8(pages.get("Kids").unwrap().data()).unwrap(), "[ 4 0 R 5 0 R ]");
        Ok(())
    }

    #[test]
    fn test_add_page_requires_kids_array() {
        let mut document = PDFDocument::new();
        document.pages_mut().unwrap().set("Kids", 0);

        assert!(matches!(
            document.add_page(Dictionary::with_type("Page")),
            Err(PDFError::MissingDictionaryEntry(_))
        ));
        assert_eq!(document.len(), 4);
    }

    #[test]
    fn test_dictionary_mut_type_errors() {
        let mut document = PDFDocument::new();
        let array = document.add_object(Array::new());

        assert!(matches!(
            document.dictionary_mut(array),
            Err(PDFError::InvalidObjectType { expected: "dictionary", found: "array" })
        ));
        assert!(matches!(
            document.dictionary_mut(ObjectRef::new(0, 0)),
            Err(PDFError::EmptyObject(0))
        ));
        assert!(matches!(
            document.dictionary_mut(ObjectRef::new(42, 0)),
            Err(PDFError::ObjectNotFound(42))
        ));
    }

    #[test]
    fn test_free_objects_are_skipped() -> PDFResult<()> {
        let mut document = PDFDocument::new();
        let scratch = document.add_object(Dictionary::with_type("Scratch"));
        document.mark_free(scratch)?;

        let output = written(&mut document)?;
        assert!(!output.contains("4 0 obj"));
        assert!(output.contains("xref\n0 5\n"));
        assert!(output.contains("0000000000 00000 f \ntrailer"));
        assert!(matches!(
            document.mark_free(ObjectRef::new(9, 0)),
            Err(PDFError::ObjectNotFound(9))
        ));
        Ok(())
    }

    #[test]
    fn test_free_after_write() -> PDFResult<()> {
        let mut document = PDFDocument::new();
        let scratch = document.add_object(Dictionary::with_type("Scratch"));
        written(&mut document)?;
        assert_ne!(document.objects()[scratch.number].offset, 0);

        document.mark_free(scratch)?;
        assert_eq!(document.objects()[scratch.number].offset, 0);
        let output = written(&mut document)?;
        assert!(output.contains("0000000000 00000 f 
trailer"));

        let mut fresh = PDFDocument::new();
        let scratch = fresh.add_object(Dictionary::with_type("Scratch"));
        fresh.mark_free(scratch)?;
        assert_eq!(written(&mut fresh)?, output);
        Ok(())
    }

    #[test]
    fn test_info_entries() -> PDFResult<()> {
        let mut document = PDFDocument::with_version(PDFVersion::V1_4);
        document
            .info_mut()?
            .set("Producer", crate::pdf::PDFString::new("pdf-assembler"));

        let output = written(&mut document)?;
        assert!(output.starts_with("%PDF-1.4\n"));
        assert!(output.contains("2 0 obj\n<<\n/Producer (pdf-assembler)\n>>\nendobj\n"));
        Ok(())
    }

    #[test]
    fn test_identifier() -> PDFResult<()> {
        let mut document = PDFDocument::new();
        document.set_identifier(true);

        let mut body = Vec::new();
        for object in &document.objects()[1..] {
            body.extend_from_slice(&object.indirect()?);
        }
        let digest = hex::encode(md5::compute(&body).0);

        let output = written(&mut document)?;
        assert!(output.contains(&format!("/ID [ <{}> <{}> ]\n", digest, digest)));
        Ok(())
    }
}
