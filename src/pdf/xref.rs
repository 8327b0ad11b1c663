//! PDF cross-reference table implementation

use super::{EntryKind, PDFObject};

/// Single cross-reference entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XRefEntry {
    pub offset: usize,
    pub generation: u16,
    pub kind: EntryKind,
}

impl XRefEntry {
    /// Fixed-width entry line, without the end-of-line marker
    ///
    /// Together with the newline appended by the writer every entry is
    /// exactly 20 bytes long.
    pub fn to_line(&self) -> String {
        format!(
            "{:010} {:05} {} ",
            self.offset,
            self.generation,
            self.kind.as_char()
        )
    }
}

impl From<&PDFObject> for XRefEntry {
    fn from(object: &PDFObject) -> Self {
        // Free entries carry no byte offset
        let offset = match object.kind {
            EntryKind::InUse => object.offset,
            EntryKind::Free => 0,
        };
        Self {
            offset,
            generation: object.generation,
            kind: object.kind,
        }
    }
}

/// PDF cross-reference table with a single subsection starting at object 0
#[derive(Debug, Clone, Default)]
pub struct XRefTable {
    entries: Vec<XRefEntry>,
}

impl XRefTable {
    /// Create new xref table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build the table from an object table, free objects included
    pub fn from_objects(objects: &[PDFObject]) -> Self {
        Self {
            entries: objects.iter().map(XRefEntry::from).collect(),
        }
    }

    pub fn push(&mut self, entry: XRefEntry) {
        self.entries.push(entry);
    }

    /// Get xref table entries
    pub fn entries(&self) -> &[XRefEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lines of the table: keyword, subsection header, then one line per entry
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len() + 2);
        lines.push("xref".to_string());
        lines.push(format!("0 {}", self.entries.len()));
        lines.extend(self.entries.iter().map(XRefEntry::to_line));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::{Dictionary, SENTINEL_GENERATION};
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[test]
    fn test_xref_lines() {
        let mut xref = XRefTable::new();
        xref.push(XRefEntry { offset: 0, generation: SENTINEL_GENERATION, kind: EntryKind::Free });
        xref.push(XRefEntry { offset: 12, generation: 0, kind: EntryKind::InUse });
        xref.push(XRefEntry { offset: 234, generation: 0, kind: EntryKind::InUse });

        let expected = "xref\n\
                        0 3\n\
                        0000000000 65535 f \n\
                        0000000012 00000 n \n\
                        0000000234 00000 n \n";
        let mut written = String::new();
        for line in xref.lines() {
            written.push_str(&line);
            written.push('\n');
        }
        assert_eq!(written, expected);
    }

    #[test]
    fn test_entry_width() {
        let entry = XRefEntry { offset: 1_234_567_890, generation: 7, kind: EntryKind::InUse };
        assert_eq!(entry.to_line(), "1234567890 00007 n ");
        assert_eq!(entry.to_line().len() + 1, 20);
    }

    #[test]
    fn test_from_objects() {
        let mut page = PDFObject::new(1, Dictionary::with_type("Page").into());
        page.offset = 15;
        let objects = vec![PDFObject::sentinel(), page];

        let xref = XRefTable::from_objects(&objects);
        assert_eq!(xref.len(), 2);
        assert_eq!(xref.entries()[0].kind, EntryKind::Free);
        assert_eq!(xref.entries()[1].to_line(), "0000000015 00000 n ");
    }

    #[test]
    fn test_free_entry_has_no_offset() {
        let mut scratch = PDFObject::new(1, Dictionary::with_type("Scratch").into());
        scratch.offset = 132;
        scratch.kind = EntryKind::Free;

        let entry = XRefEntry::from(&scratch);
        assert_eq!(entry.offset, 0);
        assert_eq!(entry.to_line(), "0000000000 00000 f ");
    }
}
