//! PDF dictionary implementation

use indexmap::IndexMap;

use super::{ObjectRef, PDFObjectCommon, Value};

/// PDF dictionary object
///
/// Keys are PDF names without the leading slash and keep their insertion
/// order. Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: IndexMap<String, Value>,
}

impl Dictionary {
    /// Create new dictionary
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Create new dictionary with its `Type` entry set
    pub fn with_type(type_name: &str) -> Self {
        let mut dict = Self::new();
        dict.set_name("Type", type_name);
        dict
    }

    /// Get value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Get mutable value by key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Get integer value
    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_integer)
    }

    /// Get name value
    pub fn get_name(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_name)
    }

    /// Get reference value
    pub fn get_reference(&self, key: &str) -> Option<ObjectRef> {
        self.get(key).and_then(Value::as_reference)
    }

    /// Set value, returning the one it replaced
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Set name value
    pub fn set_name(&mut self, key: impl Into<String>, name: &str) -> Option<Value> {
        self.set(key, Value::Name(name.to_string()))
    }

    /// Set reference value
    pub fn set_reference(&mut self, key: impl Into<String>, reference: ObjectRef) -> Option<Value> {
        self.set(key, Value::Reference(reference))
    }

    /// Remove entry, keeping the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl PDFObjectCommon for Dictionary {
    fn write_to(&self, output: &mut Vec<u8>) {
        output.extend_from_slice(b"<<\n");

        for (key, value) in &self.entries {
            output.push(b'/');
            output.extend_from_slice(key.as_bytes());
            output.push(b' ');
            value.write_to(output);
            output.push(b'\n');
        }

        output.extend_from_slice(b">>");
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        dict.extend(iter);
        dict
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Dictionary {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
