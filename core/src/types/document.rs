use super::record::FileResult;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Aggregate document: file path to extracted records
///
/// Entries keep insertion order, which is discovery order, so two runs
/// over the same tree serialize identically. Keys are unique; inserting
/// an existing key replaces its records in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateDocument {
    entries: Vec<(String, FileResult)>,
    index: HashMap<String, usize>,
}

impl AggregateDocument {
    /// Creates an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the records of one file
    pub fn insert(&mut self, path: impl Into<String>, records: FileResult) {
        let path = path.into();
        match self.index.get(&path) {
            Some(&pos) => self.entries[pos].1 = records,
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push((path, records));
            }
        }
    }

    /// Looks up the records of one file
    pub fn get(&self, path: &str) -> Option<&FileResult> {
        self.index.get(path).map(|&pos| &self.entries[pos].1)
    }

    /// Number of files in the document
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First of `key`, `key#2`, `key#3`, ... not yet in the document
    pub fn vacant_key(&self, key: &str) -> String {
        if !self.index.contains_key(key) {
            return key.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}#{}", key, n);
            if !self.index.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Serialize for AggregateDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, records) in &self.entries {
            map.serialize_entry(path, records)?;
        }
        map.end()
    }
}
