use std::collections::HashMap;

use crate::core::Record;

/// Keyed collection of contact records.
///
/// Records are keyed by their name. Inserting under an existing name replaces
/// the stored record but keeps its position; iteration follows first-insertion
/// order of the names currently present.
#[derive(Debug, Clone, Default)]
pub struct ContactBook {
    records: HashMap<String, Record>,
    order: Vec<String>,
}

impl ContactBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its name. Returns the record it replaced, if any.
    pub fn add_record(&mut self, record: Record) -> Option<Record> {
        let key = record.name().as_str().to_string();
        let previous = self.records.insert(key.clone(), record);
        if previous.is_none() {
            self.order.push(key);
        }
        previous
    }

    pub fn remove_record(&mut self, name: &str) -> Option<Record> {
        let removed = self.records.remove(name)?;
        self.order.retain(|key| key != name);
        Some(removed)
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Every record in key order. Each call starts a fresh pass.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.order.iter().filter_map(|key| self.records.get(key))
    }

    /// Records whose name contains `query` (case-sensitive).
    pub fn search_by_name(&self, query: &str) -> Vec<&Record> {
        self.records()
            .filter(|record| record.name().as_str().contains(query))
            .collect()
    }

    /// Records with at least one phone containing `query`. Each record appears
    /// once no matter how many of its phones match.
    pub fn search_by_phone(&self, query: &str) -> Vec<&Record> {
        self.records()
            .filter(|record| phone_matches(record, query))
            .collect()
    }

    /// Records whose name contains `query` ignoring case, or whose phones
    /// contain `query` verbatim. A record matching both ways is returned once.
    pub fn search_by_name_or_phone(&self, query: &str) -> Vec<&Record> {
        let needle = query.to_lowercase();
        self.records()
            .filter(|record| {
                record.name().as_str().to_lowercase().contains(&needle)
                    || phone_matches(record, query)
            })
            .collect()
    }
}

fn phone_matches(record: &Record, query: &str) -> bool {
    record
        .phones()
        .iter()
        .any(|phone| phone.as_str().contains(query))
}

impl FromIterator<Record> for ContactBook {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut book = Self::new();
        for record in iter {
            book.add_record(record);
        }
        book
    }
}
