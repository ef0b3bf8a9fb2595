//! core::record
//!
//! Object records and the ordered sets they live in.
//!
//! # Overview
//!
//! An [`ObjectRecord`] is one tracked name/value pair. A [`RecordSet`] is an
//! ordered sequence of records with unique names: it backs both a branch's
//! mutable staging set and the frozen snapshot inside a commit. The only
//! difference between the two uses is whether anyone still mutates it.
//!
//! # Invariants
//!
//! - Names are unique within a set; `upsert` replaces in place (last write
//!   wins) so a record keeps its original position across updates.
//! - Removal of an absent name is an explicit no-op: the set is untouched
//!   and the caller gets `None`, never an index fault.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One tracked item: a name bound to an arbitrary JSON value.
///
/// # Example
///
/// ```
/// use strata::core::record::ObjectRecord;
///
/// let record = ObjectRecord::new("answer", 42);
/// assert_eq!(record.name, "answer");
/// assert_eq!(record.value, serde_json::json!(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// The unique name within one set.
    pub name: String,
    /// The tracked value.
    pub value: Value,
}

impl ObjectRecord {
    /// Create a record from a name and anything convertible to a JSON value.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An ordered, name-unique sequence of [`ObjectRecord`]s.
///
/// Insertion order is preserved; updating an existing name keeps its
/// position. `Clone` is a deep copy (JSON values own their data), so a
/// cloned set can never alias the one it came from.
///
/// # Example
///
/// ```
/// use strata::core::record::RecordSet;
/// use serde_json::json;
///
/// let mut set = RecordSet::new();
/// set.upsert("x", json!(1));
/// set.upsert("y", json!("two"));
/// set.upsert("x", json!(3)); // replaces in place
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.find("x").map(|r| &r.value), Some(&json!(3)));
/// assert!(set.remove("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet(Vec<ObjectRecord>);

impl RecordSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record named `name`.
    ///
    /// A known name is replaced in place; a new name is appended.
    pub fn upsert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.position(&name) {
            Some(index) => self.0[index] = ObjectRecord { name, value },
            None => self.0.push(ObjectRecord { name, value }),
        }
    }

    /// Remove and return the record named `name`.
    ///
    /// A miss returns `None` and leaves the set untouched.
    pub fn remove(&mut self, name: &str) -> Option<ObjectRecord> {
        self.position(name).map(|index| self.0.remove(index))
    }

    /// Look up the record named `name`.
    pub fn find(&self, name: &str) -> Option<&ObjectRecord> {
        self.0.iter().find(|record| record.name == name)
    }

    /// Number of records in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ObjectRecord> {
        self.0.iter()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|record| record.name == name)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a ObjectRecord;
    type IntoIter = std::slice::Iter<'a, ObjectRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<ObjectRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = ObjectRecord>>(iter: I) -> Self {
        let mut set = Self::new();
        for record in iter {
            set.upsert(record.name, record.value);
        }
        set
    }
}
