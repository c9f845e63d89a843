//! Owned field storage for a single record.
//!
//! [`FieldMap`] wraps an [`IndexMap`] from lowercase field name to raw value
//! bytes. Insertion order is kept so that iteration follows the order fields
//! were read in; canonical output does not depend on it.
//!
//! ## Examples
//!
//! ```rust
//! use adif_stream::FieldMap;
//!
//! let mut map = FieldMap::new();
//! map.insert("call".to_string(), b"W1AW".to_vec());
//! map.insert("band".to_string(), b"20m".to_vec());
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("call"), Some(&b"W1AW"[..]));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of field names to value bytes.
///
/// Keys are stored as given; [`crate::Record`] is responsible for lowercasing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldMap(IndexMap<String, Vec<u8>>);

impl FieldMap {
    /// Creates an empty `FieldMap`.
    #[must_use]
    pub fn new() -> Self {
        FieldMap(IndexMap::new())
    }

    /// Creates an empty `FieldMap` with room for `capacity` fields.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FieldMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a field, returning the previous value if there was one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adif_stream::FieldMap;
    ///
    /// let mut map = FieldMap::new();
    /// assert!(map.insert("mode".to_string(), b"CW".to_vec()).is_none());
    /// assert_eq!(map.insert("mode".to_string(), b"FT8".to_vec()), Some(b"CW".to_vec()));
    /// ```
    pub fn insert(&mut self, key: String, value: Vec<u8>) -> Option<Vec<u8>> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.0.get(key).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a field, keeping the relative order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Vec<u8>> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Vec<u8>> {
        self.0.keys()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Vec<u8>> {
        self.0.iter()
    }
}

impl From<HashMap<String, Vec<u8>>> for FieldMap {
    fn from(map: HashMap<String, Vec<u8>>) -> Self {
        FieldMap(map.into_iter().collect())
    }
}

impl From<FieldMap> for HashMap<String, Vec<u8>> {
    fn from(map: FieldMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, Vec<u8>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = (&'a String, &'a Vec<u8>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Vec<u8>)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (String, Vec<u8>)>>(iter: T) -> Self {
        FieldMap(IndexMap::from_iter(iter))
    }
}
