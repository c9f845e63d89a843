//! The ADIF record entity.
//!
//! A [`Record`] maps lowercase field names to raw value bytes. Values are
//! usually text but no encoding is assumed; lengths and contents are kept
//! byte for byte, control characters included.
//!
//! ## Canonical text form
//!
//! [`Record::to_bytes`] writes every present field as `<name:length>value`:
//! first the standard fields in [`STANDARD_FIELDS`] order, then all other
//! fields sorted by name. The output never depends on insertion order.
//!
//! ```rust
//! use adif_stream::Record;
//!
//! let mut record = Record::new();
//! record.set("APP_MYLOG_ID", "7");
//! record.set("Call", "W1AW");
//! record.set("band", "20m");
//!
//! assert_eq!(record.to_text(), "<band:3>20m<call:4>W1AW<app_mylog_id:1>7");
//! ```
//!
//! ## Fingerprints
//!
//! [`Record::fingerprint`] hashes the identity fields (see
//! [`FINGERPRINT_FIELDS`]) so that two copies of the same contact compare
//! equal even when their notes or confirmation fields differ.

use crate::fields::{is_standard_field, FINGERPRINT_FIELDS, STANDARD_FIELDS};
use crate::{parser, Error, FieldMap, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::fmt;
use std::io;

/// One logged contact: a set of named fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    values: FieldMap,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Record {
            values: FieldMap::new(),
        }
    }

    /// Parses a single record span, see [`crate::parse_record`].
    pub fn parse(span: &[u8]) -> Result<Self> {
        parser::parse_record(span)
    }

    /// Returns the raw value of `name` (any case).
    ///
    /// # Errors
    ///
    /// [`Error::NoSuchField`] if the record has no such field.
    pub fn get(&self, name: &str) -> Result<&[u8]> {
        self.values
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| Error::no_such_field(name))
    }

    /// Returns the value of `name` as text, replacing invalid UTF-8.
    pub fn get_str(&self, name: &str) -> Result<Cow<'_, str>> {
        self.get(name).map(String::from_utf8_lossy)
    }

    /// Inserts or overwrites a field; the name is lowercased.
    pub fn set(&mut self, name: &str, value: impl AsRef<[u8]>) {
        self.values
            .insert(name.to_ascii_lowercase(), value.as_ref().to_vec());
    }

    /// Inserts a field whose name is already lowercase.
    pub(crate) fn set_bytes(&mut self, name: String, value: Vec<u8>) {
        self.values.insert(name, value);
    }

    /// Removes a field.
    ///
    /// # Errors
    ///
    /// [`Error::NoSuchField`] if the record has no such field.
    pub fn delete(&mut self, name: &str) -> Result<bool> {
        match self.values.remove(&name.to_ascii_lowercase()) {
            Some(_) => Ok(true),
            None => Err(Error::no_such_field(name)),
        }
    }

    /// Names of the present fields, in no particular order.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(&name.to_ascii_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates fields in the order they were set or read.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Fields in canonical order: standard ones first, then the rest by name.
    fn canonical_fields(&self) -> Vec<(&str, &[u8])> {
        let mut out: Vec<(&str, &[u8])> = STANDARD_FIELDS
            .iter()
            .filter_map(|&name| self.values.get(name).map(|v| (name, v)))
            .collect();

        let mut custom: Vec<(&str, &[u8])> = self
            .iter()
            .filter(|(name, _)| !is_standard_field(name))
            .collect();
        custom.sort_unstable_by(|a, b| a.0.cmp(b.0));
        out.extend(custom);
        out
    }

    /// Writes the canonical text form to `writer`.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        for (name, value) in self.canonical_fields() {
            write!(writer, "<{}:{}>", name, value.len())?;
            writer.write_all(value)?;
        }
        Ok(())
    }

    /// Canonical text form as bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len() * 24);
        for (name, value) in self.canonical_fields() {
            out.push(b'<');
            out.extend_from_slice(name.as_bytes());
            out.push(b':');
            out.extend_from_slice(value.len().to_string().as_bytes());
            out.push(b'>');
            out.extend_from_slice(value);
        }
        out
    }

    /// Canonical text form; invalid UTF-8 in values is replaced.
    ///
    /// Length prefixes always count the original value bytes, so use
    /// [`Record::to_bytes`] when values may not be UTF-8.
    #[must_use]
    pub fn to_text(&self) -> String {
        match String::from_utf8(self.to_bytes()) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }

    /// SHA-256 over the present identity fields joined with `|`, hex encoded.
    ///
    /// Records holding none of the identity fields all share the digest of
    /// the empty string.
    ///
    /// ```rust
    /// use adif_stream::Record;
    ///
    /// let mut a = Record::new();
    /// a.set("call", "W1AW");
    /// a.set("notes", "first copy");
    /// let mut b = a.clone();
    /// b.set("notes", "second copy");
    ///
    /// assert_eq!(a.fingerprint(), b.fingerprint());
    /// assert_eq!(a.fingerprint().len(), 64);
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        let present = FINGERPRINT_FIELDS
            .iter()
            .filter_map(|name| self.values.get(name));
        for (i, value) in present.enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(value);
        }
        hex::encode(hasher.finalize())
    }

    /// Start of the contact from `qso_date` (YYYYMMDD) and `time_on`
    /// (HHMM or HHMMSS), in UTC as ADIF defines it.
    ///
    /// Returns `None` when either field is missing or unreadable.
    #[must_use]
    pub fn qso_start(&self) -> Option<NaiveDateTime> {
        let date = std::str::from_utf8(self.values.get("qso_date")?).ok()?;
        let time = std::str::from_utf8(self.values.get("time_on")?).ok()?;
        let date = NaiveDate::parse_from_str(date.trim(), "%Y%m%d").ok()?;
        let time = time.trim();
        let time = match time.len() {
            4 => NaiveTime::parse_from_str(time, "%H%M").ok()?,
            6 => NaiveTime::parse_from_str(time, "%H%M%S").ok()?,
            _ => return None,
        };
        Some(date.and_time(time))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromIterator<(String, Vec<u8>)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Vec<u8>)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.set(&name, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let fields = self.canonical_fields();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (name, value) in fields {
            map.serialize_entry(name, &String::from_utf8_lossy(value))?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of ADIF field names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Record, A::Error> {
        let mut record = Record::new();
        while let Some((name, value)) = access.next_entry::<String, String>()? {
            record.set(&name, value);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}
