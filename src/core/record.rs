use serde::ser::{Serialize, SerializeMap, Serializer};

/// Attribute holding the reservation status.
pub const STATUS: &str = "RS";
/// Attribute holding the reservation identifier.
pub const RESERVATION_ID: &str = "RID";
/// Attribute holding the begin (check-in) date.
pub const BEGIN_DATE: &str = "BD";
/// Attribute holding the end (check-out) date.
pub const END_DATE: &str = "ED";

/// Attribute set of one `<RH>` element.
///
/// Fields keep the order in which they appear in the source element. There is no fixed
/// schema: the well-known keys ([`STATUS`], [`RESERVATION_ID`], [`BEGIN_DATE`],
/// [`END_DATE`]) may be missing and any other attribute is kept as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the attribute `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Attribute names in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn status(&self) -> Option<&str> {
        self.get(STATUS)
    }

    pub fn reservation_id(&self) -> Option<&str> {
        self.get(RESERVATION_ID)
    }

    pub fn begin_date(&self) -> Option<&str> {
        self.get(BEGIN_DATE)
    }

    pub fn end_date(&self) -> Option<&str> {
        self.get(END_DATE)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    /// Builds a record from name/value pairs. A repeated name replaces the earlier value
    /// in place.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut fields: Vec<(String, String)> = Vec::new();
        for (key, value) in iter {
            let key = key.into();
            let value = value.into();
            match fields.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => fields.push((key, value)),
            }
        }
        Record { fields }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Records that passed the filter, in processing order.
///
/// Documents contribute in upload order and records in document order. Duplicates are
/// kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<Record>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl Extend<Record> for ResultSet {
    fn extend<T: IntoIterator<Item = Record>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

impl From<Vec<Record>> for ResultSet {
    fn from(records: Vec<Record>) -> Self {
        ResultSet { records }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
