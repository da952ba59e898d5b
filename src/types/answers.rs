use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::value::{Value, descend};

/// The answers a user has entered so far, keyed by form field name.
///
/// Values may be nested objects; lookups take dot-separated paths like
/// `"employer.address.country"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    values: BTreeMap<String, Value>,
}

impl Answers {
    /// Create an empty answer mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value at a dot-separated path. Creates intermediate objects as needed.
    #[must_use]
    pub fn set(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.insert(path, value.into());
        self
    }

    /// Insert a value at a dot-separated path (mutable reference version).
    ///
    /// A non-object value sitting on an intermediate segment is replaced by
    /// an object.
    pub fn insert(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        Self::insert_recursive(&mut self.values, &segments, value);
    }

    /// Resolve a dot-separated path.
    ///
    /// Returns intermediate objects as well as leaves. Any missing key, or a
    /// step into something that is not an object, resolves to `None`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        descend(self.values.get(first), segments)
    }

    /// Number of top-level answers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over top-level (field name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn insert_recursive(map: &mut BTreeMap<String, Value>, segments: &[&str], value: Value) {
        match segments {
            [] => {}
            [last] => {
                map.insert((*last).to_owned(), value);
            }
            [first, rest @ ..] => {
                let entry = map
                    .entry((*first).to_owned())
                    .or_insert_with(|| Value::Object(BTreeMap::new()));
                if !matches!(entry, Value::Object(_)) {
                    *entry = Value::Object(BTreeMap::new());
                }
                if let Value::Object(nested) = entry {
                    Self::insert_recursive(nested, rest, value);
                }
            }
        }
    }
}

impl From<BTreeMap<String, Value>> for Answers {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
