use super::Value;

use indexmap::IndexMap;
use std::ops;

/// A record with named fields and an optional type name.
///
/// Records are what the result projector produces; the type name carries the
/// `type` attribute of the result map that shaped it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValueRecord {
    pub ty: Option<String>,
    pub fields: IndexMap<String, Value>,
}

impl ValueRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn typed(ty: impl Into<String>) -> Self {
        Self {
            ty: Some(ty.into()),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style field insertion.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl ops::Deref for ValueRecord {
    type Target = IndexMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

impl ops::DerefMut for ValueRecord {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.fields
    }
}

impl<'a> IntoIterator for &'a ValueRecord {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for ValueRecord
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            ty: None,
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
