//! # Qualifier sets.
//!
//! Qualifiers are unordered key/value tags attached to a descriptor
//! (`{kind=in-memory}`) and to a query. A descriptor matches a non-empty query
//! when its own set is a superset of the query.

use std::collections::BTreeMap;
use std::fmt;

/// Unordered set of key/value tags.
///
/// Stored sorted by key so that rendering and comparison are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Qualifiers {
    tags: BTreeMap<String, String>,
}

impl Qualifiers {
    /// The empty set (the "default" query).
    #[inline]
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds a set from key/value pairs. Later duplicates overwrite earlier ones.
    ///
    /// # Example
    /// ```
    /// use taskforge::Qualifiers;
    ///
    /// let q = Qualifiers::of([("kind", "in-memory")]);
    /// assert_eq!(q.to_string(), "{kind=in-memory}");
    /// ```
    pub fn of<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            tags: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns a new set with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Returns the value tagged under `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True if every tag of `other` is present here with the same value.
    ///
    /// The empty set is a subset of everything.
    pub fn is_superset_of(&self, other: &Qualifiers) -> bool {
        other
            .tags
            .iter()
            .all(|(k, v)| self.tags.get(k).is_some_and(|mine| mine == v))
    }

    /// Iterates tags in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Qualifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str("}")
    }
}
