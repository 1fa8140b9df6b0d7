use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Iter;

use crate::error::{Error, Result};
use crate::util::{is_writable_key, is_writable_section_name, is_writable_value};
use crate::value::FromValue;

/// A named group of key/value pairs, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: IndexMap<String, String>,
}

impl Section {
    #[must_use]
    pub fn new<N, I, K, V>(name: N, entries: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    #[must_use]
    pub(crate) fn empty(name: String) -> Self {
        Self {
            name,
            entries: IndexMap::with_capacity(16),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Look up the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn get(&self, key: &str) -> Result<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::KeyNotFound {
                section: self.name.clone(),
                key: key.to_owned(),
            })
    }

    /// Look up `key` and convert its value to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent and [`Error::ConversionFailed`] if the
    /// value is not entirely a valid `T`.
    pub fn get_as<T: FromValue>(&self, key: &str) -> Result<T> {
        let value = self.get(key)?;
        T::from_value(value).ok_or_else(|| Error::ConversionFailed {
            value: value.to_owned(),
            target: T::TARGET,
        })
    }

    /// Insert a pair, returning the value it replaced.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.entries.insert(key.into(), value.into())
    }

    /// Check that every part of the section reads back unchanged once written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySectionName`], [`Error::InvalidSectionName`] or
    /// [`Error::InvalidEntry`] for the first part that would not.
    pub(crate) fn check_writable(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::EmptySectionName { line_number: None });
        }
        if !is_writable_section_name(&self.name) {
            return Err(Error::InvalidSectionName {
                section: self.name.clone(),
            });
        }
        match self
            .entries
            .iter()
            .find(|(key, value)| !is_writable_key(key) || !is_writable_value(value))
        {
            Some((key, value)) => Err(Error::InvalidEntry {
                section: self.name.clone(),
                key: key.clone(),
                value: value.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Remove `key`, shifting the later keys up one position.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Writes the header line followed by one `key = value` line per pair.
impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.name)?;
        for (key, value) in &self.entries {
            // A key at column 0 starting with one of these would read back as a header or
            // comment; the parser trims the leading space again.
            let pad = if key.starts_with(['[', ';', '#']) { " " } else { "" };
            writeln!(f, "{pad}{key} = {value}")?;
        }
        Ok(())
    }
}
