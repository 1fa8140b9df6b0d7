use std::str::Lines;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::section::Section;
use crate::util::{extract_section_name, is_meaningful, split_key_value};

/// Represents an on-going parse.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lines: Lines<'a>,
    line_number: usize,
    sections: IndexMap<String, Section>,
    /// The section currently collecting entries; `None` until the first header.
    current: Option<Section>,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line_number: 0,
            sections: IndexMap::with_capacity(16),
            current: None,
        }
    }

    /// Run the parse to completion.
    ///
    /// A later section with the same name replaces an earlier one, and a repeated key replaces
    /// the earlier value within its section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] for a line that is neither a header nor `key = value`, and
    /// [`Error::EmptySectionName`] for a `[]` header.
    pub fn into_sections(mut self) -> Result<IndexMap<String, Section>> {
        while let Some(line) = self.next_meaningful() {
            if line.starts_with('[') {
                self.open_section(line)?;
            } else if let Some((key, value)) = split_key_value(line) {
                self.insert(key, value);
            } else {
                return Err(Error::Malformed {
                    line_number: self.line_number,
                    line: line.to_owned(),
                });
            }
        }

        self.flush();
        Ok(self.sections)
    }

    /// Skip blank and comment lines while keeping count of the raw line number.
    fn next_meaningful(&mut self) -> Option<&'a str> {
        for line in self.lines.by_ref() {
            self.line_number += 1;
            if is_meaningful(line) {
                return Some(line);
            }
        }
        None
    }

    fn open_section(&mut self, line: &str) -> Result<()> {
        let name = extract_section_name(line).ok_or_else(|| Error::Malformed {
            line_number: self.line_number,
            line: line.to_owned(),
        })?;

        if name.is_empty() {
            return Err(Error::EmptySectionName {
                line_number: Some(self.line_number),
            });
        }

        self.flush();
        self.current = Some(Section::empty(name.to_owned()));
        Ok(())
    }

    fn insert(&mut self, key: &str, value: &str) {
        if let Some(section) = self.current.as_mut() {
            section.insert(key, value);
        } else {
            log::warn!(
                "line {}: dropping {key:?} = {value:?} found before any section header",
                self.line_number
            );
        }
    }

    fn flush(&mut self) {
        if let Some(section) = self.current.take() {
            log::trace!("[{}] {} entries", section.name(), section.len());
            // Replacing keeps the first position; move the newcomer to the end instead.
            self.sections.shift_remove(section.name());
            self.sections.insert(section.name().to_owned(), section);
        }
    }
}
