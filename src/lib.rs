//! Read and write flat INI configuration files.
//!
//! A document is a set of named sections, each holding `key = value` string pairs:
//!
//! ```text
//! ; comment
//! [server]
//! host = localhost
//! port = 8080
//! ```
//!
//! Lines starting with `;` or `#` and blank lines are ignored. Any other line must be a
//! `[section]` header or contain an `=`, otherwise parsing fails.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

mod error;
mod parser;
mod section;
pub mod util;
mod value;

use std::fmt;
use std::fs;
use std::borrow::Cow;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;

pub use error::{Error, Result};
use parser::Parser;
pub use section::Section;
pub use value::FromValue;

/// An INI document, optionally bound to the file it is read from and written to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ini {
    path: Option<PathBuf>,
    sections: IndexMap<String, Section>,
}

impl Ini {
    /// An empty, unbound document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse the file at `path`, binding the document to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnavailable`] if the file cannot be read, or a parse error if its
    /// content is not valid INI.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let sections = load(path)?;
        Ok(Self {
            path: Some(path.to_owned()),
            sections,
        })
    }

    /// An empty document bound to `path` without reading it, e.g. for a file yet to be written.
    #[must_use]
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
            sections: IndexMap::new(),
        }
    }

    /// Parse everything `reader` yields. Invalid UTF-8 is replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnavailable`] if reading fails, or a parse error.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buffer = Vec::with_capacity(4096);
        reader
            .read_to_end(&mut buffer)
            .map_err(|source| Error::SourceUnavailable {
                path: PathBuf::new(),
                source,
            })?;
        decode_data(&buffer).parse()
    }

    /// Bind the document to `path`, reading the file first if `load` is set.
    ///
    /// A successful load replaces all sections. On failure the document keeps its previous path
    /// and sections.
    ///
    /// # Errors
    ///
    /// Same as [`Ini::from_path`] when `load` is set; never fails otherwise.
    pub fn set_path<P: Into<PathBuf>>(&mut self, path: P, load: bool) -> Result<()> {
        let path = path.into();
        if load {
            self.sections = self::load(&path)?;
        }
        self.path = Some(path);
        Ok(())
    }

    /// Re-read the bound file, replacing all sections.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnavailable`] if no path is bound or the file cannot be read, or a
    /// parse error. The current sections are kept on failure.
    pub fn reload(&mut self) -> Result<()> {
        let path = self.bound_path().map_err(|source| Error::SourceUnavailable {
            path: PathBuf::new(),
            source,
        })?;
        self.sections = load(path)?;
        Ok(())
    }

    /// The bound file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Look up a section by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] if there is no such section.
    pub fn section(&self, name: &str) -> Result<&Section> {
        self.sections
            .get(name)
            .ok_or_else(|| Error::SectionNotFound {
                section: name.to_owned(),
            })
    }

    /// Look up the raw value of `key` in `section`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] or [`Error::KeyNotFound`].
    pub fn get(&self, section: &str, key: &str) -> Result<&str> {
        self.section(section)?.get(key)
    }

    /// Look up `key` in `section` and convert it to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`], [`Error::KeyNotFound`] or
    /// [`Error::ConversionFailed`].
    pub fn get_as<T: FromValue>(&self, section: &str, key: &str) -> Result<T> {
        self.section(section)?.get_as(key)
    }

    #[must_use]
    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Insert `section` under its own name, returning the section it replaced. Entries are not
    /// merged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySectionName`], [`Error::InvalidSectionName`] or
    /// [`Error::InvalidEntry`] if some part of the section would not read back unchanged once
    /// written: a name containing `]` or a line break, a key containing `=` or a line break, or
    /// a key or value with leading or trailing spaces. The document is left untouched.
    pub fn add_section(&mut self, section: Section) -> Result<Option<Section>> {
        section.check_writable()?;
        Ok(self.sections.insert(section.name().to_owned(), section))
    }

    /// Remove a section, shifting the later sections up one position.
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(name)
    }

    /// Sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    /// Section names in document order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Serialize the document into `writer`.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for section in self.sections.values() {
            write!(writer, "{section}")?;
        }
        writer.flush()
    }

    /// Write the document to the bound path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DestinationUnavailable`] if no path is bound or the file cannot be
    /// written.
    pub fn write(&self) -> Result<()> {
        let path = self
            .bound_path()
            .map_err(|source| Error::DestinationUnavailable {
                path: PathBuf::new(),
                source,
            })?;
        let unavailable = |source| Error::DestinationUnavailable {
            path: path.to_owned(),
            source,
        };

        let file = fs::File::create(path).map_err(unavailable)?;
        self.write_to(BufWriter::new(file)).map_err(unavailable)?;

        log::debug!("wrote {} sections to {}", self.len(), path.display());
        Ok(())
    }

    fn bound_path(&self) -> io::Result<&Path> {
        self.path().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no configuration path is bound")
        })
    }
}

impl FromStr for Ini {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Ok(Self {
            path: None,
            sections: Parser::new(text).into_sections()?,
        })
    }
}

/// Renders the document in INI syntax; parsing the output yields the same sections.
impl fmt::Display for Ini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.sections.values().try_for_each(|section| fmt::Display::fmt(section, f))
    }
}

impl<'a> IntoIterator for &'a Ini {
    type Item = &'a Section;
    type IntoIter = indexmap::map::Values<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.values()
    }
}

fn load(path: &Path) -> Result<IndexMap<String, Section>> {
    let data = fs::read(path).map_err(|source| Error::SourceUnavailable {
        path: path.to_owned(),
        source,
    })?;
    let sections = Parser::new(&decode_data(&data)).into_sections()?;

    log::debug!("loaded {} sections from {}", sections.len(), path.display());
    Ok(sections)
}

// Files are expected to be UTF-8; anything else is decoded lossily instead of failing the load.
fn decode_data(data: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(data)
}
