use std::io;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", .path.display())]
    DestinationUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line_number}: expected a section header or key = value, found {line:?}")]
    Malformed { line_number: usize, line: String },

    #[error("section name cannot be empty")]
    EmptySectionName { line_number: Option<usize> },

    #[error("section name {section:?} cannot be written as a header")]
    InvalidSectionName { section: String },

    #[error("entry {key:?} = {value:?} in section {section:?} cannot be written as a line")]
    InvalidEntry {
        section: String,
        key: String,
        value: String,
    },

    #[error("no section {section:?}")]
    SectionNotFound { section: String },

    #[error("no key {key:?} in section {section:?}")]
    KeyNotFound { section: String, key: String },

    #[error("conversion to {target} failed from value {value:?}")]
    ConversionFailed { value: String, target: &'static str },
}

impl Error {
    /// A section or key lookup missed.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SectionNotFound { .. } | Self::KeyNotFound { .. })
    }

    /// Lookup and conversion failures leave the document usable; everything else means the
    /// configuration itself is broken or unreachable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.is_not_found() || matches!(self, Self::ConversionFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_kinds_are_distinguishable() {
        let section = Error::SectionNotFound {
            section: "abc".to_owned(),
        };
        let key = Error::KeyNotFound {
            section: "abc".to_owned(),
            key: "val".to_owned(),
        };

        assert!(section.is_not_found() && key.is_not_found());
        assert_eq!(section.to_string(), "no section \"abc\"");
        assert_eq!(key.to_string(), "no key \"val\" in section \"abc\"");
    }

    #[test]
    fn fatal_kinds_are_not_recoverable() {
        let malformed = Error::Malformed {
            line_number: 4,
            line: "stray".to_owned(),
        };
        let missing = Error::SourceUnavailable {
            path: PathBuf::from("/path/to/nowhere.ini"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let conversion = Error::ConversionFailed {
            value: "nope".to_owned(),
            target: "i32",
        };

        assert!(!malformed.is_recoverable());
        assert!(!missing.is_recoverable());
        assert!(conversion.is_recoverable());
        assert_eq!(
            malformed.to_string(),
            "line 4: expected a section header or key = value, found \"stray\""
        );
    }
}
