use super::Error;

/// Where in a mapper document a load-time error was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// File the document was read from, when loaded from disk
    pub file: Option<String>,

    /// Namespace of the document, once known
    pub namespace: Option<String>,

    /// Statement, fragment or result map id
    pub statement: Option<String>,
}

impl Location {
    pub fn namespace(namespace: impl Into<String>) -> Location {
        Location {
            namespace: Some(namespace.into()),
            ..Location::default()
        }
    }

    pub fn file(mut self, file: impl Into<String>) -> Location {
        self.file = Some(file.into());
        self
    }

    pub fn statement(mut self, id: impl Into<String>) -> Location {
        self.statement = Some(id.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.file.is_none() && self.namespace.is_none() && self.statement.is_none()
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut s = "";

        if let Some(file) = &self.file {
            write!(f, "{s}file `{file}`")?;
            s = ", ";
        }

        if let Some(namespace) = &self.namespace {
            write!(f, "{s}namespace `{namespace}`")?;
            s = ", ";
        }

        if let Some(statement) = &self.statement {
            write!(f, "{s}statement `{statement}`")?;
        }

        Ok(())
    }
}

/// Error when a mapper document cannot be loaded.
///
/// This occurs when:
/// - The document is not well-formed markup
/// - A statement body contains an unknown or unterminated tag
/// - An `include` references an unknown fragment or forms a cycle
/// - A statement id is declared twice within one namespace
///
/// Loading of the offending document is aborted; documents already loaded are
/// left untouched.
#[derive(Debug)]
pub(super) struct InvalidMapper {
    location: Location,
    message: Box<str>,
}

impl std::error::Error for InvalidMapper {}

impl core::fmt::Display for InvalidMapper {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.location.is_empty() {
            write!(f, "invalid mapper: {}", self.message)
        } else {
            write!(f, "invalid mapper ({}): {}", self.location, self.message)
        }
    }
}

impl Error {
    /// Creates an invalid mapper error.
    pub fn invalid_mapper(location: Location, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidMapper(InvalidMapper {
            location,
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid mapper error.
    pub fn is_invalid_mapper(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidMapper(_))
    }

    /// Returns the location of an invalid mapper error.
    pub fn mapper_location(&self) -> Option<&Location> {
        match self.kind() {
            super::ErrorKind::InvalidMapper(err) => Some(&err.location),
            _ => None,
        }
    }
}
