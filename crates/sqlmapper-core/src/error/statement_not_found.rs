use super::Error;

/// Error when an execution addresses a statement id that is not loaded.
#[derive(Debug)]
pub(super) struct StatementNotFound {
    id: Box<str>,
}

impl std::error::Error for StatementNotFound {}

impl core::fmt::Display for StatementNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "statement not found: {}", self.id)
    }
}

impl Error {
    /// Creates a statement not found error for the fully qualified id.
    pub fn statement_not_found(id: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::StatementNotFound(StatementNotFound {
            id: id.into().into(),
        }))
    }

    /// Returns `true` if this error is a statement not found error.
    pub fn is_statement_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::StatementNotFound(_))
    }
}
