use super::Error;
use crate::mapper::StatementKind;

/// Error when a statement is invoked through the entry point of another kind,
/// e.g. a `select` statement passed to `insert`.
#[derive(Debug)]
pub(super) struct StatementKindMismatch {
    id: Box<str>,
    expected: StatementKind,
    actual: StatementKind,
}

impl std::error::Error for StatementKindMismatch {}

impl core::fmt::Display for StatementKindMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "statement kind mismatch: `{}` is a {} statement, expected {}",
            self.id, self.actual, self.expected
        )
    }
}

impl Error {
    pub fn statement_kind_mismatch(
        id: impl Into<String>,
        expected: StatementKind,
        actual: StatementKind,
    ) -> Error {
        Error::from(super::ErrorKind::StatementKindMismatch(
            StatementKindMismatch {
                id: id.into().into(),
                expected,
                actual,
            },
        ))
    }

    pub fn is_statement_kind_mismatch(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::StatementKindMismatch(_))
    }
}
