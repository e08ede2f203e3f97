use super::Error;

/// Error when a projection references a result map that is not loaded.
#[derive(Debug)]
pub(super) struct ResultMapNotFound {
    id: Box<str>,
}

impl std::error::Error for ResultMapNotFound {}

impl core::fmt::Display for ResultMapNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "result map not found: {}", self.id)
    }
}

impl Error {
    pub fn result_map_not_found(id: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ResultMapNotFound(ResultMapNotFound {
            id: id.into().into(),
        }))
    }

    pub fn is_result_map_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ResultMapNotFound(_))
    }
}
