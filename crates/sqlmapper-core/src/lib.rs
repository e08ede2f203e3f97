mod error;
pub use error::{Error, IntoError, Location};

pub mod mapper;
pub use mapper::Mapper;

pub mod stmt;

pub mod template;

/// A Result type alias that uses sqlmapper's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
