//! A dynamic SQL mapper.
//!
//! Statements are declared in mapper documents, addressed as
//! `"<namespace>.<id>"`, and executed against a dynamic [`Value`] parameter
//! to produce a [`BoundStatement`]: SQL text with positional placeholders
//! plus the ordered arguments to bind. Rows fetched by the caller are shaped
//! back into records with [`Mappers::project`].
//!
//! ```
//! use sqlmapper::{stmt::ValueRecord, Mappers};
//!
//! # fn main() -> sqlmapper::Result<()> {
//! let mappers = Mappers::builder()
//!     .mapper_str(
//!         r#"<mapper namespace="users">
//!              <select id="find">SELECT * FROM users WHERE id = #{id}</select>
//!            </mapper>"#,
//!     )
//!     .build()?;
//!
//! let bound = mappers.select("users.find", &ValueRecord::new().field("id", 1i64).into())?;
//! assert_eq!(bound.sql, "SELECT * FROM users WHERE id = ?");
//! # Ok(())
//! # }
//! ```

mod bound;
pub use bound::BoundStatement;

mod exec;

mod flavor;
pub use flavor::Flavor;

pub mod mappers;
pub use mappers::{Builder, Mappers};

mod params;
pub use params::{Params, Placeholder};

mod project;
pub use project::Row;

mod settings;
pub use settings::Settings;

pub use sqlmapper_core::{
    mapper::{self, ResultMap, Statement, StatementKind},
    stmt::{self, Value},
    template::EmptyCollection,
    Error, Location, Mapper, Result,
};
