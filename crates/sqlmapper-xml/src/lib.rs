//! Reads mapper documents into [`Mapper`]s.
//!
//! A document is read into an owned markup tree, `<include>` references are
//! substituted, and every statement body is compiled to a
//! [`Node`](sqlmapper_core::template::Node) tree. Every problem is reported
//! as an [`invalid_mapper`](sqlmapper_core::Error::invalid_mapper) error
//! carrying the file, namespace and statement it was found in.

mod body;
mod document;
mod element;
mod include;
pub use include::FragmentSource;
mod result_map;

use sqlmapper_core::{bail, Mapper, Result};

/// Reads a mapper document that does not include fragments from other
/// namespaces.
pub fn parse(src: &str) -> Result<Mapper> {
    Parser::new().parse(src)
}

/// Mapper document parser.
#[derive(Default)]
pub struct Parser<'a> {
    file: Option<String>,
    fragments: Option<&'a dyn FragmentSource>,
}

impl<'a> Parser<'a> {
    pub fn new() -> Parser<'a> {
        Parser::default()
    }

    /// Names the file the document is read from, for error messages.
    pub fn file(mut self, file: impl Into<String>) -> Parser<'a> {
        self.file = Some(file.into());
        self
    }

    /// Resolves includes of fragments in other namespaces through `fragments`.
    pub fn fragments(mut self, fragments: &'a dyn FragmentSource) -> Parser<'a> {
        self.fragments = Some(fragments);
        self
    }

    pub fn parse(&self, src: &str) -> Result<Mapper> {
        document::parse(src, self.file.as_deref(), self.fragments)
    }
}

impl core::fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Parser")
            .field("file", &self.file)
            .field("fragments", &self.fragments.is_some())
            .finish()
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("`{name}` must be `true` or `false`, found `{value}`"),
    }
}
