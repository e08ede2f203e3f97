use crate::Flavor;

use serde::Deserialize;
use sqlmapper_core::template::{EmptyCollection, Options};

/// Engine-wide settings.
///
/// Usually set through [`Builder`](crate::Builder); also deserializable so a
/// host can embed it in its own configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Positional marker syntax
    pub flavor: Flavor,

    /// What `foreach` does with an empty collection
    pub empty_collection: EmptyCollection,

    /// Collapse whitespace runs in generated SQL to a single space
    pub shrink_whitespace: bool,

    /// Auto-mapped columns such as `created_at` become `createdAt`
    pub map_underscore_to_camel_case: bool,
}

impl Settings {
    pub(crate) fn template_options(&self) -> Options {
        Options {
            empty_collection: self.empty_collection,
        }
    }
}
