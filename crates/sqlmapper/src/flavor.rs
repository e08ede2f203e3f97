use crate::Placeholder;

use serde::Deserialize;

/// Positional marker syntax of the target database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// `?`
    #[default]
    Mysql,

    /// `$1`, `$2`, ...
    Postgresql,

    /// `?1`, `?2`, ...
    Sqlite,
}

impl Flavor {
    pub(crate) fn write_placeholder(self, placeholder: Placeholder, dst: &mut String) {
        match self {
            Flavor::Mysql => dst.push('?'),
            Flavor::Postgresql => {
                dst.push('$');
                dst.push_str(&placeholder.0.to_string());
            }
            Flavor::Sqlite => {
                dst.push('?');
                dst.push_str(&placeholder.0.to_string());
            }
        }
    }
}
