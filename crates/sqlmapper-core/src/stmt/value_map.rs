use super::Value;

/// Insertion-ordered map of named values.
///
/// Used both for map-shaped parameters and for raw result rows, where the
/// key is the column label reported by the driver.
pub type ValueMap = indexmap::IndexMap<String, Value>;
