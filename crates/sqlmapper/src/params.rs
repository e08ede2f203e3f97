use sqlmapper_core::stmt::Value;

/// Collects bound arguments while placeholders are rewritten.
pub trait Params {
    /// Appends an argument and returns its 1-based position.
    fn push(&mut self, value: &Value) -> Placeholder;
}

/// 1-based position of a bound argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}
