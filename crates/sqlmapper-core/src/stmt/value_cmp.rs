//! Comparisons between values.
//!
//! `PartialEq` against Rust primitives keeps test assertions readable. The
//! loose comparisons back the `==`/`<`/... operators of test expressions.

use super::Value;

use std::cmp::Ordering;

macro_rules! impl_value_eq {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl PartialEq<$ty> for Value {
                fn eq(&self, other: &$ty) -> bool {
                    matches!(self, Value::$variant(val) if val == other)
                }
            }

            impl PartialEq<Value> for $ty {
                fn eq(&self, other: &Value) -> bool {
                    other.eq(self)
                }
            }
        )*
    };
}

impl_value_eq! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    f64 => F64,
    String => String,
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Value::String(val) if val == other)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::String(val) if val == other)
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other.eq(self)
    }
}

impl Value {
    /// Equality as used by `==` in test expressions.
    ///
    /// Null only equals null. When either side is a number both sides are
    /// coerced to `f64`; a side that cannot be coerced makes them unequal.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (lhs, rhs) if lhs.is_number() || rhs.is_number() => {
                match (lhs.to_f64(), rhs.to_f64()) {
                    (Some(lhs), Some(rhs)) => lhs == rhs,
                    _ => false,
                }
            }
            (Value::Date(_) | Value::DateTime(_), _) | (_, Value::Date(_) | Value::DateTime(_)) => {
                match (self.to_date_time(), other.to_date_time()) {
                    (Some(lhs), Some(rhs)) => lhs == rhs,
                    _ => false,
                }
            }
            (lhs, rhs) => lhs == rhs,
        }
    }

    /// Ordering as used by `<`, `>` and friends in test expressions.
    ///
    /// Dates order chronologically and two non-numeric strings order
    /// lexically; everything else is coerced to `f64`. `None` means the
    /// operands are not comparable.
    pub fn loose_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::String(lhs), Value::String(rhs)) => match (self.to_f64(), other.to_f64()) {
                (Some(lhs), Some(rhs)) => lhs.partial_cmp(&rhs),
                _ => Some(lhs.cmp(rhs)),
            },
            (Value::Date(_) | Value::DateTime(_), _) | (_, Value::Date(_) | Value::DateTime(_)) => {
                self.to_date_time()?.partial_cmp(&other.to_date_time()?)
            }
            _ => self.to_f64()?.partial_cmp(&other.to_f64()?),
        }
    }
}
