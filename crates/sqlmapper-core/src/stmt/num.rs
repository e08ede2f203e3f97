use super::Value;

macro_rules! impl_num {
    (
        $(
            $variant:ident($ty:ty) {
                $( $from:ty ),*
            }
        )*
    ) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<&$ty> for Value {
                fn from(value: &$ty) -> Self {
                    Self::$variant(*value)
                }
            }

            $(
                impl From<$from> for Value {
                    fn from(value: $from) -> Self {
                        Self::$variant(value.into())
                    }
                }
            )*
        )*
    };
}

impl_num! {
    I32(i32) {
        i8, i16, u8, u16
    }
    I64(i64) {
        u32
    }
    F64(f64) {
        f32
    }
}

impl Value {
    /// Coerces the value to a floating point number for numeric comparison.
    ///
    /// Numbers convert directly and strings are parsed after trimming.
    /// Anything else is not coercible.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::I32(v) => Some(f64::from(*v)),
            Self::I64(v) => Some(*v as f64),
            Self::F64(v) => Some(*v),
            Self::String(v) => v.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Converts integral values to `i64`. Floats are accepted only when they
    /// have no fractional part.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Self::I32(v) => Some(i64::from(*v)),
            Self::I64(v) => Some(*v),
            Self::F64(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            Self::String(v) => v.trim().parse::<i64>().ok(),
            _ => None,
        }
    }
}

impl TryFrom<usize> for Value {
    type Error = crate::Error;

    fn try_from(value: usize) -> crate::Result<Self> {
        i64::try_from(value)
            .map(Value::I64)
            .map_err(|_| crate::err!("value {value} cannot be converted to I64"))
    }
}
