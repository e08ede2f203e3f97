use super::Value;

impl Value {
    /// Coerces the value to a declared result type name.
    ///
    /// Accepts short names (`string`, `int`, `long`, `double`, `boolean`,
    /// `date`, `timestamp`, ...) as well as qualified names such as
    /// `java.lang.Integer`; only the last dotted segment is considered and
    /// case is ignored. Null, unknown type names and values that fail to
    /// parse are returned unchanged.
    pub fn coerce(self, ty: &str) -> Value {
        let name = ty.rsplit('.').next().unwrap_or(ty).trim().to_ascii_lowercase();

        let coerced = match name.as_str() {
            _ if self.is_null() => None,
            "string" | "str" | "varchar" | "char" | "text" => self.coerce_string(),
            "int" | "integer" | "i32" | "short" | "byte" => self
                .to_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(Value::I32),
            "long" | "bigint" | "i64" => self.to_i64().map(Value::I64),
            "double" | "float" | "decimal" | "bigdecimal" | "numeric" | "f64" | "real" => {
                self.to_f64().map(Value::F64)
            }
            "boolean" | "bool" | "bit" => self.coerce_bool().map(Value::Bool),
            "date" | "localdate" => self.to_date().map(Value::Date),
            "datetime" | "timestamp" | "localdatetime" => self.to_date_time().map(Value::DateTime),
            _ => None,
        };

        coerced.unwrap_or(self)
    }

    fn coerce_string(&self) -> Option<Value> {
        match self {
            Value::String(_) => Some(self.clone()),
            _ if self.is_scalar() => Some(Value::String(self.to_string())),
            _ => None,
        }
    }

    fn coerce_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            Value::I32(_) | Value::I64(_) | Value::F64(_) => Some(self.is_truthy()),
            Value::String(v) => match v.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "1" => Some(true),
                "false" | "f" | "no" | "n" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}
