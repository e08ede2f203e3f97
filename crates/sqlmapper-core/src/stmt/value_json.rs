use super::{Value, ValueMap};
use crate::Result;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Number, Value as Json};

impl Value {
    /// Builds a parameter value from any serializable type.
    ///
    /// Structs and maps become [`Value::Map`], sequences become
    /// [`Value::List`]. This is the usual way to pass a typed parameter
    /// object to a statement.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
        Ok(Value::from(serde_json::to_value(value)?))
    }

    /// Converts the value to JSON.
    ///
    /// Records and maps become objects; dates are rendered as ISO-8601
    /// strings. Non-finite floats become `null`.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Null => Json::Null,
            Value::Bool(v) => Json::Bool(*v),
            Value::I32(v) => Json::from(*v),
            Value::I64(v) => Json::from(*v),
            Value::F64(v) => Number::from_f64(*v).map(Json::Number).unwrap_or(Json::Null),
            Value::String(v) => Json::String(v.clone()),
            Value::Date(v) => Json::String(v.format("%Y-%m-%d").to_string()),
            Value::DateTime(v) => Json::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => Json::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Value::Record(record) => Json::Object(
                record
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Deserializes the value into a typed Rust value, typically a projected
    /// record into the caller's row struct.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }
}

impl From<Json> for Value {
    fn from(value: Json) -> Self {
        match value {
            Json::Null => Value::Null,
            Json::Bool(v) => Value::Bool(v),
            Json::Number(v) => match v.as_i64() {
                Some(v) => Value::I64(v),
                None => v.as_f64().map(Value::F64).unwrap_or(Value::Null),
            },
            Json::String(v) => Value::String(v),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(fields) => Value::Map(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect::<ValueMap>(),
            ),
        }
    }
}
