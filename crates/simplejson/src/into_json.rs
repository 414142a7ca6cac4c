use serde_json::{Number, Value};

use crate::array::JsonArray;
use crate::error::JsonError;
use crate::object::JsonObject;

/// A value that can be stored in a [`JsonObject`] or [`JsonArray`].
///
/// Conversion is fallible: floats without a JSON representation (NaN and
/// infinities) are rejected with [`JsonError::NonFiniteNumber`].
pub trait IntoJson {
    fn into_json(self) -> Result<Value, JsonError>;
}

impl IntoJson for Value {
    fn into_json(self) -> Result<Value, JsonError> {
        Ok(self)
    }
}

impl IntoJson for JsonObject {
    fn into_json(self) -> Result<Value, JsonError> {
        Ok(Value::Object(self.into_map()))
    }
}

impl IntoJson for JsonArray {
    fn into_json(self) -> Result<Value, JsonError> {
        Ok(Value::Array(self.into_values()))
    }
}

impl IntoJson for String {
    fn into_json(self) -> Result<Value, JsonError> {
        Ok(Value::String(self))
    }
}

impl IntoJson for &str {
    fn into_json(self) -> Result<Value, JsonError> {
        Ok(Value::String(self.to_owned()))
    }
}

impl IntoJson for &String {
    fn into_json(self) -> Result<Value, JsonError> {
        Ok(Value::String(self.clone()))
    }
}

impl IntoJson for bool {
    fn into_json(self) -> Result<Value, JsonError> {
        Ok(Value::Bool(self))
    }
}

macro_rules! impl_into_json_int {
    ($($ty:ty),*) => {
        $(
            impl IntoJson for $ty {
                fn into_json(self) -> Result<Value, JsonError> {
                    Ok(Value::Number(Number::from(self)))
                }
            }
        )*
    };
}

impl_into_json_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl IntoJson for f64 {
    fn into_json(self) -> Result<Value, JsonError> {
        Number::from_f64(self)
            .map(Value::Number)
            .ok_or(JsonError::NonFiniteNumber(self))
    }
}

impl IntoJson for f32 {
    fn into_json(self) -> Result<Value, JsonError> {
        f64::from(self).into_json()
    }
}

/// `None` is stored as an explicit null.
impl<T: IntoJson> IntoJson for Option<T> {
    fn into_json(self) -> Result<Value, JsonError> {
        match self {
            Some(value) => value.into_json(),
            None => Ok(Value::Null),
        }
    }
}

impl<T: IntoJson> IntoJson for Vec<T> {
    fn into_json(self) -> Result<Value, JsonError> {
        self.into_iter()
            .map(IntoJson::into_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}
