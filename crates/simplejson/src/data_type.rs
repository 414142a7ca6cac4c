use std::fmt;

use serde_json::Value;

/// Classification of a stored JSON value.
///
/// Integers (signed or unsigned) are [`DataType::Int`]; numbers with a
/// fractional representation are [`DataType::Float`].
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use simplejson::DataType;
///
/// assert_eq!(DataType::of(&json!(14)), DataType::Int);
/// assert_eq!(DataType::of(&json!(1.5)), DataType::Float);
/// assert_eq!(DataType::of(&json!(null)), DataType::Null);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int,
    Float,
    String,
    Object,
    Array,
    Boolean,
    Null,
}

impl DataType {
    pub fn of(value: &Value) -> DataType {
        match value {
            Value::Null => DataType::Null,
            Value::Bool(_) => DataType::Boolean,
            Value::Number(n) if n.is_f64() => DataType::Float,
            Value::Number(_) => DataType::Int,
            Value::String(_) => DataType::String,
            Value::Array(_) => DataType::Array,
            Value::Object(_) => DataType::Object,
        }
    }

    /// Whether `value` is classified as this type.
    pub fn is_type(self, value: &Value) -> bool {
        DataType::of(value) == self
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Int => "INT",
            DataType::Float => "FLOAT",
            DataType::String => "STRING",
            DataType::Object => "OBJECT",
            DataType::Array => "ARRAY",
            DataType::Boolean => "BOOLEAN",
            DataType::Null => "NULL",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
