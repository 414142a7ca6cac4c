use std::borrow::Cow;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::array::JsonArray;
use crate::data_type::DataType;
use crate::error::{JsonError, Location};
use crate::into_json::IntoJson;
use crate::path;
use crate::pretty::{self, PrettyConfig};
use crate::typed::{self, FromJson};

/// A JSON object with typed accessors.
///
/// Keys keep insertion order. Putting an existing key replaces its value in
/// place, so the key keeps its original position and the length does not
/// change. Removing a key shifts the keys after it without reordering them.
///
/// A key holding an explicit null is still present: [`JsonObject::has_key`]
/// is `true` for it and [`JsonObject::get_value`] returns [`Value::Null`].
/// The `*_or_null` readers treat a missing key and a null value alike.
///
/// # Examples
///
/// ```
/// use simplejson::JsonObject;
///
/// let mut obj = JsonObject::new();
/// obj.put("name", "simplejson").unwrap();
/// obj.put("stars", 14).unwrap();
/// obj.put_null("license");
///
/// assert_eq!(obj.get::<String>("name").unwrap(), "simplejson");
/// assert_eq!(obj.get::<i64>("stars").unwrap(), 14);
/// assert_eq!(obj.get_or_null::<String>("license").unwrap(), None);
/// assert_eq!(obj.get_or_null::<String>("homepage").unwrap(), None);
/// assert!(obj.get::<String>("stars").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonObject(Map<String, Value>);

impl JsonObject {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps an existing map.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Unwraps the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Borrows the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Parses a JSON document whose root must be an object.
    ///
    /// # Errors
    ///
    /// [`JsonError::Parse`] for malformed text, [`JsonError::UnexpectedRoot`]
    /// when the document is valid but not an object.
    pub fn from_json(json: &str) -> Result<Self, JsonError> {
        Self::try_from(serde_json::from_str::<Value>(json)?)
    }

    /// Byte-slice counterpart of [`JsonObject::from_json`].
    pub fn from_slice(json: &[u8]) -> Result<Self, JsonError> {
        Self::try_from(serde_json::from_slice::<Value>(json)?)
    }

    /// Reader counterpart of [`JsonObject::from_json`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, JsonError> {
        Self::try_from(serde_json::from_reader::<R, Value>(reader)?)
    }

    /// `true` when `key` is present, even if it holds null.
    pub fn has_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// `true` when the key is missing or holds null.
    pub fn is_null(&self, key: &str) -> bool {
        self.opt(key).is_none()
    }

    /// Whether the value under `key` is of type `data_type`. A missing key
    /// counts as [`DataType::Null`].
    pub fn is_type(&self, key: &str, data_type: DataType) -> bool {
        data_type.is_type(self.0.get(key).unwrap_or(&Value::Null))
    }

    /// Returns the raw value under `key`, including an explicit null.
    ///
    /// # Errors
    ///
    /// [`JsonError::MissingKey`] when the key is absent.
    pub fn get_value(&self, key: &str) -> Result<&Value, JsonError> {
        self.0
            .get(key)
            .ok_or_else(|| JsonError::MissingKey(key.to_string()))
    }

    /// Returns the raw value under `key`, or `None` when it is missing or null.
    pub fn opt(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    /// Reads the value under `key` as `T`.
    ///
    /// # Errors
    ///
    /// - [`JsonError::MissingKey`] when the key is absent.
    /// - [`JsonError::TypeMismatch`] when the stored value (including null)
    ///   cannot be read as `T`.
    pub fn get<T: FromJson>(&self, key: &str) -> Result<T, JsonError> {
        typed::read(self.get_value(key)?, || Location::from(key))
    }

    /// Reads the value under `key` as `T`, or `None` when it is missing or
    /// null. A null is never type checked against `T`.
    pub fn get_or_null<T: FromJson>(&self, key: &str) -> Result<Option<T>, JsonError> {
        self.opt(key)
            .map(|value| typed::read(value, || Location::from(key)))
            .transpose()
    }

    /// Like [`JsonObject::get_or_null`], falling back to `default`.
    pub fn get_or<T: FromJson>(&self, key: &str, default: T) -> Result<T, JsonError> {
        Ok(self.get_or_null(key)?.unwrap_or(default))
    }

    /// Reads the value under `key` as `T`, resolving `T` at runtime.
    ///
    /// The requested type is checked before the key is looked up.
    ///
    /// # Errors
    ///
    /// As [`JsonObject::get`], plus [`JsonError::UnsupportedType`] when `T`
    /// is not one of the readable types.
    pub fn get_as<T: 'static>(&self, key: &str) -> Result<T, JsonError> {
        typed::resolve_type::<T>()?;
        typed::read_dynamic(self.get_value(key)?, || Location::from(key))
    }

    /// Runtime-resolved counterpart of [`JsonObject::get_or_null`]. Missing
    /// and null entries return `None` before `T` is resolved.
    pub fn get_as_or_null<T: 'static>(&self, key: &str) -> Result<Option<T>, JsonError> {
        self.opt(key)
            .map(|value| typed::read_dynamic(value, || Location::from(key)))
            .transpose()
    }

    fn lookup_pointer(&self, pointer: &str) -> Result<Option<Cow<'_, Value>>, JsonError> {
        let steps = path::parse_pointer(pointer)?;
        let Some((first, rest)) = steps.split_first() else {
            return Ok(Some(Cow::Owned(Value::Object(self.0.clone()))));
        };
        Ok(self
            .0
            .get(first)
            .and_then(|value| path::walk(value, rest))
            .map(Cow::Borrowed))
    }

    /// Reads the value at a JSON Pointer (RFC 6901) as `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use simplejson::JsonObject;
    ///
    /// let obj = JsonObject::from_json(r#"{"a": {"b": [1, 2, 3]}}"#).unwrap();
    /// assert_eq!(obj.get_at::<i32>("/a/b/2").unwrap(), 3);
    /// ```
    ///
    /// # Errors
    ///
    /// [`JsonError::InvalidPointer`], [`JsonError::PathNotFound`] or
    /// [`JsonError::TypeMismatch`].
    pub fn get_at<T: FromJson>(&self, pointer: &str) -> Result<T, JsonError> {
        let value = self
            .lookup_pointer(pointer)?
            .ok_or_else(|| JsonError::PathNotFound(pointer.to_string()))?;
        typed::read(&value, || Location::Pointer(pointer.to_string()))
    }

    pub fn get_at_or_null<T: FromJson>(&self, pointer: &str) -> Result<Option<T>, JsonError> {
        match self.lookup_pointer(pointer)? {
            Some(value) if !value.is_null() => {
                typed::read(&value, || Location::Pointer(pointer.to_string())).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Reads the string under `key`.
    pub fn get_string(&self, key: &str) -> Result<String, JsonError> {
        self.get(key)
    }

    /// Reads the number under `key` as an `i32`.
    pub fn get_int(&self, key: &str) -> Result<i32, JsonError> {
        self.get(key)
    }

    /// Reads the number under `key` as an `i64`.
    pub fn get_long(&self, key: &str) -> Result<i64, JsonError> {
        self.get(key)
    }

    /// Reads the number under `key` as a `u32`.
    ///
    /// # Errors
    ///
    /// [`JsonError::TypeMismatch`] for negative, fractional or out-of-range
    /// numbers and for any other kind.
    pub fn get_unsigned_int(&self, key: &str) -> Result<u32, JsonError> {
        typed::read_u32(self.get_value(key)?, || Location::from(key))
    }

    /// Reads the number under `key` as a `u64`, covering the range above
    /// `i64::MAX` that [`JsonObject::get_long`] rejects.
    pub fn get_unsigned_long(&self, key: &str) -> Result<u64, JsonError> {
        typed::read_u64(self.get_value(key)?, || Location::from(key))
    }

    /// Reads the number under `key` as an `f64`.
    pub fn get_double(&self, key: &str) -> Result<f64, JsonError> {
        self.get(key)
    }

    /// Reads the number under `key` narrowed to `f32`.
    pub fn get_float(&self, key: &str) -> Result<f32, JsonError> {
        self.get(key)
    }

    /// Reads the boolean under `key`.
    pub fn get_boolean(&self, key: &str) -> Result<bool, JsonError> {
        self.get(key)
    }

    /// Returns a copy of the nested object under `key`.
    pub fn get_object(&self, key: &str) -> Result<JsonObject, JsonError> {
        self.get(key)
    }

    /// Returns a copy of the nested array under `key`.
    pub fn get_array(&self, key: &str) -> Result<JsonArray, JsonError> {
        self.get(key)
    }

    /// Stores `value` under `key` and returns the value it replaced.
    ///
    /// # Errors
    ///
    /// Propagates the conversion failure of `value`; the object is left
    /// unchanged in that case.
    pub fn put(
        &mut self,
        key: impl Into<String>,
        value: impl IntoJson,
    ) -> Result<Option<Value>, JsonError> {
        let value = value.into_json()?;
        Ok(self.0.insert(key.into(), value))
    }

    /// Stores an explicit null under `key`.
    pub fn put_null(&mut self, key: impl Into<String>) -> Option<Value> {
        self.0.insert(key.into(), Value::Null)
    }

    /// Stores the serde representation of `value` under `key`.
    pub fn put_serialized<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Option<Value>, JsonError> {
        let value = serde_json::to_value(value)?;
        Ok(self.0.insert(key.into(), value))
    }

    /// Removes `key`, keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> + '_ {
        self.0.keys()
    }

    /// Values in key order.
    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.0.values()
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the object has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compact JSON encoding.
    pub fn to_json(&self) -> Result<Vec<u8>, JsonError> {
        Ok(serde_json::to_vec(&self.0)?)
    }

    /// Pretty JSON text with four-space indentation.
    pub fn to_pretty_string(&self) -> Result<String, JsonError> {
        self.to_string_with(&PrettyConfig::default())
    }

    /// Pretty JSON text using `config`.
    pub fn to_string_with(&self, config: &PrettyConfig) -> Result<String, JsonError> {
        pretty::to_pretty_string(&self.0, config)
    }
}

impl fmt::Display for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for JsonObject {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

impl TryFrom<Value> for JsonObject {
    type Error = JsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(JsonError::UnexpectedRoot {
                expected: DataType::Object,
                found: DataType::of(&other),
            }),
        }
    }
}

impl From<Map<String, Value>> for JsonObject {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<JsonObject> for Value {
    fn from(object: JsonObject) -> Self {
        Value::Object(object.0)
    }
}

impl IntoIterator for JsonObject {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonObject {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
