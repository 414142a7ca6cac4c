use std::borrow::Cow;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data_type::DataType;
use crate::error::{JsonError, Location};
use crate::into_json::IntoJson;
use crate::object::JsonObject;
use crate::path;
use crate::pretty::{self, PrettyConfig};
use crate::typed::{self, FromJson};

/// A dense, 0-indexed JSON array with typed accessors.
///
/// Indices past the end behave like missing keys on [`JsonObject`]: the plain
/// readers fail with [`JsonError::IndexOutOfRange`] and the `*_or_null`
/// readers return `None`.
///
/// # Examples
///
/// ```
/// use simplejson::JsonArray;
///
/// let arr = JsonArray::from_json(r#"["a", 2, null]"#).unwrap();
/// assert_eq!(arr.get::<String>(0).unwrap(), "a");
/// assert_eq!(arr.get::<i32>(1).unwrap(), 2);
/// assert_eq!(arr.get_or_null::<i32>(2).unwrap(), None);
/// assert!(arr.get::<i32>(3).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonArray(Vec<Value>);

impl JsonArray {
    /// Creates an empty array.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Wraps existing values.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Converts every item, failing on the first one that has no JSON form.
    pub fn from_items<I>(items: I) -> Result<Self, JsonError>
    where
        I: IntoIterator,
        I::Item: IntoJson,
    {
        items
            .into_iter()
            .map(IntoJson::into_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Unwraps the underlying values.
    pub fn into_values(self) -> Vec<Value> {
        self.0
    }

    /// Borrows the underlying values.
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Parses a JSON document whose root must be an array.
    pub fn from_json(json: &str) -> Result<Self, JsonError> {
        Self::try_from(serde_json::from_str::<Value>(json)?)
    }

    /// Byte-slice counterpart of [`JsonArray::from_json`].
    pub fn from_slice(json: &[u8]) -> Result<Self, JsonError> {
        Self::try_from(serde_json::from_slice::<Value>(json)?)
    }

    /// Reader counterpart of [`JsonArray::from_json`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, JsonError> {
        Self::try_from(serde_json::from_reader::<R, Value>(reader)?)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` when the index is past the end or holds null.
    pub fn is_null(&self, index: usize) -> bool {
        self.opt(index).is_none()
    }

    /// Whether the element at `index` is of type `data_type`. Indices past
    /// the end count as [`DataType::Null`].
    pub fn is_type(&self, index: usize, data_type: DataType) -> bool {
        data_type.is_type(self.0.get(index).unwrap_or(&Value::Null))
    }

    /// Returns the raw element at `index`, including an explicit null.
    pub fn get_value(&self, index: usize) -> Result<&Value, JsonError> {
        self.0.get(index).ok_or(JsonError::IndexOutOfRange {
            index,
            len: self.0.len(),
        })
    }

    /// Returns the element at `index`, or `None` when it is past the end or null.
    pub fn opt(&self, index: usize) -> Option<&Value> {
        self.0.get(index).filter(|value| !value.is_null())
    }

    /// Reads the element at `index` as `T`.
    ///
    /// # Errors
    ///
    /// [`JsonError::IndexOutOfRange`] or [`JsonError::TypeMismatch`].
    pub fn get<T: FromJson>(&self, index: usize) -> Result<T, JsonError> {
        typed::read(self.get_value(index)?, || Location::Index(index))
    }

    pub fn get_or_null<T: FromJson>(&self, index: usize) -> Result<Option<T>, JsonError> {
        self.opt(index)
            .map(|value| typed::read(value, || Location::Index(index)))
            .transpose()
    }

    pub fn get_or<T: FromJson>(&self, index: usize, default: T) -> Result<T, JsonError> {
        Ok(self.get_or_null(index)?.unwrap_or(default))
    }

    /// Runtime-resolved counterpart of [`JsonArray::get`]; see
    /// [`JsonObject::get_as`].
    pub fn get_as<T: 'static>(&self, index: usize) -> Result<T, JsonError> {
        typed::resolve_type::<T>()?;
        typed::read_dynamic(self.get_value(index)?, || Location::Index(index))
    }

    pub fn get_as_or_null<T: 'static>(&self, index: usize) -> Result<Option<T>, JsonError> {
        self.opt(index)
            .map(|value| typed::read_dynamic(value, || Location::Index(index)))
            .transpose()
    }

    fn lookup_pointer(&self, pointer: &str) -> Result<Option<Cow<'_, Value>>, JsonError> {
        let steps = path::parse_pointer(pointer)?;
        let Some((first, rest)) = steps.split_first() else {
            return Ok(Some(Cow::Owned(Value::Array(self.0.clone()))));
        };
        Ok(path::parse_index(first)
            .and_then(|index| self.0.get(index))
            .and_then(|value| path::walk(value, rest))
            .map(Cow::Borrowed))
    }

    /// Reads the value at a JSON Pointer (RFC 6901) as `T`. The first step
    /// must be an index into this array.
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

    /// Reads the string at `index`.
    pub fn get_string(&self, index: usize) -> Result<String, JsonError> {
        self.get(index)
    }

    /// Reads the number at `index` as an `i32`.
    pub fn get_int(&self, index: usize) -> Result<i32, JsonError> {
        self.get(index)
    }

    /// Reads the number at `index` as an `i64`.
    pub fn get_long(&self, index: usize) -> Result<i64, JsonError> {
        self.get(index)
    }

    /// Reads the number at `index` as a `u32`.
    pub fn get_unsigned_int(&self, index: usize) -> Result<u32, JsonError> {
        typed::read_u32(self.get_value(index)?, || Location::Index(index))
    }

    /// Reads the number at `index` as a `u64`.
    pub fn get_unsigned_long(&self, index: usize) -> Result<u64, JsonError> {
        typed::read_u64(self.get_value(index)?, || Location::Index(index))
    }

    /// Reads the number at `index` as an `f64`.
    pub fn get_double(&self, index: usize) -> Result<f64, JsonError> {
        self.get(index)
    }

    /// Reads the number at `index` narrowed to `f32`.
    pub fn get_float(&self, index: usize) -> Result<f32, JsonError> {
        self.get(index)
    }

    /// Reads the boolean at `index`.
    pub fn get_boolean(&self, index: usize) -> Result<bool, JsonError> {
        self.get(index)
    }

    /// Returns a copy of the nested object at `index`.
    pub fn get_object(&self, index: usize) -> Result<JsonObject, JsonError> {
        self.get(index)
    }

    /// Returns a copy of the nested array at `index`.
    pub fn get_array(&self, index: usize) -> Result<JsonArray, JsonError> {
        self.get(index)
    }

    /// Reads every element as `T`, stopping at the first failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use simplejson::JsonArray;
    ///
    /// let arr = JsonArray::from_json("[1, 2, 3]").unwrap();
    /// assert_eq!(arr.collect::<i64>().unwrap(), vec![1, 2, 3]);
    /// assert!(arr.collect::<String>().is_err());
    /// ```
    pub fn collect<T: FromJson>(&self) -> Result<Vec<T>, JsonError> {
        self.iter_as().collect()
    }

    /// Lazily reads each element as `T`.
    pub fn iter_as<T: FromJson>(&self) -> impl Iterator<Item = Result<T, JsonError>> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(index, value)| typed::read(value, || Location::Index(index)))
    }

    /// Iterates over the raw elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Appends `value`.
    pub fn push(&mut self, value: impl IntoJson) -> Result<(), JsonError> {
        self.0.push(value.into_json()?);
        Ok(())
    }

    /// Appends an explicit null.
    pub fn push_null(&mut self) {
        self.0.push(Value::Null);
    }

    /// Inserts `value` at `index`, shifting later elements right.
    ///
    /// # Errors
    ///
    /// [`JsonError::IndexOutOfRange`] when `index > len`.
    pub fn insert(&mut self, index: usize, value: impl IntoJson) -> Result<(), JsonError> {
        if index > self.0.len() {
            return Err(JsonError::IndexOutOfRange {
                index,
                len: self.0.len(),
            });
        }
        self.0.insert(index, value.into_json()?);
        Ok(())
    }

    /// Removes and returns the element at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Value, JsonError> {
        if index >= self.0.len() {
            return Err(JsonError::IndexOutOfRange {
                index,
                len: self.0.len(),
            });
        }
        Ok(self.0.remove(index))
    }

    /// Removes the first element equal to `value`. Returns whether one was
    /// found.
    pub fn remove_value(&mut self, value: &Value) -> bool {
        match self.0.iter().position(|item| item == value) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    /// Appends all elements of `other`.
    pub fn extend_from(&mut self, other: JsonArray) {
        self.0.extend(other.0);
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

impl fmt::Display for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for JsonArray {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

impl TryFrom<Value> for JsonArray {
    type Error = JsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(values) => Ok(Self(values)),
            other => Err(JsonError::UnexpectedRoot {
                expected: DataType::Array,
                found: DataType::of(&other),
            }),
        }
    }
}

impl From<Vec<Value>> for JsonArray {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl From<JsonArray> for Value {
    fn from(array: JsonArray) -> Self {
        Value::Array(array.0)
    }
}

impl IntoIterator for JsonArray {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonArray {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> JsonArray {
        JsonArray::from_json(r#"["x", 14, 1.5, true, null, {"k": 1}, [1, 2]]"#).unwrap()
    }

    #[test]
    fn test_typed_reads() {
        let arr = sample();
        assert_eq!(arr.get_string(0).unwrap(), "x");
        assert_eq!(arr.get_int(1).unwrap(), 14);
        assert_eq!(arr.get_long(1).unwrap(), 14);
        assert_eq!(arr.get_double(2).unwrap(), 1.5);
        assert_eq!(arr.get_float(2).unwrap(), 1.5);
        assert!(arr.get_boolean(3).unwrap());
        assert_eq!(arr.get_object(5).unwrap().get_int("k").unwrap(), 1);
        assert_eq!(arr.get_array(6).unwrap().collect::<i32>().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_out_of_range() {
        let arr = sample();
        assert!(matches!(
            arr.get::<i32>(7),
            Err(JsonError::IndexOutOfRange { index: 7, len: 7 })
        ));
        assert_eq!(arr.get_or_null::<i32>(7).unwrap(), None);
        assert!(arr.is_null(7));
        assert!(arr.is_type(7, DataType::Null));
    }

    #[test]
    fn test_null_element() {
        let arr = sample();
        assert!(arr.is_null(4));
        assert_eq!(arr.get_value(4).unwrap(), &Value::Null);
        assert_eq!(arr.get_or_null::<String>(4).unwrap(), None);
        assert!(matches!(
            arr.get::<String>(4),
            Err(JsonError::TypeMismatch {
                location: Location::Index(4),
                found: DataType::Null,
                ..
            })
        ));
        assert!(!arr.get_or(4, false).unwrap());
    }

    #[test]
    fn test_mismatch_reports_index() {
        let arr = sample();
        let err = arr.get::<bool>(0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to resolve value at index 0 to type bool: found STRING"
        );
    }

    #[test]
    fn test_iter_as_reports_each_element() {
        let arr = JsonArray::from_json(r#"[1, "two", 3]"#).unwrap();
        let results: Vec<_> = arr.iter_as::<i32>().collect();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &1);
        assert!(matches!(
            results[1],
            Err(JsonError::TypeMismatch { location: Location::Index(1), .. })
        ));
        assert_eq!(results[2].as_ref().unwrap(), &3);
        assert!(arr.collect::<i32>().is_err());
    }

    #[test]
    fn test_mutation() {
        let mut arr = JsonArray::new();
        arr.push(1).unwrap();
        arr.push("b").unwrap();
        arr.push_null();
        arr.insert(0, true).unwrap();
        arr.insert(4, 2.5).unwrap();
        assert_eq!(Value::from(arr.clone()), json!([true, 1, "b", null, 2.5]));

        assert!(matches!(
            arr.insert(9, 0),
            Err(JsonError::IndexOutOfRange { index: 9, len: 5 })
        ));
        assert_eq!(arr.remove(1).unwrap(), json!(1));
        assert!(arr.remove(10).is_err());
        assert!(arr.push(f64::NAN).is_err());
        assert_eq!(arr.len(), 4);

        arr.extend_from(JsonArray::from_items(["c", "d"]).unwrap());
        assert_eq!(Value::from(arr), json!([true, "b", null, 2.5, "c", "d"]));
    }

    #[test]
    fn test_remove_value_drops_first_match() {
        let mut arr = JsonArray::from_json(r#"[1, "a", {"k": 1}, "a"]"#).unwrap();
        assert!(arr.remove_value(&json!("a")));
        assert_eq!(Value::from(arr.clone()), json!([1, {"k": 1}, "a"]));
        assert!(arr.remove_value(&json!({"k": 1})));
        assert!(!arr.remove_value(&json!(2)));
        assert_eq!(Value::from(arr), json!([1, "a"]));
    }

    #[test]
    fn test_unsigned_reads() {
        let mut arr = JsonArray::new();
        arr.push(u64::MAX).unwrap();
        arr.push(-3).unwrap();
        arr.push(70_000_u32).unwrap();
        assert_eq!(arr.get_unsigned_long(0).unwrap(), u64::MAX);
        assert!(matches!(
            arr.get_unsigned_long(1),
            Err(JsonError::TypeMismatch { location: Location::Index(1), expected: "u64", .. })
        ));
        assert_eq!(arr.get_unsigned_int(2).unwrap(), 70_000);
        assert!(arr.get_unsigned_int(0).is_err());
        assert!(matches!(
            arr.get_unsigned_int(3),
            Err(JsonError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_from_items_fails_on_non_finite() {
        assert!(matches!(
            JsonArray::from_items([1.0, f64::NEG_INFINITY]),
            Err(JsonError::NonFiniteNumber(_))
        ));
    }

    #[test]
    fn test_get_at() {
        let arr = JsonArray::from_json(r#"[{"a": [5]}, null]"#).unwrap();
        assert_eq!(arr.get_at::<i64>("/0/a/0").unwrap(), 5);
        assert_eq!(arr.get_at_or_null::<i64>("/1").unwrap(), None);
        assert_eq!(arr.get_at_or_null::<i64>("/2").unwrap(), None);
        assert!(matches!(arr.get_at::<i64>("/x"), Err(JsonError::PathNotFound(_))));
        assert_eq!(arr.get_at::<JsonArray>("").unwrap(), arr);
    }

    #[test]
    fn test_get_as_runtime_dispatch() {
        let arr = sample();
        assert_eq!(arr.get_as::<i64>(1).unwrap(), 14);
        assert!(matches!(arr.get_as::<char>(0), Err(JsonError::UnsupportedType("char"))));
        assert_eq!(arr.get_as_or_null::<char>(4).unwrap(), None);
        assert_eq!(arr.get_as_or_null::<char>(99).unwrap(), None);
    }

    #[test]
    fn test_parse_and_print() {
        assert!(matches!(
            JsonArray::from_json("{}"),
            Err(JsonError::UnexpectedRoot {
                expected: DataType::Array,
                found: DataType::Object
            })
        ));
        let arr: JsonArray = "[1,\"a\",null]".parse().unwrap();
        assert_eq!(arr.to_string(), "[1,\"a\",null]");
        assert_eq!(arr.to_pretty_string().unwrap(), "[\n    1,\n    \"a\",\n    null\n]");
        assert_eq!(JsonArray::from_reader("[1]".as_bytes()).unwrap().len(), 1);
    }
}
