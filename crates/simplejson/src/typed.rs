//! Typed reads of JSON values.
//!
//! The set of readable types is closed: [`String`], [`i32`], [`i64`], [`f64`],
//! [`f32`], [`bool`], [`JsonObject`] and [`JsonArray`]. Each implements the
//! sealed [`FromJson`] trait, so asking for anything else through
//! [`JsonObject::get`] is a compile error. The runtime path used by
//! [`JsonObject::get_as`] resolves the requested type against a small
//! `TypeId` registry of the same eight types and reports
//! [`JsonError::UnsupportedType`] for everything else.

use std::any::{type_name, Any, TypeId};

use serde_json::Value;

use crate::array::JsonArray;
use crate::data_type::DataType;
use crate::error::{JsonError, Location};
use crate::object::JsonObject;

mod private {
    pub trait Sealed {}
}

/// A type that a stored JSON value can be read as.
///
/// Conversions never parse strings or reinterpret booleans. Integer reads
/// fail when the number does not fit; `f64` accepts any number; `f32` is an
/// explicit narrowing of the `f64` read.
pub trait FromJson: private::Sealed + Sized {
    /// Name reported in type mismatch errors.
    const TYPE_NAME: &'static str;

    /// Returns `None` when the value's kind cannot satisfy `Self`.
    fn from_json(value: &Value) -> Option<Self>;
}

macro_rules! impl_from_json {
    ($ty:ty, $name:expr, |$value:ident| $body:expr) => {
        impl private::Sealed for $ty {}

        impl FromJson for $ty {
            const TYPE_NAME: &'static str = $name;

            fn from_json($value: &Value) -> Option<Self> {
                $body
            }
        }
    };
}

impl_from_json!(String, "String", |value| value.as_str().map(str::to_owned));
impl_from_json!(i32, "i32", |value| value
    .as_i64()
    .and_then(|n| i32::try_from(n).ok()));
impl_from_json!(i64, "i64", |value| value.as_i64());
impl_from_json!(f64, "f64", |value| value.as_f64());
impl_from_json!(f32, "f32", |value| value.as_f64().map(|n| n as f32));
impl_from_json!(bool, "bool", |value| value.as_bool());
impl_from_json!(JsonObject, "JsonObject", |value| value
    .as_object()
    .cloned()
    .map(JsonObject::from_map));
impl_from_json!(JsonArray, "JsonArray", |value| value
    .as_array()
    .cloned()
    .map(JsonArray::from_values));

fn mismatch(location: Location, expected: &'static str, value: &Value) -> JsonError {
    let found = DataType::of(value);
    tracing::debug!(%location, expected, %found, "typed read failed");
    JsonError::TypeMismatch {
        location,
        expected,
        found,
    }
}

pub(crate) fn read<T: FromJson>(
    value: &Value,
    location: impl FnOnce() -> Location,
) -> Result<T, JsonError> {
    T::from_json(value).ok_or_else(|| mismatch(location(), T::TYPE_NAME, value))
}

type Converter = fn(&Value) -> Option<Box<dyn Any>>;

struct Accessor {
    type_id: TypeId,
    name: &'static str,
    convert: Converter,
}

fn erased<T: FromJson + 'static>(value: &Value) -> Option<Box<dyn Any>> {
    T::from_json(value).map(|v| Box::new(v) as Box<dyn Any>)
}

fn accessor<T: FromJson + 'static>() -> Accessor {
    Accessor {
        type_id: TypeId::of::<T>(),
        name: T::TYPE_NAME,
        convert: erased::<T>,
    }
}

fn registry() -> [Accessor; 8] {
    [
        accessor::<String>(),
        accessor::<i32>(),
        accessor::<i64>(),
        accessor::<f64>(),
        accessor::<f32>(),
        accessor::<bool>(),
        accessor::<JsonObject>(),
        accessor::<JsonArray>(),
    ]
}

/// Checks that `T` is one of the readable types and returns its name.
///
/// # Errors
///
/// [`JsonError::UnsupportedType`] naming `T` when it has no accessor.
///
/// # Examples
///
/// ```
/// use simplejson::{resolve_type, JsonError};
///
/// assert_eq!(resolve_type::<i64>().unwrap(), "i64");
/// assert!(matches!(resolve_type::<u8>(), Err(JsonError::UnsupportedType("u8"))));
/// ```
pub fn resolve_type<T: 'static>() -> Result<&'static str, JsonError> {
    find_accessor::<T>().map(|accessor| accessor.name)
}

fn find_accessor<T: 'static>() -> Result<Accessor, JsonError> {
    registry()
        .into_iter()
        .find(|accessor| accessor.type_id == TypeId::of::<T>())
        .ok_or(JsonError::UnsupportedType(type_name::<T>()))
}

/// Unsigned read. Negative numbers, fractions and other kinds mismatch.
pub(crate) fn read_u64(
    value: &Value,
    location: impl FnOnce() -> Location,
) -> Result<u64, JsonError> {
    value
        .as_u64()
        .ok_or_else(|| mismatch(location(), "u64", value))
}

pub(crate) fn read_u32(
    value: &Value,
    location: impl FnOnce() -> Location,
) -> Result<u32, JsonError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| mismatch(location(), "u32", value))
}

pub(crate) fn read_dynamic<T: 'static>(
    value: &Value,
    location: impl FnOnce() -> Location,
) -> Result<T, JsonError> {
    let accessor = find_accessor::<T>()?;
    let converted =
        (accessor.convert)(value).ok_or_else(|| mismatch(location(), accessor.name, value))?;
    converted
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| JsonError::UnsupportedType(type_name::<T>()))
}
