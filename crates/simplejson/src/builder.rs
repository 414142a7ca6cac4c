//! Block-scoped construction of nested JSON trees.
//!
//! A builder scope exclusively owns the container it fills. Blocks receive
//! the scope as `&mut`, so a scope can neither escape its block nor be shared.
//! A nested block runs to completion and its container is inserted into the
//! parent before the parent block continues.
//!
//! Errors raised inside a block (for example a non-finite float) abort the
//! block through `?` and the partially built container is dropped; [`build`]
//! only returns a value once the whole block has succeeded.
//!
//! # Examples
//!
//! ```
//! use simplejson::{build, JsonObject};
//!
//! let obj = build(|o| {
//!     o.put("someKey", "someValue")?;
//!     o.put_object("someObject", |inner| {
//!         inner.put("someKey", 14)?;
//!         inner.put("someOtherKey", "someOtherValue")?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! assert_eq!(obj.get::<String>("someKey").unwrap(), "someValue");
//! let inner = obj.get::<JsonObject>("someObject").unwrap();
//! assert_eq!(inner.get::<i32>("someKey").unwrap(), 14);
//! ```

use serde_json::Value;

use crate::array::JsonArray;
use crate::error::JsonError;
use crate::into_json::IntoJson;
use crate::object::JsonObject;

/// Construction scope for one JSON object.
#[derive(Debug)]
pub struct ObjectBuilder {
    object: JsonObject,
    depth: usize,
}

/// Construction scope for one JSON array.
#[derive(Debug)]
pub struct ArrayBuilder {
    array: JsonArray,
    depth: usize,
}

fn nested_object<F>(depth: usize, block: F) -> Result<JsonObject, JsonError>
where
    F: FnOnce(&mut ObjectBuilder) -> Result<(), JsonError>,
{
    let mut scope = ObjectBuilder {
        object: JsonObject::new(),
        depth,
    };
    block(&mut scope)?;
    Ok(scope.object)
}

fn nested_array<F>(depth: usize, block: F) -> Result<JsonArray, JsonError>
where
    F: FnOnce(&mut ArrayBuilder) -> Result<(), JsonError>,
{
    let mut scope = ArrayBuilder {
        array: JsonArray::new(),
        depth,
    };
    block(&mut scope)?;
    Ok(scope.array)
}

impl ObjectBuilder {
    /// Stores `value` under `key`, returning the value it replaced.
    pub fn put(
        &mut self,
        key: impl Into<String>,
        value: impl IntoJson,
    ) -> Result<Option<Value>, JsonError> {
        self.object.put(key, value)
    }

    pub fn put_null(&mut self, key: impl Into<String>) -> Option<Value> {
        self.object.put_null(key)
    }

    /// Builds a nested object with `block` and stores it under `key`.
    ///
    /// Nothing is stored when `block` fails.
    pub fn put_object<F>(
        &mut self,
        key: impl Into<String>,
        block: F,
    ) -> Result<Option<Value>, JsonError>
    where
        F: FnOnce(&mut ObjectBuilder) -> Result<(), JsonError>,
    {
        let key = key.into();
        let depth = self.depth + 1;
        tracing::trace!(key = %key, depth, "opening nested object scope");
        let nested = nested_object(depth, block)?;
        tracing::trace!(
            key = %key,
            depth,
            entries = nested.len(),
            "closing nested object scope"
        );
        self.object.put(key, nested)
    }

    /// Builds a nested array with `block` and stores it under `key`.
    pub fn put_array<F>(
        &mut self,
        key: impl Into<String>,
        block: F,
    ) -> Result<Option<Value>, JsonError>
    where
        F: FnOnce(&mut ArrayBuilder) -> Result<(), JsonError>,
    {
        let key = key.into();
        let depth = self.depth + 1;
        tracing::trace!(key = %key, depth, "opening nested array scope");
        let nested = nested_array(depth, block)?;
        self.object.put(key, nested)
    }

    pub fn len(&self) -> usize {
        self.object.len()
    }

    pub fn is_empty(&self) -> bool {
        self.object.is_empty()
    }

    /// Nesting level of this scope; the root scope is 0.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl ArrayBuilder {
    pub fn push(&mut self, value: impl IntoJson) -> Result<(), JsonError> {
        self.array.push(value)
    }

    pub fn push_null(&mut self) {
        self.array.push_null();
    }

    /// Builds an object with `block` and appends it.
    pub fn push_object<F>(&mut self, block: F) -> Result<(), JsonError>
    where
        F: FnOnce(&mut ObjectBuilder) -> Result<(), JsonError>,
    {
        let depth = self.depth + 1;
        tracing::trace!(index = self.array.len(), depth, "opening nested object scope");
        let nested = nested_object(depth, block)?;
        self.array.push(nested)
    }

    pub fn push_array<F>(&mut self, block: F) -> Result<(), JsonError>
    where
        F: FnOnce(&mut ArrayBuilder) -> Result<(), JsonError>,
    {
        let depth = self.depth + 1;
        tracing::trace!(index = self.array.len(), depth, "opening nested array scope");
        let nested = nested_array(depth, block)?;
        self.array.push(nested)
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Runs `block` against a fresh root scope and returns the finished object.
///
/// # Errors
///
/// Returns the first error raised inside `block`.
pub fn build<F>(block: F) -> Result<JsonObject, JsonError>
where
    F: FnOnce(&mut ObjectBuilder) -> Result<(), JsonError>,
{
    let object = nested_object(0, block)?;
    tracing::trace!(entries = object.len(), "built object");
    Ok(object)
}

/// Array counterpart of [`build`].
pub fn build_array<F>(block: F) -> Result<JsonArray, JsonError>
where
    F: FnOnce(&mut ArrayBuilder) -> Result<(), JsonError>,
{
    let array = nested_array(0, block)?;
    tracing::trace!(len = array.len(), "built array");
    Ok(array)
}
