//! simplejson - typed access to JSON objects and arrays.
//!
//! Wraps `serde_json` containers with two things:
//!
//! - a closed family of typed readers ([`JsonObject::get`],
//!   [`JsonObject::get_or_null`] and their [`JsonArray`] counterparts) that
//!   convert a stored value to the requested Rust type or fail with a typed
//!   [`JsonError`];
//! - a block-scoped builder ([`build`]) for assembling nested objects without
//!   juggling intermediate containers.
//!
//! Parsing and serialization are delegated to `serde_json`. Object keys keep
//! insertion order.
//!
//! # Example
//!
//! ```
//! use simplejson::{build, JsonError, JsonObject};
//!
//! let json = build(|o| {
//!     o.put("a", "x")?;
//!     o.put_object("b", |b| {
//!         b.put("c", 14)?;
//!         b.put("d", "y")?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//!
//! assert_eq!(json.get::<String>("a")?, "x");
//! assert_eq!(json.get::<JsonObject>("b")?.get::<i32>("c")?, 14);
//! assert_eq!(json.to_string(), r#"{"a":"x","b":{"c":14,"d":"y"}}"#);
//! # Ok::<(), JsonError>(())
//! ```

mod array;
mod builder;
mod data_type;
mod error;
mod into_json;
mod object;
mod path;
mod pretty;
mod typed;

pub use array::JsonArray;
pub use builder::{build, build_array, ArrayBuilder, ObjectBuilder};
pub use data_type::DataType;
pub use error::{JsonError, Location};
pub use into_json::IntoJson;
pub use object::JsonObject;
pub use pretty::PrettyConfig;
pub use typed::{resolve_type, FromJson};

// Re-export the value model for callers that build raw values.
pub use serde_json::{Map, Value};
