use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::JsonError;

/// Pretty printer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrettyConfig {
    /// Written once per nesting level.
    pub indent: String,
}

impl PrettyConfig {
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self::with_indent("    ")
    }
}

pub(crate) fn to_pretty_string<T: Serialize + ?Sized>(
    value: &T,
    config: &PrettyConfig,
) -> Result<String, JsonError> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(config.indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
