//! Introspection payload normalization.
//!
//! Two payload shapes are accepted:
//!
//! ```text
//! raw:      { "__schema": { … } }
//! wrapped:  { "data": { "__schema": { … } } }
//! ```
//!
//! The wrapped shape is checked first. A wrapped payload is also a JSON object
//! with arbitrary keys, so probing raw first could misidentify it.

use serde_json::Value;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::schema::Schema;

const SCHEMA_KEY: &str = "__schema";
const DATA_KEY: &str = "data";

/// Which of the two accepted shapes a payload had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntrospectionShape {
    /// `{ "__schema": … }`
    Raw,
    /// `{ "data": { "__schema": … } }`
    Wrapped,
}

/// A payload whose shape has been identified but whose schema is not yet
/// decoded.
#[derive(Debug, Clone)]
pub struct Introspection {
    shape: IntrospectionShape,
    schema: Value,
}

impl Introspection {
    /// Identifies the payload shape, taking the `__schema` object out of it.
    pub fn from_value(mut payload: Value) -> CoreResult<Self> {
        if let Some(schema) = payload
            .get_mut(DATA_KEY)
            .and_then(|data| data.get_mut(SCHEMA_KEY))
        {
            return Ok(Self {
                shape: IntrospectionShape::Wrapped,
                schema: schema.take(),
            });
        }
        if let Some(schema) = payload.get_mut(SCHEMA_KEY) {
            return Ok(Self {
                shape: IntrospectionShape::Raw,
                schema: schema.take(),
            });
        }
        Err(CoreError::malformed(describe_unrecognised(&payload)))
    }

    /// The identified shape.
    pub fn shape(&self) -> IntrospectionShape {
        self.shape
    }

    /// Decodes the `__schema` object. Values pass through unchanged.
    pub fn into_schema(self) -> CoreResult<Schema> {
        if !self.schema.is_object() {
            return Err(CoreError::malformed(format!(
                "`{SCHEMA_KEY}` is {}, expected an object",
                json_type(&self.schema)
            )));
        }
        Ok(serde_json::from_value(self.schema)?)
    }
}

/// Normalizes either payload shape into the canonical [`Schema`].
pub fn normalize(payload: Value) -> CoreResult<Schema> {
    let introspection = Introspection::from_value(payload)?;
    let shape = introspection.shape();
    let schema = introspection.into_schema()?;
    debug!(
        shape = ?shape,
        types = schema.types.len(),
        directives = schema.directives.len(),
        "Introspection normalized"
    );
    Ok(schema)
}

/// Parses JSON text and normalizes it.
pub fn normalize_str(payload: &str) -> CoreResult<Schema> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| CoreError::malformed(format!("payload is not valid JSON: {e}")))?;
    normalize(value)
}

fn describe_unrecognised(payload: &Value) -> String {
    match payload {
        Value::Object(map) if map.contains_key(DATA_KEY) => {
            format!("`{DATA_KEY}` present but has no `{SCHEMA_KEY}` field")
        }
        Value::Object(_) => format!("no `{SCHEMA_KEY}` at top level or under `{DATA_KEY}`"),
        other => format!("payload is {}, expected an object", json_type(other)),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
