//! The schema coercion primitive.
//!
//! This module is purely structural: it validates that an already-parsed
//! JSON value matches a declared field specification and hands back a
//! [`CheckedFields`] map with typed accessors. It knows nothing about any
//! entity kind; the per-entity readers in `model/` declare a [`SchemaSpec`]
//! per API version and extract their fields from the coerced result.

use crate::core::domain::error::DeserializationError;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// The expected shape of a single JSON field.
#[derive(Debug, Clone)]
pub enum Shape {
    /// A JSON string.
    String,
    /// A signed integer. Permissive: accepts integral floats and numeric
    /// strings, since MAAS emits sizes both ways across versions.
    Int,
    /// An unsigned integer, with the same permissiveness as `Int`.
    Uint,
    /// A JSON boolean.
    Bool,
    /// A list whose elements are all strings.
    StringList,
    /// A list whose elements are all maps, each handed to a nested decoder.
    MapList,
    /// An opaque map, handed to a nested decoder later.
    Map,
    /// A map whose values are all strings (e.g. machine owner data).
    StringMap,
    /// Accepts JSON null as a sentinel; otherwise requires the inner shape.
    Nullable(Box<Shape>),
}

impl Shape {
    pub fn nullable(inner: Shape) -> Shape {
        Shape::Nullable(Box::new(inner))
    }

    fn expected(&self) -> &'static str {
        match self {
            Shape::String => "string",
            Shape::Int => "integer",
            Shape::Uint => "unsigned integer",
            Shape::Bool => "boolean",
            Shape::StringList => "list of strings",
            Shape::MapList => "list of maps",
            Shape::Map => "map",
            Shape::StringMap => "map of strings",
            Shape::Nullable(inner) => inner.expected(),
        }
    }

    /// Checks `value` against this shape and returns it in normalized form
    /// (integers as JSON numbers, everything else as received).
    fn check(&self, field: &str, value: &Value) -> Result<Value, DeserializationError> {
        let mismatch = || DeserializationError::Shape {
            field: field.to_string(),
            expected: self.expected(),
            actual: json_type_name(value).to_string(),
        };
        match self {
            Shape::String => match value {
                Value::String(_) => Ok(value.clone()),
                _ => Err(mismatch()),
            },
            Shape::Int => coerce_i64(value)
                .map(|n| Value::Number(n.into()))
                .ok_or_else(mismatch),
            Shape::Uint => coerce_u64(value)
                .map(|n| Value::Number(n.into()))
                .ok_or_else(mismatch),
            Shape::Bool => match value {
                Value::Bool(_) => Ok(value.clone()),
                _ => Err(mismatch()),
            },
            Shape::StringList => match value {
                Value::Array(items) if items.iter().all(Value::is_string) => Ok(value.clone()),
                _ => Err(mismatch()),
            },
            Shape::MapList => match value {
                Value::Array(items) if items.iter().all(Value::is_object) => Ok(value.clone()),
                _ => Err(mismatch()),
            },
            Shape::Map => match value {
                Value::Object(_) => Ok(value.clone()),
                _ => Err(mismatch()),
            },
            Shape::StringMap => match value {
                Value::Object(entries) if entries.values().all(Value::is_string) => {
                    Ok(value.clone())
                }
                _ => Err(mismatch()),
            },
            Shape::Nullable(inner) => match value {
                Value::Null => Ok(Value::Null),
                _ => inner.check(field, value),
            },
        }
    }
}

/// Permissive integer coercion: i64/u64 numbers, integral floats, and
/// numeric strings all qualify.
fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                    .map(|f| f as i64)
            }
        }
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Unsigned variant of the same coercion. Goes through `as_u64` first so
/// sizes above `i64::MAX` (common for large disks) are not rejected.
fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Some(u)
            } else {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            }
        }
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Human-readable JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

/// The specification for one field: its shape plus an optional default
/// substituted when the field is absent from the input map. Defaults apply
/// only to genuinely absent fields, never to malformed present ones.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    shape: Shape,
    default: Option<Value>,
}

impl FieldSpec {
    pub fn required(shape: Shape) -> Self {
        Self {
            shape,
            default: None,
        }
    }

    pub fn defaulted(shape: Shape, default: Value) -> Self {
        Self {
            shape,
            default: Some(default),
        }
    }
}

/// A declarative field map for one entity shape at one API version.
#[derive(Debug, Clone)]
pub struct SchemaSpec {
    fields: Vec<(&'static str, FieldSpec)>,
}

impl SchemaSpec {
    pub fn new(fields: Vec<(&'static str, FieldSpec)>) -> Self {
        Self { fields }
    }

    /// Validates `value` against this spec. All-or-nothing: the first
    /// failing field aborts the whole coercion. Unknown input fields are
    /// ignored so newer servers with extra fields still decode.
    pub fn coerce(&self, value: &Value) -> Result<CheckedFields, DeserializationError> {
        let input = value
            .as_object()
            .ok_or_else(|| DeserializationError::Value {
                expected: "map",
                actual: json_type_name(value).to_string(),
            })?;

        let mut checked = Map::new();
        for (name, spec) in &self.fields {
            match input.get(*name) {
                Some(raw) => {
                    checked.insert(name.to_string(), spec.shape.check(name, raw)?);
                }
                None => match &spec.default {
                    Some(default) => {
                        checked.insert(name.to_string(), default.clone());
                    }
                    None => return Err(DeserializationError::MissingField(name.to_string())),
                },
            }
        }
        Ok(CheckedFields { fields: checked })
    }
}

/// The result of a successful coercion: every declared field is present in
/// normalized form. The typed accessors still return `Result` so that a
/// schema/accessor mismatch surfaces as a reported error, not a panic.
#[derive(Debug)]
pub struct CheckedFields {
    fields: Map<String, Value>,
}

impl CheckedFields {
    /// Raw access to a coerced field (used to hand `Map`/`MapList` values
    /// to nested decoders).
    pub fn field(&self, name: &str) -> Result<&Value, DeserializationError> {
        self.fields
            .get(name)
            .ok_or_else(|| DeserializationError::MissingField(name.to_string()))
    }

    fn typed<T>(
        &self,
        name: &str,
        expected: &'static str,
        extract: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<T, DeserializationError> {
        let value = self.field(name)?;
        extract(value).ok_or_else(|| DeserializationError::Shape {
            field: name.to_string(),
            expected,
            actual: json_type_name(value).to_string(),
        })
    }

    /// Returns a string field. JSON null (under a `Nullable` shape) reads
    /// as the empty string, the zero value for null-tolerant fields.
    pub fn string(&self, name: &str) -> Result<String, DeserializationError> {
        self.typed(name, "string", |v| match v {
            Value::Null => Some(String::new()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        })
    }

    pub fn u64(&self, name: &str) -> Result<u64, DeserializationError> {
        self.typed(name, "unsigned integer", |v| match v {
            Value::Null => Some(0),
            _ => v.as_u64(),
        })
    }

    pub fn i64(&self, name: &str) -> Result<i64, DeserializationError> {
        self.typed(name, "integer", |v| match v {
            Value::Null => Some(0),
            _ => v.as_i64(),
        })
    }

    pub fn bool(&self, name: &str) -> Result<bool, DeserializationError> {
        self.typed(name, "boolean", Value::as_bool)
    }

    pub fn string_list(&self, name: &str) -> Result<Vec<String>, DeserializationError> {
        self.typed(name, "list of strings", |v| {
            v.as_array().map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
        })
    }

    pub fn string_map(&self, name: &str) -> Result<HashMap<String, String>, DeserializationError> {
        self.typed(name, "map of strings", |v| {
            v.as_object().map(|entries| {
                entries
                    .iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
        })
    }

    /// Returns a map field that must not be null.
    pub fn map(&self, name: &str) -> Result<&Value, DeserializationError> {
        let value = self.field(name)?;
        if value.is_object() {
            Ok(value)
        } else {
            Err(DeserializationError::Shape {
                field: name.to_string(),
                expected: "map",
                actual: json_type_name(value).to_string(),
            })
        }
    }

    /// Returns a nullable map field: `None` when the server sent null or
    /// the defaulted field was absent.
    pub fn optional_map(&self, name: &str) -> Result<Option<&Value>, DeserializationError> {
        let value = self.field(name)?;
        match value {
            Value::Null => Ok(None),
            Value::Object(_) => Ok(Some(value)),
            _ => Err(DeserializationError::Shape {
                field: name.to_string(),
                expected: "map",
                actual: json_type_name(value).to_string(),
            }),
        }
    }
}
