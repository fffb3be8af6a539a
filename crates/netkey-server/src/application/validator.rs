//! Declarative checking of decoded request bodies.
//!
//! A [`Schema`] lists required and optional top-level fields with the JSON
//! kind each must have. [`validate`] reports every problem at once as a
//! field → reason map, so a client fixing a request sees all of them.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Reason recorded for a missing required field.
pub const MISSING_FIELD: &str = "Required key not found";

/// Key used when the body itself is not an object.
pub const BODY_FIELD: &str = "body";

/// Field → reason. Empty means the body is acceptable.
pub type ValidationErrors = BTreeMap<String, String>;

/// JSON value kinds a field may be required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    /// Integer or floating point. Booleans are not numbers.
    Number,
    Boolean,
    List,
}

impl ValueKind {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            ValueKind::String => value.is_string(),
            ValueKind::Number => value.is_number(),
            ValueKind::Boolean => value.is_boolean(),
            ValueKind::List => value.is_array(),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::List => "list",
        })
    }
}

/// Expected shape of a request body.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub required: &'static [(&'static str, ValueKind)],
    pub optional: &'static [(&'static str, ValueKind)],
}

/// `type`: `data` text, optional `layout` and per-character `wait`.
pub const TYPE_SCHEMA: Schema = Schema {
    required: &[("data", ValueKind::String)],
    optional: &[("layout", ValueKind::String), ("wait", ValueKind::Number)],
};

/// `type_keycodes`: `data` list, optional `wait` and `separate`.
pub const KEYCODES_SCHEMA: Schema = Schema {
    required: &[("data", ValueKind::List)],
    optional: &[("wait", ValueKind::Number), ("separate", ValueKind::Boolean)],
};

/// Checks `body` against `schema`. Unknown fields are ignored.
pub fn validate(body: &Value, schema: &Schema) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let Some(object) = body.as_object() else {
        errors.insert(
            BODY_FIELD.to_string(),
            "Request body must be a JSON object".to_string(),
        );
        return errors;
    };

    for &(field, kind) in schema.required {
        match object.get(field) {
            None => {
                errors.insert(field.to_string(), MISSING_FIELD.to_string());
            }
            Some(value) if !kind.matches(value) => {
                errors.insert(field.to_string(), type_error(field, kind));
            }
            Some(_) => {}
        }
    }

    for &(field, kind) in schema.optional {
        if let Some(value) = object.get(field) {
            if !kind.matches(value) {
                errors.insert(field.to_string(), type_error(field, kind));
            }
        }
    }

    errors
}

fn type_error(field: &str, kind: ValueKind) -> String {
    format!("Key: {field} must be of type: {kind}")
}
