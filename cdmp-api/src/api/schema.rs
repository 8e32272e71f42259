//! Declarative request checks
//!
//! Each route declares the method it accepts and the top-level body fields it
//! requires. Handlers call [`RequestSchema::verify`] before touching the
//! store, so a malformed request never reaches the handler body.

use axum::http::Method;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// JSON type a body field must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Bool,
    Array,
    Object,
}

impl FieldKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::Array => value.is_array(),
            FieldKind::Object => value.is_object(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Bool => "boolean",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// Why a request was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Method {actual} not allowed, expected {expected}")]
    WrongMethod { expected: Method, actual: Method },

    #[error("Request body is required")]
    MissingBody,

    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Field '{field}' must be of type {expected}")]
    WrongType {
        field: &'static str,
        expected: FieldKind,
    },

    /// Top-level shape was fine but the typed record did not decode
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// Method and required body fields for one route
#[derive(Debug, Clone)]
pub struct RequestSchema {
    pub method: Method,
    pub content: &'static [(&'static str, FieldKind)],
}

impl RequestSchema {
    /// Schema for a read-only route with no body
    pub const fn get() -> Self {
        Self {
            method: Method::GET,
            content: &[],
        }
    }

    /// Check a request against the schema
    ///
    /// The body is only inspected when the schema names fields.
    pub fn verify(&self, method: &Method, body: Option<&Value>) -> Result<(), SchemaError> {
        // HEAD is answered by the GET handler
        let accepted =
            *method == self.method || (self.method == Method::GET && *method == Method::HEAD);
        if !accepted {
            return Err(SchemaError::WrongMethod {
                expected: self.method.clone(),
                actual: method.clone(),
            });
        }

        if self.content.is_empty() {
            return Ok(());
        }

        let object = body
            .ok_or(SchemaError::MissingBody)?
            .as_object()
            .ok_or(SchemaError::NotAnObject)?;

        for &(field, kind) in self.content {
            let value = object.get(field).ok_or(SchemaError::MissingField(field))?;
            if !kind.matches(value) {
                return Err(SchemaError::WrongType {
                    field,
                    expected: kind,
                });
            }
        }

        Ok(())
    }
}

/// Parse a raw body as JSON, treating an empty body as absent
pub fn parse_body(bytes: &[u8]) -> Result<Option<Value>, SchemaError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(|e| SchemaError::InvalidJson(e.to_string()))
}
