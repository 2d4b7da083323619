//! Validated order documents
//!
//! An order JSON document is checked against an embedded JSON Schema
//! (draft 7) and then converted into a typed [`Order`]. Failures come back as
//! a structured [`OrderError`]; [`load_order`] collapses them into `None` for
//! callers that treat an invalid document as an expected outcome.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use jsonschema::{Draft, JSONSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::Error;

/// Tried in order against the normalised timestamp; `%.f` also matches no fraction
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// JSON Schema for order documents
pub fn order_schema() -> Value {
    serde_json::json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Order",
        "type": "object",
        "required": ["name", "created_at", "price"],
        "properties": {
            "name": { "type": "string" },
            "created_at": { "type": "string" },
            "price": { "type": "integer", "exclusiveMinimum": 0 }
        }
    })
}

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// JSON Pointer to the offending value (empty for the document root)
    pub instance_path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Order validation errors
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{} schema violation(s): {}", .0.len(), join_violations(.0))]
    Violations(Vec<Violation>),

    #[error("created_at is not a valid date-time: {0}")]
    Timestamp(String),
}

/// A validated order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub name: String,
    pub created_at: NaiveDateTime,
    /// Always greater than zero
    pub price: i64,
}

#[derive(Deserialize)]
struct RawOrder {
    name: String,
    created_at: String,
    price: i64,
}

impl TryFrom<RawOrder> for Order {
    type Error = OrderError;

    fn try_from(raw: RawOrder) -> Result<Self, Self::Error> {
        let created_at = parse_timestamp(&raw.created_at)
            .ok_or_else(|| OrderError::Timestamp(raw.created_at.clone()))?;
        Ok(Self {
            name: raw.name,
            created_at,
            price: raw.price,
        })
    }
}

/// Rewrite an extended ISO-8601 date-time into the shape of [`NAIVE_FORMAT`]
/// (plus offset): `T`, `t` or a space as separator, seconds defaulted when only
/// `HH:MM` is given, and a `Z`/`z` suffix spelled as `+00:00`.
fn normalise_timestamp(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let date = raw.get(..10)?;
    if !matches!(raw.get(10..11)?, "T" | "t" | " ") {
        return None;
    }

    let mut time = raw.get(11..)?.to_string();
    if let Some(rest) = time.strip_suffix('Z').or_else(|| time.strip_suffix('z')) {
        time = format!("{}+00:00", rest);
    }
    time.get(..5)?;
    if time.get(5..6) != Some(":") {
        time.insert_str(5, ":00");
    }

    Some(format!("{}T{}", date, time))
}

/// Parse an ISO-8601 timestamp; values carrying an offset are normalised to UTC
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let normalised = normalise_timestamp(raw)?;

    for format in OFFSET_FORMATS {
        if let Ok(with_offset) = DateTime::parse_from_str(&normalised, format) {
            return Some(with_offset.naive_utc());
        }
    }
    NaiveDateTime::parse_from_str(&normalised, NAIVE_FORMAT).ok()
}

/// Compiled order schema
pub struct OrderValidator {
    schema: JSONSchema,
}

impl OrderValidator {
    pub fn new() -> crate::Result<Self> {
        let schema = order_schema();
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema)
            .map_err(|e| Error::InvalidSchema(e.to_string()))?;
        Ok(Self { schema: compiled })
    }

    /// Validate an already-parsed JSON value
    pub fn validate_value(&self, value: &Value) -> Result<Order, OrderError> {
        if let Err(errors) = self.schema.validate(value) {
            let violations: Vec<Violation> = errors
                .map(|e| Violation {
                    instance_path: e.instance_path.to_string(),
                    message: e.to_string(),
                })
                .collect();
            return Err(OrderError::Violations(violations));
        }

        // Integral floats such as 200.0 satisfy "type": "integer"
        if value.get("price").and_then(Value::as_i64).is_none() {
            return Err(OrderError::Violations(vec![Violation {
                instance_path: "/price".to_string(),
                message: format!("{} is not a 64-bit integer", value["price"]),
            }]));
        }

        let raw: RawOrder = serde_json::from_value(value.clone())?;
        Order::try_from(raw)
    }

    /// Validate a JSON document held in memory
    pub fn validate_str(&self, content: &str) -> Result<Order, OrderError> {
        let value: Value = serde_json::from_str(content)?;
        self.validate_value(&value)
    }

    /// Read and validate a JSON document from disk
    pub fn validate_file(&self, path: impl AsRef<Path>) -> Result<Order, OrderError> {
        let content = fs::read_to_string(path.as_ref())?;
        self.validate_str(&content)
    }
}

/// Load an order, yielding `None` when the file is unreadable or invalid
pub fn load_order(path: impl AsRef<Path>) -> Option<Order> {
    let path = path.as_ref();
    let validator = match OrderValidator::new() {
        Ok(validator) => validator,
        Err(e) => {
            tracing::error!(error = %e, "order schema failed to compile");
            return None;
        }
    };

    match validator.validate_file(path) {
        Ok(order) => {
            tracing::debug!(path = %path.display(), name = %order.name, "order validated");
            Some(order)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "order rejected");
            None
        }
    }
}
