//! Generic BSON to JSON encoding
//!
//! Documents are decoded without a schema and re-encoded as
//! [`serde_json::Value`]. Types with a natural JSON form map to it directly;
//! everything else falls back to relaxed Extended JSON.

use bson::{Bson, Document as BsonDocument};
use docstream_common::{DocstreamError, Result};
use serde_json::{Map, Number, Value};

/// Convert a single BSON value to JSON
pub fn to_json_value(value: Bson) -> Result<Value> {
    let json = match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::Double(f) => double_to_json(f)?,
        Bson::String(s) => Value::String(s),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(dt.try_to_rfc3339_string()?),
        Bson::Array(items) => Value::Array(
            items
                .into_iter()
                .map(to_json_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        Bson::Document(doc) => document_to_json(doc)?,
        other => other.into_relaxed_extjson(),
    };
    Ok(json)
}

/// Whole doubles below 1e21 print without a fraction (`10.0` -> `10`),
/// larger ones keep the exponent form. NaN and infinities are rejected.
fn double_to_json(f: f64) -> Result<Value> {
    if !f.is_finite() {
        return Err(DocstreamError::Serialization(format!("unsupported value: {}", f)));
    }
    if f.fract() == 0.0 && f.abs() < 1e21 {
        if f.abs() < 9.0e18 {
            return Ok(Value::from(f as i64));
        }
        if f > 0.0 && f < 1.8e19 {
            return Ok(Value::from(f as u64));
        }
    }
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| DocstreamError::Serialization(format!("unsupported value: {}", f)))
}

/// Convert a whole document to a JSON object
pub fn document_to_json(doc: BsonDocument) -> Result<Value> {
    let mut map = Map::with_capacity(doc.len());
    for (key, value) in doc {
        map.insert(key, to_json_value(value)?);
    }
    Ok(Value::Object(map))
}

/// Encode a document as one line of JSON (no trailing newline)
pub fn to_json_line(doc: BsonDocument) -> Result<String> {
    Ok(serde_json::to_string(&document_to_json(doc)?)?)
}
