//! Field values and the JSON coercion rules shared by all models.
//!
//! The API exchanges flat JSON objects whose string values follow a naming
//! convention: `*_at` fields carry ISO-8601 timestamps, `*_on`/`*_due`/
//! `*_date` fields carry calendar dates, and monetary fields (listed per
//! resource in its [`FieldSchema`]) carry decimals as strings. Coercion
//! applies on the way in; serialization reverses it on the way out.

use crate::models::schema::FieldSchema;
use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde_json::Value as Json;
use std::collections::BTreeMap;
use std::str::FromStr;

/// A JSON object as exchanged with the API.
pub type JsonMap = serde_json::Map<String, Json>;

/// The attribute bag of one model.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// A single coerced field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// JSON null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Monetary amount, exchanged as a string.
    Decimal(Decimal),
    /// Calendar date, exchanged as ISO-8601.
    Date(NaiveDate),
    /// Timestamp with offset, exchanged as ISO-8601.
    DateTime(DateTime<FixedOffset>),
    /// Plain text.
    Text(String),
    /// Nested array, kept uncoerced.
    Array(Vec<FieldValue>),
    /// Nested object, kept uncoerced.
    Object(JsonMap),
}

impl FieldValue {
    /// Returns the integer value, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the text value, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the decimal value, if this is a decimal.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the date value, if this is a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the timestamp value, if this is a timestamp.
    pub fn as_datetime(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// True for JSON null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTime(value)
    }
}

/// Converts raw JSON into a field value without applying coercion rules.
/// Used for nested arrays and array elements.
pub fn from_json(value: Json) -> FieldValue {
    match value {
        Json::Null => FieldValue::Null,
        Json::Bool(b) => FieldValue::Bool(b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Int(i)
            } else {
                FieldValue::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        Json::String(s) => FieldValue::Text(s),
        Json::Array(items) => FieldValue::Array(items.into_iter().map(from_json).collect()),
        Json::Object(map) => FieldValue::Object(map),
    }
}

/// Coerces one incoming JSON value according to the field name suffix and
/// the resource schema. Only non-empty strings are coerced; a string that
/// fails to parse is kept verbatim.
pub fn coerce(field: &str, value: Json, schema: &FieldSchema) -> FieldValue {
    let text = match value {
        Json::String(s) if !s.is_empty() => s,
        other => return from_json(other),
    };

    if field.ends_with("_at") {
        match DateTime::parse_from_rfc3339(&text) {
            Ok(dt) => FieldValue::DateTime(dt),
            Err(_) => FieldValue::Text(text),
        }
    } else if field.ends_with("_on") || field.ends_with("_due") || field.ends_with("_date") {
        match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
            Ok(d) => FieldValue::Date(d),
            Err(_) => match DateTime::parse_from_rfc3339(&text) {
                Ok(dt) => FieldValue::Date(dt.date_naive()),
                Err(_) => FieldValue::Text(text),
            },
        }
    } else if schema.is_decimal(field) {
        match Decimal::from_str(&text) {
            Ok(d) => FieldValue::Decimal(d),
            Err(_) => FieldValue::Text(text),
        }
    } else {
        FieldValue::Text(text)
    }
}

/// Serializes one field value back to JSON-compatible primitives.
pub fn to_json(value: &FieldValue) -> Json {
    match value {
        FieldValue::Null => Json::Null,
        FieldValue::Bool(b) => Json::Bool(*b),
        FieldValue::Int(i) => Json::from(*i),
        FieldValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .unwrap_or(Json::Null),
        FieldValue::Decimal(d) => Json::String(d.to_string()),
        FieldValue::Date(d) => Json::String(d.format("%Y-%m-%d").to_string()),
        FieldValue::DateTime(dt) => Json::String(dt.to_rfc3339()),
        FieldValue::Text(s) => Json::String(s.clone()),
        FieldValue::Array(items) => Json::Array(items.iter().map(to_json).collect()),
        FieldValue::Object(map) => Json::Object(map.clone()),
    }
}

/// Merges incoming server fields into an attribute bag, coercing values.
pub fn merge(map: &mut FieldMap, incoming: JsonMap, schema: &FieldSchema) {
    for (field, value) in incoming {
        let coerced = coerce(&field, value, schema);
        map.insert(field, coerced);
    }
}

/// Serializes the writable subset of an attribute bag.
pub fn serialize(map: &FieldMap, schema: &FieldSchema) -> JsonMap {
    let mut out = JsonMap::new();
    for (field, value) in map {
        if schema.is_writable(field) {
            out.insert(field.clone(), to_json(value));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schema;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_suffix_coercion() {
        let schema = &schema::INVOICE;

        let at = coerce("sent_at", json!("2023-11-05T08:15:30+01:00"), schema);
        assert_eq!(
            at.as_datetime().unwrap(),
            DateTime::parse_from_rfc3339("2023-11-05T08:15:30+01:00").unwrap()
        );

        let on = coerce("issued_on", json!("2023-11-05"), schema);
        assert_eq!(
            on.as_date().unwrap(),
            NaiveDate::from_ymd_opt(2023, 11, 5).unwrap()
        );

        let due = coerce("due", json!(14), schema);
        assert_eq!(due.as_int(), Some(14));
    }

    #[test]
    fn test_decimal_coercion_is_schema_driven() {
        let total = coerce("total", json!("1210.50"), &schema::INVOICE);
        assert_eq!(total.as_decimal().unwrap(), Decimal::from_str("1210.50").unwrap());

        // "total" is not a decimal field on subjects
        let not_listed = coerce("total", json!("1210.50"), &schema::SUBJECT);
        assert_eq!(not_listed.as_str(), Some("1210.50"));
    }

    #[test]
    fn test_unparseable_string_kept_verbatim() {
        let value = coerce("paid_at", json!("yesterdayish"), &schema::INVOICE);
        assert_eq!(value.as_str(), Some("yesterdayish"));
    }

    #[test]
    fn test_empty_string_not_coerced() {
        let value = coerce("issued_on", json!(""), &schema::INVOICE);
        assert_eq!(value.as_str(), Some(""));
    }

    #[test]
    fn test_nested_values_pass_through() {
        let value = coerce(
            "vat_rates_summary",
            json!([{"vat_rate": 21, "base": "1000.0"}]),
            &schema::INVOICE,
        );
        match value {
            FieldValue::Array(items) => assert_eq!(items.len(), 1),
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_serialization_round_trip() {
        let dt = DateTime::parse_from_rfc3339("2023-11-05T08:15:30+01:00").unwrap();
        assert_eq!(
            to_json(&FieldValue::DateTime(dt)),
            json!("2023-11-05T08:15:30+01:00")
        );
        assert_eq!(
            to_json(&FieldValue::Date(NaiveDate::from_ymd_opt(2023, 11, 5).unwrap())),
            json!("2023-11-05")
        );
        assert_eq!(
            to_json(&FieldValue::Decimal(Decimal::from_str("1210.50").unwrap())),
            json!("1210.50")
        );
        assert_eq!(to_json(&FieldValue::Int(42)), json!(42));
        assert_eq!(to_json(&FieldValue::Null), Json::Null);
    }

    #[test]
    fn test_serialize_skips_readonly() {
        let mut map = FieldMap::new();
        merge(
            &mut map,
            json!({"id": 7, "name": "Apple Czech s.r.o.", "html_url": "https://x"})
                .as_object()
                .unwrap()
                .clone(),
            &schema::SUBJECT,
        );

        let out = serialize(&map, &schema::SUBJECT);
        assert!(out.contains_key("name"));
        assert!(!out.contains_key("id"));
        assert!(!out.contains_key("html_url"));
    }
}
