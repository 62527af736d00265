//! Invoice-like documents and their line items.
//!
//! Invoices, expenses and generators share one shape: a flat field bag plus
//! an ordered list of lines. Lines that arrived from the server are kept as
//! raw snapshots so a save can tell the server which of them were removed
//! locally (`_destroy` markers).

use crate::models::schema::{self, FieldSchema};
use crate::models::value::{self, FieldMap, FieldValue, JsonMap};
use crate::models::Resource;
use rust_decimal::Decimal;
use serde_json::Value as Json;
use std::fmt;

/// One line of an invoice, expense or generator.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLine {
    fields: FieldMap,
}

impl Default for InvoiceLine {
    fn default() -> Self {
        let mut fields = FieldMap::new();
        fields.insert("quantity".to_string(), FieldValue::Decimal(Decimal::ONE));
        Self { fields }
    }
}

impl InvoiceLine {
    /// Creates a line with the default quantity of one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line description.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(FieldValue::as_str)
    }

    /// Billed quantity.
    pub fn quantity(&self) -> Option<Decimal> {
        self.get("quantity").and_then(FieldValue::as_decimal)
    }

    /// Unit label, e.g. `"h"` or `"ks"`.
    pub fn unit_name(&self) -> Option<&str> {
        self.get("unit_name").and_then(FieldValue::as_str)
    }
}

impl Resource for InvoiceLine {
    fn schema() -> &'static FieldSchema {
        &schema::INVOICE_LINE
    }

    fn fields(&self) -> &FieldMap {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut FieldMap {
        &mut self.fields
    }
}

impl fmt::Display for InvoiceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name().unwrap_or_default();
        let quantity = self.quantity().unwrap_or(Decimal::ONE);
        match self.unit_name() {
            Some(unit) => write!(f, "{} {} {}", quantity, unit, name),
            None if quantity == Decimal::ONE => f.write_str(name),
            None => write!(f, "{} {}", quantity, name),
        }
    }
}

/// Merges incoming fields into a lined document, intercepting `lines`.
fn update_document(
    fields: &mut FieldMap,
    lines: &mut Vec<InvoiceLine>,
    loaded_lines: &mut Vec<JsonMap>,
    mut incoming: JsonMap,
    schema: &FieldSchema,
) {
    if let Some(raw) = incoming.remove("lines") {
        lines.clear();
        loaded_lines.clear();
        if let Json::Array(items) = raw {
            for item in items {
                if let Json::Object(map) = item {
                    if map.contains_key("id") {
                        loaded_lines.push(map.clone());
                    }
                    lines.push(InvoiceLine::from_fields(map));
                }
            }
        }
    }
    value::merge(fields, incoming, schema);
}

/// Serializes a lined document, appending `_destroy` markers for every
/// server-loaded line missing from the live line set.
fn document_payload(
    fields: &FieldMap,
    lines: &[InvoiceLine],
    loaded_lines: &[JsonMap],
    schema: &FieldSchema,
) -> JsonMap {
    let mut out = value::serialize(fields, schema);

    let mut serialized: Vec<Json> = lines
        .iter()
        .map(|line| Json::Object(line.payload()))
        .collect();

    let live_ids: Vec<i64> = lines.iter().filter_map(|line| line.id()).collect();
    for loaded in loaded_lines {
        if let Some(id) = loaded.get("id").and_then(Json::as_i64) {
            if !live_ids.contains(&id) {
                let mut marker = JsonMap::new();
                marker.insert("id".to_string(), Json::from(id));
                marker.insert("_destroy".to_string(), Json::Bool(true));
                serialized.push(Json::Object(marker));
            }
        }
    }

    if !serialized.is_empty() {
        out.insert("lines".to_string(), Json::Array(serialized));
    }
    out
}

/// Issued invoice.
#[derive(Debug, Clone, Default)]
pub struct Invoice {
    fields: FieldMap,
    lines: Vec<InvoiceLine>,
    loaded_lines: Vec<JsonMap>,
}

/// Received expense.
#[derive(Debug, Clone, Default)]
pub struct Expense {
    fields: FieldMap,
    lines: Vec<InvoiceLine>,
    loaded_lines: Vec<JsonMap>,
}

/// Recurring or template invoice generator.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    fields: FieldMap,
    lines: Vec<InvoiceLine>,
    loaded_lines: Vec<JsonMap>,
}

macro_rules! lined_document {
    ($type:ty, $schema:expr) => {
        impl $type {
            /// Creates an empty document.
            pub fn new() -> Self {
                Self::default()
            }

            /// Live lines, in order.
            pub fn lines(&self) -> &[InvoiceLine] {
                &self.lines
            }

            /// Live lines, mutable. Removing a server-loaded line here flags
            /// it for deletion on the next save.
            pub fn lines_mut(&mut self) -> &mut Vec<InvoiceLine> {
                &mut self.lines
            }

            /// Appends a line.
            pub fn add_line(&mut self, line: InvoiceLine) {
                self.lines.push(line);
            }
        }

        impl Resource for $type {
            fn schema() -> &'static FieldSchema {
                $schema
            }

            fn fields(&self) -> &FieldMap {
                &self.fields
            }

            fn fields_mut(&mut self) -> &mut FieldMap {
                &mut self.fields
            }

            fn update(&mut self, incoming: JsonMap) {
                update_document(
                    &mut self.fields,
                    &mut self.lines,
                    &mut self.loaded_lines,
                    incoming,
                    Self::schema(),
                );
            }

            fn payload(&self) -> JsonMap {
                document_payload(&self.fields, &self.lines, &self.loaded_lines, Self::schema())
            }
        }
    };
}

lined_document!(Invoice, &schema::INVOICE);
lined_document!(Expense, &schema::EXPENSE);
lined_document!(Generator, &schema::GENERATOR);

impl Invoice {
    /// Invoice number, assigned by the server.
    pub fn number(&self) -> Option<&str> {
        self.get("number").and_then(FieldValue::as_str)
    }
}

impl Expense {
    /// Expense number.
    pub fn number(&self) -> Option<&str> {
        self.get("number").and_then(FieldValue::as_str)
    }
}

impl Generator {
    /// Generator name.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(FieldValue::as_str)
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.number().unwrap_or_default())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.number().unwrap_or_default())
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::str::FromStr;

    fn invoice_fields() -> JsonMap {
        json!({
            "id": 40,
            "number": "2023-0108",
            "subject_id": 28,
            "due": 14,
            "issued_on": "2023-11-05",
            "sent_at": "2023-11-05T08:15:30+01:00",
            "total": "1210.0",
            "your_name": "Apple Czech s.r.o.",
            "lines": [
                {"id": 1001, "name": "Hard work", "quantity": "1", "unit_price": "1000.0"},
                {"id": 1002, "name": "Soft work", "quantity": "2", "unit_price": "500.0"}
            ]
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_line_default_quantity() {
        let line = InvoiceLine::new();
        assert_eq!(line.quantity(), Some(Decimal::ONE));
    }

    #[test]
    fn test_update_reconstructs_lines() {
        let invoice = Invoice::from_fields(invoice_fields());

        assert_eq!(invoice.id(), Some(40));
        assert_eq!(invoice.lines().len(), 2);
        assert_eq!(invoice.lines()[0].name(), Some("Hard work"));
        assert_eq!(
            invoice.lines()[1].quantity(),
            Some(Decimal::from_str("2").unwrap())
        );
        // lines never land in the flat field bag
        assert!(invoice.get("lines").is_none());
    }

    #[test]
    fn test_removed_line_flagged_for_destroy() {
        let mut invoice = Invoice::from_fields(invoice_fields());
        invoice.lines_mut().remove(0);

        let payload = invoice.payload();
        let lines = payload["lines"].as_array().unwrap();
        assert_eq!(lines.len(), 2);

        let marker = lines
            .iter()
            .find(|line| line.get("_destroy").is_some())
            .expect("destroy marker");
        assert_eq!(marker["id"], json!(1001));
        assert_eq!(marker["_destroy"], json!(true));
    }

    #[test]
    fn test_kept_lines_not_flagged() {
        let invoice = Invoice::from_fields(invoice_fields());

        let payload = invoice.payload();
        let lines = payload["lines"].as_array().unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.get("_destroy").is_none()));
    }

    #[test]
    fn test_payload_excludes_server_owned_fields() {
        let mut invoice = Invoice::from_fields(invoice_fields());
        // local mutation of a denormalized copy is allowed but never serialized
        invoice.set("your_name", "Someone Else");
        invoice.set("client_street", "Elsewhere 1");

        let payload = invoice.payload();
        assert!(!payload.contains_key("id"));
        assert!(!payload.contains_key("total"));
        assert!(!payload.contains_key("your_name"));
        assert!(!payload.contains_key("client_street"));
        assert!(payload.contains_key("number"));
        assert_eq!(payload["due"], json!(14));
        assert_eq!(payload["issued_on"], json!("2023-11-05"));
    }

    #[test]
    fn test_payload_without_lines_omits_key() {
        let mut invoice = Invoice::new();
        invoice.set("subject_id", 28);

        assert!(!invoice.payload().contains_key("lines"));
    }

    #[test]
    fn test_added_line_serialized_without_id() {
        let mut expense = Expense::new();
        let mut line = InvoiceLine::new();
        line.set("name", "Paper");
        line.set("unit_price", Decimal::from_str("89.90").unwrap());
        expense.add_line(line);

        let payload = expense.payload();
        let lines = payload["lines"].as_array().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["name"], json!("Paper"));
        assert_eq!(lines[0]["quantity"], json!("1"));
        assert_eq!(lines[0]["unit_price"], json!("89.90"));
        assert!(lines[0].get("id").is_none());
    }

    #[test]
    fn test_display() {
        let invoice = Invoice::from_fields(invoice_fields());
        assert_eq!(invoice.to_string(), "2023-0108");

        let mut line = InvoiceLine::new();
        line.set("name", "Consulting");
        line.set("quantity", Decimal::from_str("3").unwrap());
        line.set("unit_name", "h");
        assert_eq!(line.to_string(), "3 h Consulting");
    }
}
