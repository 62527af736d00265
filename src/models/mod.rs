//! Typed in-memory representations of Fakturoid resources.
//!
//! Every model is a flat attribute bag keyed by API field name. Values are
//! coerced on the way in (see [`value`]) according to the per-resource
//! [`schema::FieldSchema`], and the writable subset is serialized back on
//! save. Local mutation is unrestricted; read-only enforcement happens only
//! on serialization.

pub mod schema;
pub mod value;

mod documents;

pub use documents::{Expense, Generator, Invoice, InvoiceLine};
pub use value::{FieldMap, FieldValue, JsonMap};

use schema::FieldSchema;
use std::fmt;

/// Registry of resource types, keyed to their endpoint path segments.
/// Resolved explicitly at call sites by the per-resource services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Account settings.
    Account,
    /// Bank accounts.
    BankAccount,
    /// Subjects (contacts).
    Subject,
    /// Issued invoices.
    Invoice,
    /// Received expenses.
    Expense,
    /// Invoice generators.
    Generator,
    /// Invoice messages, nested under an invoice.
    InvoiceMessage,
    /// Invoice payments, nested under an invoice.
    InvoicePayment,
}

impl ResourceKind {
    /// Endpoint path segment for this resource. Nested resources (messages,
    /// payments) return their leaf segment; the services compose the full
    /// nested path.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::BankAccount => "bank_accounts",
            Self::Subject => "subjects",
            Self::Invoice => "invoices",
            Self::Expense => "expenses",
            Self::Generator => "generators",
            Self::InvoiceMessage => "message",
            Self::InvoicePayment => "payments",
        }
    }
}

/// Two-way mapping between one JSON resource and its attribute bag.
pub trait Resource: Default {
    /// Field-level rules for this resource.
    fn schema() -> &'static FieldSchema;

    /// The attribute bag.
    fn fields(&self) -> &FieldMap;

    /// The attribute bag, mutable.
    fn fields_mut(&mut self) -> &mut FieldMap;

    /// Builds an instance from a server JSON object.
    fn from_fields(fields: JsonMap) -> Self {
        let mut model = Self::default();
        model.update(fields);
        model
    }

    /// Merges incoming server fields, applying the coercion rules.
    fn update(&mut self, incoming: JsonMap) {
        value::merge(self.fields_mut(), incoming, Self::schema());
    }

    /// Serializes the writable attribute set for submission.
    fn payload(&self) -> JsonMap {
        value::serialize(self.fields(), Self::schema())
    }

    /// Server-assigned identity; `None` until persisted.
    fn id(&self) -> Option<i64> {
        self.fields().get("id").and_then(FieldValue::as_int)
    }

    /// Reads one field.
    fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields().get(field)
    }

    /// Writes one field locally. Read-only rules apply on serialization,
    /// not here.
    fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields_mut().insert(field.into(), value.into());
    }
}

/// Account settings, loaded from the singleton `account` endpoint.
#[derive(Debug, Clone, Default)]
pub struct Account {
    fields: FieldMap,
}

/// Bank account attached to the account.
#[derive(Debug, Clone, Default)]
pub struct BankAccount {
    fields: FieldMap,
}

/// Subject: a customer or supplier contact.
#[derive(Debug, Clone, Default)]
pub struct Subject {
    fields: FieldMap,
}

/// Email message attached to an invoice.
#[derive(Debug, Clone, Default)]
pub struct InvoiceMessage {
    fields: FieldMap,
}

/// Payment recorded against an invoice.
#[derive(Debug, Clone, Default)]
pub struct InvoicePayment {
    fields: FieldMap,
}

macro_rules! flat_resource {
    ($type:ty, $schema:expr) => {
        impl $type {
            /// Creates an empty instance.
            pub fn new() -> Self {
                Self::default()
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
        }
    };
}

flat_resource!(Account, &schema::ACCOUNT);
flat_resource!(BankAccount, &schema::BANK_ACCOUNT);
flat_resource!(Subject, &schema::SUBJECT);
flat_resource!(InvoiceMessage, &schema::INVOICE_MESSAGE);
flat_resource!(InvoicePayment, &schema::INVOICE_PAYMENT);

impl Account {
    /// Account display name.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(FieldValue::as_str)
    }
}

impl BankAccount {
    /// Bank account display name.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(FieldValue::as_str)
    }
}

impl Subject {
    /// Contact name.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(FieldValue::as_str)
    }
}

impl InvoiceMessage {
    /// Email subject line.
    pub fn subject(&self) -> Option<&str> {
        self.get("subject").and_then(FieldValue::as_str)
    }
}

impl InvoicePayment {
    /// Date the payment was made.
    pub fn paid_on(&self) -> Option<chrono::NaiveDate> {
        self.get("paid_on").and_then(FieldValue::as_date)
    }

    /// Paid amount.
    pub fn amount(&self) -> Option<rust_decimal::Decimal> {
        self.get("amount").and_then(FieldValue::as_decimal)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or_default())
    }
}

impl fmt::Display for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or_default())
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or_default())
    }
}

impl fmt::Display for InvoiceMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subject().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn subject_fields() -> JsonMap {
        json!({
            "id": 28,
            "user_id": 1,
            "name": "Apple Czech s.r.o.",
            "street": "Pernerova 691/42",
            "city": "Praha",
            "custom_id": "apple-1",
            "created_at": "2023-01-02T10:00:00+01:00",
            "updated_at": "2023-06-30T11:30:00+02:00",
            "html_url": "https://app.fakturoid.cz/applecorp/subjects/28"
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_from_fields_coerces() {
        let subject = Subject::from_fields(subject_fields());

        assert_eq!(subject.id(), Some(28));
        assert_eq!(subject.name(), Some("Apple Czech s.r.o."));
        assert!(subject
            .get("created_at")
            .and_then(FieldValue::as_datetime)
            .is_some());
    }

    #[test]
    fn test_unpersisted_model_has_no_id() {
        let mut subject = Subject::new();
        subject.set("name", "New Co");
        assert_eq!(subject.id(), None);
    }

    #[test]
    fn test_payload_round_trip_is_idempotent_for_writable_fields() {
        let subject = Subject::from_fields(subject_fields());
        let payload = subject.payload();

        let reconstructed = Subject::from_fields(payload.clone());
        assert_eq!(reconstructed.payload(), payload);
    }

    #[test]
    fn test_readonly_excluded_even_after_local_mutation() {
        let mut subject = Subject::from_fields(subject_fields());
        subject.set("html_url", "https://forged.example");
        subject.set("id", 999);

        let payload = subject.payload();
        assert!(!payload.contains_key("html_url"));
        assert!(!payload.contains_key("id"));
        // the local value itself did change
        assert_eq!(subject.id(), Some(999));
    }

    #[test]
    fn test_registry_endpoints() {
        assert_eq!(ResourceKind::Subject.endpoint(), "subjects");
        assert_eq!(ResourceKind::Invoice.endpoint(), "invoices");
        assert_eq!(ResourceKind::Account.endpoint(), "account");
        assert_eq!(ResourceKind::InvoiceMessage.endpoint(), "message");
    }

    #[test]
    fn test_payment_accessors() {
        let payment = InvoicePayment::from_fields(
            json!({"id": 5, "paid_on": "2023-11-08", "amount": "605.0"})
                .as_object()
                .unwrap()
                .clone(),
        );

        assert_eq!(
            payment.paid_on(),
            chrono::NaiveDate::from_ymd_opt(2023, 11, 8)
        );
        assert_eq!(payment.amount().unwrap().to_string(), "605.0");
    }
}
