//! Per-resource API adapters.
//!
//! Each service binds one resource type to its endpoint and translates
//! CRUD and domain operations into HTTP calls. Services borrow the client
//! and are cheap to create through the accessors on
//! [`FakturoidClient`](crate::client::FakturoidClient).

pub mod account;
pub mod bank_accounts;
pub mod events;
pub mod expenses;
pub mod filters;
pub mod generators;
pub mod invoices;
pub mod messages;
pub mod payments;
pub mod subjects;

pub use account::AccountService;
pub use bank_accounts::BankAccountsService;
pub use events::{ArgKind, EventArgs, EventValue, ExpenseEvent, InvoiceEvent};
pub use expenses::ExpensesService;
pub use filters::{
    ExpenseFilters, ExpenseStatus, FilterTime, GeneratorFilters, InvoiceFilters, InvoiceStatus,
    SubjectFilters,
};
pub use generators::GeneratorsService;
pub use invoices::InvoicesService;
pub use messages::MessagesService;
pub use payments::PaymentsService;
pub use subjects::SubjectsService;

use crate::client::ApiResponse;
use crate::errors::{FakturoidError, FakturoidResult};
use crate::models::{JsonMap, Resource};
use serde_json::Value as Json;

/// Unpacks a response expected to carry one JSON object.
pub(crate) fn object_from(response: ApiResponse, endpoint: &str) -> FakturoidResult<JsonMap> {
    match response.body {
        Some(Json::Object(map)) => Ok(map),
        _ => Err(FakturoidError::deserialization(format!(
            "expected a JSON object from {}",
            endpoint
        ))),
    }
}

/// Unpacks a response expected to carry a JSON array of objects.
pub(crate) fn array_from(response: ApiResponse, endpoint: &str) -> FakturoidResult<Vec<JsonMap>> {
    let items = match response.body {
        Some(Json::Array(items)) => items,
        _ => {
            return Err(FakturoidError::deserialization(format!(
                "expected a JSON array from {}",
                endpoint
            )))
        }
    };
    items
        .into_iter()
        .map(|item| match item {
            Json::Object(map) => Ok(map),
            other => Err(FakturoidError::deserialization(format!(
                "expected JSON objects in the {} listing, got {}",
                endpoint, other
            ))),
        })
        .collect()
}

/// Extracts the id of an already-persisted model.
pub(crate) fn require_id<T: Resource>(model: &T) -> FakturoidResult<i64> {
    model
        .id()
        .ok_or_else(|| FakturoidError::invalid_parameter("model has no assigned id"))
}

/// Rejects non-positive record ids before any request is built.
pub(crate) fn validate_record_id(name: &str, id: i64) -> FakturoidResult<()> {
    if id <= 0 {
        return Err(FakturoidError::invalid_parameter(format!(
            "{} must be a positive id",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Subject;

    #[test]
    fn test_require_id() {
        let subject = Subject::new();
        assert!(require_id(&subject).is_err());

        let subject = Subject::from_fields(
            serde_json::json!({"id": 28}).as_object().unwrap().clone(),
        );
        assert_eq!(require_id(&subject).unwrap(), 28);
    }

    #[test]
    fn test_validate_record_id() {
        assert!(validate_record_id("invoice id", 1).is_ok());
        assert!(validate_record_id("invoice id", 0).is_err());
        assert!(validate_record_id("invoice id", -4).is_err());
    }
}
