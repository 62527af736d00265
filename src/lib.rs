//! # Fakturoid API Client
//!
//! A typed client for the [Fakturoid](https://www.fakturoid.cz) invoicing
//! API v3 with:
//! - OAuth2 client-credential authentication, performed once at
//!   construction
//! - Typed models with field coercion (ISO-8601 dates and timestamps,
//!   decimal-as-string monetary amounts)
//! - Lazy, page-cached pagination over listing endpoints
//! - Per-resource services for CRUD, fulltext search and invoice/expense
//!   lifecycle events
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fakturoid::{FakturoidClient, InvoiceFilters, InvoiceStatus, Resource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FakturoidClient::builder()
//!         .slug("applecorp")
//!         .email("steve@apple.example")
//!         .client_id("client-id")
//!         .client_secret("client-secret")
//!         .connect()
//!         .await?;
//!
//!     // Load one invoice
//!     let invoice = client.invoices().load(40).await?;
//!     println!("{} -> {:?}", invoice, invoice.get("total"));
//!
//!     // Iterate paid invoices lazily
//!     let filters = InvoiceFilters::new().status(InvoiceStatus::Paid);
//!     let mut paid = client.invoices().find(&filters);
//!     let mut cursor = paid.cursor();
//!     while let Some(invoice) = cursor.try_next().await? {
//!         println!("{}", invoice);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;
pub mod models;

// Authentication
pub mod auth;

// HTTP client and transport
pub mod client;

// Pagination handling
pub mod pagination;

// API services
pub mod services;

// Re-exports for convenience
pub use auth::BearerToken;
pub use client::{FakturoidClient, FakturoidClientBuilder};
pub use config::{FakturoidConfig, FakturoidConfigBuilder};
pub use errors::{FakturoidError, FakturoidErrorKind, FakturoidResult};
pub use models::{
    Account, BankAccount, Expense, FieldValue, Generator, Invoice, InvoiceLine, InvoiceMessage,
    InvoicePayment, Resource, ResourceKind, Subject,
};
pub use pagination::{PagedList, PagedSlice};
pub use services::{
    EventArgs, ExpenseEvent, ExpenseFilters, ExpenseStatus, FilterTime, GeneratorFilters,
    InvoiceEvent, InvoiceFilters, InvoiceStatus, SubjectFilters,
};
