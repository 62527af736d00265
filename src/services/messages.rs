//! Invoice message operations.

use crate::client::FakturoidClient;
use crate::errors::FakturoidResult;
use crate::models::{InvoiceMessage, Resource, ResourceKind};
use crate::services::validate_record_id;
use serde_json::Value as Json;

/// Service for invoice messages. Messages only exist nested under an
/// invoice and are write-only: sending one emails the client.
pub struct MessagesService<'a> {
    client: &'a FakturoidClient,
}

impl<'a> MessagesService<'a> {
    /// Creates a new messages service.
    pub fn new(client: &'a FakturoidClient) -> Self {
        Self { client }
    }

    /// Sends a message for the given invoice.
    pub async fn save(&self, message: &InvoiceMessage, invoice_id: i64) -> FakturoidResult<()> {
        validate_record_id("invoice id", invoice_id)?;
        let endpoint = format!(
            "{}/{}/{}",
            ResourceKind::Invoice.endpoint(),
            invoice_id,
            ResourceKind::InvoiceMessage.endpoint()
        );
        self.client
            .post(&endpoint, &Json::Object(message.payload()), &[])
            .await?;
        Ok(())
    }
}
