//! Invoice operations.

use crate::client::FakturoidClient;
use crate::errors::FakturoidResult;
use crate::models::{Invoice, Resource, ResourceKind};
use crate::pagination::PagedList;
use crate::services::events::{EventArgs, InvoiceEvent};
use crate::services::filters::InvoiceFilters;
use crate::services::{object_from, require_id, validate_record_id};
use serde_json::Value as Json;

/// Service for invoice operations.
pub struct InvoicesService<'a> {
    client: &'a FakturoidClient,
}

impl<'a> InvoicesService<'a> {
    /// Creates a new invoices service.
    pub fn new(client: &'a FakturoidClient) -> Self {
        Self { client }
    }

    /// Loads one invoice by id.
    pub async fn load(&self, id: i64) -> FakturoidResult<Invoice> {
        validate_record_id("invoice id", id)?;
        let endpoint = ResourceKind::Invoice.endpoint();
        let response = self.client.get(&format!("{}/{}", endpoint, id), &[]).await?;
        Ok(Invoice::from_fields(object_from(response, endpoint)?))
    }

    /// Returns a lazy paginated listing of invoices.
    pub fn find(&self, filters: &InvoiceFilters) -> PagedList<'a, Invoice> {
        PagedList::new(
            self.client,
            ResourceKind::Invoice.endpoint(),
            filters.to_params(),
        )
    }

    /// Saves the invoice: PUT when it has an id, POST otherwise. The model
    /// is refreshed in place from the response.
    pub async fn save(&self, invoice: &mut Invoice) -> FakturoidResult<()> {
        let endpoint = ResourceKind::Invoice.endpoint();
        let body = Json::Object(invoice.payload());
        let response = match invoice.id() {
            Some(id) => {
                self.client
                    .put(&format!("{}/{}", endpoint, id), &body)
                    .await?
            }
            None => self.client.post(endpoint, &body, &[]).await?,
        };
        invoice.update(object_from(response, endpoint)?);
        Ok(())
    }

    /// Deletes the given invoice.
    pub async fn delete(&self, invoice: &Invoice) -> FakturoidResult<()> {
        self.delete_by_id(require_id(invoice)?).await
    }

    /// Deletes an invoice by id.
    pub async fn delete_by_id(&self, id: i64) -> FakturoidResult<()> {
        validate_record_id("invoice id", id)?;
        self.client
            .delete(&format!("{}/{}", ResourceKind::Invoice.endpoint(), id))
            .await?;
        Ok(())
    }

    /// Fires a lifecycle event on an invoice. Arguments are checked against
    /// the event's accepted set before anything is sent.
    pub async fn fire(
        &self,
        invoice_id: i64,
        event: InvoiceEvent,
        args: &EventArgs,
    ) -> FakturoidResult<()> {
        validate_record_id("invoice id", invoice_id)?;
        args.validate(event.as_str(), event.allowed_args())?;

        let mut params = vec![("event".to_string(), event.as_str().to_string())];
        params.extend(args.to_params());

        self.client
            .post(
                &format!("{}/{}/fire", ResourceKind::Invoice.endpoint(), invoice_id),
                &Json::Object(serde_json::Map::new()),
                &params,
            )
            .await?;
        Ok(())
    }
}
