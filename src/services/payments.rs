//! Invoice payment operations.

use crate::client::FakturoidClient;
use crate::errors::FakturoidResult;
use crate::models::{InvoicePayment, Resource, ResourceKind};
use crate::services::{object_from, require_id, validate_record_id};
use serde_json::Value as Json;

/// Service for invoice payments. Payments only exist nested under an
/// invoice.
pub struct PaymentsService<'a> {
    client: &'a FakturoidClient,
}

impl<'a> PaymentsService<'a> {
    /// Creates a new payments service.
    pub fn new(client: &'a FakturoidClient) -> Self {
        Self { client }
    }

    fn endpoint(invoice_id: i64) -> String {
        format!(
            "{}/{}/{}",
            ResourceKind::Invoice.endpoint(),
            invoice_id,
            ResourceKind::InvoicePayment.endpoint()
        )
    }

    /// Records a payment against the given invoice. The model is refreshed
    /// in place from the response.
    pub async fn save(
        &self,
        payment: &mut InvoicePayment,
        invoice_id: i64,
    ) -> FakturoidResult<()> {
        validate_record_id("invoice id", invoice_id)?;
        let endpoint = Self::endpoint(invoice_id);
        let response = self
            .client
            .post(&endpoint, &Json::Object(payment.payload()), &[])
            .await?;
        payment.update(object_from(response, &endpoint)?);
        Ok(())
    }

    /// Deletes the given payment from an invoice.
    pub async fn delete(&self, payment: &InvoicePayment, invoice_id: i64) -> FakturoidResult<()> {
        self.delete_by_id(require_id(payment)?, invoice_id).await
    }

    /// Deletes a payment by id from an invoice.
    pub async fn delete_by_id(&self, payment_id: i64, invoice_id: i64) -> FakturoidResult<()> {
        validate_record_id("invoice id", invoice_id)?;
        validate_record_id("payment id", payment_id)?;
        self.client
            .delete(&format!("{}/{}", Self::endpoint(invoice_id), payment_id))
            .await?;
        Ok(())
    }

    /// Creates a tax document for a proforma payment and returns it.
    pub async fn create_tax_document(
        &self,
        invoice_id: i64,
        payment_id: i64,
    ) -> FakturoidResult<InvoicePayment> {
        validate_record_id("invoice id", invoice_id)?;
        validate_record_id("payment id", payment_id)?;
        let endpoint = format!(
            "{}/{}/create_tax_document",
            Self::endpoint(invoice_id),
            payment_id
        );
        let response = self
            .client
            .post(&endpoint, &Json::Object(serde_json::Map::new()), &[])
            .await?;
        Ok(InvoicePayment::from_fields(object_from(
            response, &endpoint,
        )?))
    }
}
