//! Bank account operations.

use crate::client::FakturoidClient;
use crate::errors::FakturoidResult;
use crate::models::{BankAccount, Resource, ResourceKind};
use crate::services::array_from;

/// Service for bank accounts.
pub struct BankAccountsService<'a> {
    client: &'a FakturoidClient,
}

impl<'a> BankAccountsService<'a> {
    /// Creates a new bank accounts service.
    pub fn new(client: &'a FakturoidClient) -> Self {
        Self { client }
    }

    /// Lists the account's bank accounts. The listing is short and the
    /// server returns it whole, so there is no pagination here.
    pub async fn find(&self) -> FakturoidResult<Vec<BankAccount>> {
        let endpoint = ResourceKind::BankAccount.endpoint();
        let response = self.client.get(endpoint, &[]).await?;
        Ok(array_from(response, endpoint)?
            .into_iter()
            .map(BankAccount::from_fields)
            .collect())
    }
}
