//! Account operations.

use crate::client::FakturoidClient;
use crate::errors::FakturoidResult;
use crate::models::{Account, Resource, ResourceKind};
use crate::services::object_from;

/// Service for the singleton account resource.
pub struct AccountService<'a> {
    client: &'a FakturoidClient,
}

impl<'a> AccountService<'a> {
    /// Creates a new account service.
    pub fn new(client: &'a FakturoidClient) -> Self {
        Self { client }
    }

    /// Loads the account settings.
    pub async fn load(&self) -> FakturoidResult<Account> {
        let endpoint = ResourceKind::Account.endpoint();
        let response = self.client.get(endpoint, &[]).await?;
        Ok(Account::from_fields(object_from(response, endpoint)?))
    }
}
