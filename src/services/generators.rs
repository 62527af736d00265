//! Generator (invoice template) operations.

use crate::client::FakturoidClient;
use crate::errors::FakturoidResult;
use crate::models::{Generator, Resource, ResourceKind};
use crate::pagination::PagedList;
use crate::services::filters::GeneratorFilters;
use crate::services::{object_from, require_id, validate_record_id};
use serde_json::Value as Json;

/// Service for generator operations.
pub struct GeneratorsService<'a> {
    client: &'a FakturoidClient,
}

impl<'a> GeneratorsService<'a> {
    /// Creates a new generators service.
    pub fn new(client: &'a FakturoidClient) -> Self {
        Self { client }
    }

    /// Loads one generator by id.
    pub async fn load(&self, id: i64) -> FakturoidResult<Generator> {
        validate_record_id("generator id", id)?;
        let endpoint = ResourceKind::Generator.endpoint();
        let response = self.client.get(&format!("{}/{}", endpoint, id), &[]).await?;
        Ok(Generator::from_fields(object_from(response, endpoint)?))
    }

    /// Returns a lazy paginated listing of generators. The `recurring`
    /// filter routes to the dedicated `recurring`/`template` sub-endpoint.
    pub fn find(&self, filters: &GeneratorFilters) -> PagedList<'a, Generator> {
        let endpoint = ResourceKind::Generator.endpoint();
        let endpoint = match filters.recurring {
            None => endpoint.to_string(),
            Some(true) => format!("{}/recurring", endpoint),
            Some(false) => format!("{}/template", endpoint),
        };
        PagedList::new(self.client, endpoint, filters.to_params())
    }

    /// Saves the generator: PUT when it has an id, POST otherwise. The
    /// model is refreshed in place from the response.
    pub async fn save(&self, generator: &mut Generator) -> FakturoidResult<()> {
        let endpoint = ResourceKind::Generator.endpoint();
        let body = Json::Object(generator.payload());
        let response = match generator.id() {
            Some(id) => {
                self.client
                    .put(&format!("{}/{}", endpoint, id), &body)
                    .await?
            }
            None => self.client.post(endpoint, &body, &[]).await?,
        };
        generator.update(object_from(response, endpoint)?);
        Ok(())
    }

    /// Deletes the given generator.
    pub async fn delete(&self, generator: &Generator) -> FakturoidResult<()> {
        self.delete_by_id(require_id(generator)?).await
    }

    /// Deletes a generator by id.
    pub async fn delete_by_id(&self, id: i64) -> FakturoidResult<()> {
        validate_record_id("generator id", id)?;
        self.client
            .delete(&format!("{}/{}", ResourceKind::Generator.endpoint(), id))
            .await?;
        Ok(())
    }
}
