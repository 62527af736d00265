//! Subject (contact) operations.

use crate::client::FakturoidClient;
use crate::errors::FakturoidResult;
use crate::models::{Resource, ResourceKind, Subject};
use crate::pagination::PagedList;
use crate::services::filters::SubjectFilters;
use crate::services::{array_from, object_from, require_id, validate_record_id};
use serde_json::Value as Json;

/// Service for subject operations.
pub struct SubjectsService<'a> {
    client: &'a FakturoidClient,
}

impl<'a> SubjectsService<'a> {
    /// Creates a new subjects service.
    pub fn new(client: &'a FakturoidClient) -> Self {
        Self { client }
    }

    /// Loads one subject by id.
    pub async fn load(&self, id: i64) -> FakturoidResult<Subject> {
        validate_record_id("subject id", id)?;
        let endpoint = ResourceKind::Subject.endpoint();
        let response = self.client.get(&format!("{}/{}", endpoint, id), &[]).await?;
        Ok(Subject::from_fields(object_from(response, endpoint)?))
    }

    /// Returns a lazy paginated listing of subjects.
    pub fn find(&self, filters: &SubjectFilters) -> PagedList<'a, Subject> {
        PagedList::new(
            self.client,
            ResourceKind::Subject.endpoint(),
            filters.to_params(),
        )
    }

    /// Full-text search across subjects. Returns the matches whole, not
    /// paginated.
    pub async fn search(&self, query: &str) -> FakturoidResult<Vec<Subject>> {
        let endpoint = "subjects/search";
        let params = vec![("query".to_string(), query.to_string())];
        let response = self.client.get(endpoint, &params).await?;
        Ok(array_from(response, endpoint)?
            .into_iter()
            .map(Subject::from_fields)
            .collect())
    }

    /// Saves the subject: PUT when it has an id, POST otherwise. The model
    /// is refreshed in place from the response.
    pub async fn save(&self, subject: &mut Subject) -> FakturoidResult<()> {
        let endpoint = ResourceKind::Subject.endpoint();
        let body = Json::Object(subject.payload());
        let response = match subject.id() {
            Some(id) => {
                self.client
                    .put(&format!("{}/{}", endpoint, id), &body)
                    .await?
            }
            None => self.client.post(endpoint, &body, &[]).await?,
        };
        subject.update(object_from(response, endpoint)?);
        Ok(())
    }

    /// Deletes the given subject.
    pub async fn delete(&self, subject: &Subject) -> FakturoidResult<()> {
        self.delete_by_id(require_id(subject)?).await
    }

    /// Deletes a subject by id.
    pub async fn delete_by_id(&self, id: i64) -> FakturoidResult<()> {
        validate_record_id("subject id", id)?;
        self.client
            .delete(&format!("{}/{}", ResourceKind::Subject.endpoint(), id))
            .await?;
        Ok(())
    }
}
