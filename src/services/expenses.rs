//! Expense operations.

use crate::client::FakturoidClient;
use crate::errors::FakturoidResult;
use crate::models::{Expense, Resource, ResourceKind};
use crate::pagination::PagedList;
use crate::services::events::{EventArgs, ExpenseEvent};
use crate::services::filters::ExpenseFilters;
use crate::services::{object_from, require_id, validate_record_id};
use serde_json::Value as Json;

/// Service for expense operations.
pub struct ExpensesService<'a> {
    client: &'a FakturoidClient,
}

impl<'a> ExpensesService<'a> {
    /// Creates a new expenses service.
    pub fn new(client: &'a FakturoidClient) -> Self {
        Self { client }
    }

    /// Loads one expense by id.
    pub async fn load(&self, id: i64) -> FakturoidResult<Expense> {
        validate_record_id("expense id", id)?;
        let endpoint = ResourceKind::Expense.endpoint();
        let response = self.client.get(&format!("{}/{}", endpoint, id), &[]).await?;
        Ok(Expense::from_fields(object_from(response, endpoint)?))
    }

    /// Returns a lazy paginated listing of expenses.
    pub fn find(&self, filters: &ExpenseFilters) -> PagedList<'a, Expense> {
        PagedList::new(
            self.client,
            ResourceKind::Expense.endpoint(),
            filters.to_params(),
        )
    }

    /// Saves the expense: PUT when it has an id, POST otherwise. The model
    /// is refreshed in place from the response.
    pub async fn save(&self, expense: &mut Expense) -> FakturoidResult<()> {
        let endpoint = ResourceKind::Expense.endpoint();
        let body = Json::Object(expense.payload());
        let response = match expense.id() {
            Some(id) => {
                self.client
                    .put(&format!("{}/{}", endpoint, id), &body)
                    .await?
            }
            None => self.client.post(endpoint, &body, &[]).await?,
        };
        expense.update(object_from(response, endpoint)?);
        Ok(())
    }

    /// Deletes the given expense.
    pub async fn delete(&self, expense: &Expense) -> FakturoidResult<()> {
        self.delete_by_id(require_id(expense)?).await
    }

    /// Deletes an expense by id.
    pub async fn delete_by_id(&self, id: i64) -> FakturoidResult<()> {
        validate_record_id("expense id", id)?;
        self.client
            .delete(&format!("{}/{}", ResourceKind::Expense.endpoint(), id))
            .await?;
        Ok(())
    }

    /// Fires a lifecycle event on an expense. Arguments are checked against
    /// the event's accepted set before anything is sent.
    pub async fn fire(
        &self,
        expense_id: i64,
        event: ExpenseEvent,
        args: &EventArgs,
    ) -> FakturoidResult<()> {
        validate_record_id("expense id", expense_id)?;
        args.validate(event.as_str(), event.allowed_args())?;

        let mut params = vec![("event".to_string(), event.as_str().to_string())];
        params.extend(args.to_params());

        self.client
            .post(
                &format!("{}/{}/fire", ResourceKind::Expense.endpoint(), expense_id),
                &Json::Object(serde_json::Map::new()),
                &params,
            )
            .await?;
        Ok(())
    }
}
