//! PostgREST row surface.
//!
//! Builders mirror the subset of the supabase-js query API the application
//! uses: equality filters, a single ordering clause, `maybe_single`, and
//! writes with `return=minimal`. Query construction is pure so it can be
//! unit tested without a network.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::{ClientError, SupabaseClient};

/// Row operations on one table.
pub struct TableClient {
    client: SupabaseClient,
    name: String,
}

impl TableClient {
    pub(crate) fn new(client: SupabaseClient, name: &str) -> Self {
        Self {
            client,
            name: name.to_string(),
        }
    }

    /// Start a read.
    #[must_use]
    pub fn select(&self) -> SelectBuilder {
        SelectBuilder {
            client: self.client.clone(),
            table: self.name.clone(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Insert one row.
    ///
    /// # Errors
    ///
    /// Returns the service's message verbatim on failure (constraint and
    /// authorization errors included).
    #[instrument(skip(self, row), fields(table = %self.name))]
    pub async fn insert<T: Serialize + Sync>(&self, row: &T) -> Result<(), ClientError> {
        let url = self.rest_url()?;
        let response = self
            .client
            .authorize(self.client.http().post(url))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;
        check_write(response).await
    }

    /// Insert-or-update one row, keyed by `on_conflict` columns
    /// (comma-separated, e.g. `"user_id,schedule_id,date"`).
    ///
    /// # Errors
    ///
    /// Returns the service's message verbatim on failure.
    #[instrument(skip(self, row), fields(table = %self.name, on_conflict = %on_conflict))]
    pub async fn upsert<T: Serialize + Sync>(
        &self,
        row: &T,
        on_conflict: &str,
    ) -> Result<(), ClientError> {
        let mut url = self.rest_url()?;
        url.query_pairs_mut().append_pair("on_conflict", on_conflict);

        let response = self
            .client
            .authorize(self.client.http().post(url))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row)
            .send()
            .await?;
        check_write(response).await
    }

    /// Start an update with a partial row body.
    ///
    /// # Errors
    ///
    /// Returns an error if the partial row fails to serialize.
    pub fn update<T: Serialize>(&self, partial: &T) -> Result<UpdateBuilder, ClientError> {
        Ok(UpdateBuilder {
            client: self.client.clone(),
            table: self.name.clone(),
            body: serde_json::to_value(partial)?,
            filters: Vec::new(),
        })
    }

    /// Start a delete.
    #[must_use]
    pub fn delete(&self) -> DeleteBuilder {
        DeleteBuilder {
            client: self.client.clone(),
            table: self.name.clone(),
            filters: Vec::new(),
        }
    }

    fn rest_url(&self) -> Result<Url, ClientError> {
        self.client.endpoint(&format!("rest/v1/{}", self.name))
    }
}

/// A pending read.
pub struct SelectBuilder {
    client: SupabaseClient,
    table: String,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<u32>,
}

impl SelectBuilder {
    /// Filter on column equality.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Order by one column.
    #[must_use]
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order = Some(format!("{column}.{direction}"));
        self
    }

    /// Cap the number of returned rows.
    #[must_use]
    pub const fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    /// The query string pairs this read will send.
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];
        pairs.extend(self.filters.iter().cloned());
        if let Some(order) = &self.order {
            pairs.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }

    /// Fetch all matching rows.
    ///
    /// # Errors
    ///
    /// Returns the service's message verbatim on failure.
    #[instrument(skip(self), fields(table = %self.table))]
    pub async fn list<T: DeserializeOwned>(self) -> Result<Vec<T>, ClientError> {
        let mut url = self
            .client
            .endpoint(&format!("rest/v1/{}", self.table))?;
        for (k, v) in self.query_pairs() {
            url.query_pairs_mut().append_pair(&k, &v);
        }

        let response = self.client.authorize(self.client.http().get(url)).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::from_response(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch at most one matching row.
    ///
    /// Matches supabase-js `maybeSingle`: zero rows is `None`, not an error.
    ///
    /// # Errors
    ///
    /// Returns the service's message verbatim on failure.
    pub async fn maybe_single<T: DeserializeOwned>(self) -> Result<Option<T>, ClientError> {
        let rows: Vec<T> = self.limit(1).list().await?;
        Ok(rows.into_iter().next())
    }
}

/// A pending single-table update.
pub struct UpdateBuilder {
    client: SupabaseClient,
    table: String,
    body: serde_json::Value,
    filters: Vec<(String, String)>,
}

impl UpdateBuilder {
    /// Filter on column equality.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Execute the update.
    ///
    /// # Errors
    ///
    /// Returns the service's message verbatim on failure.
    #[instrument(skip(self), fields(table = %self.table))]
    pub async fn execute(self) -> Result<(), ClientError> {
        let mut url = self
            .client
            .endpoint(&format!("rest/v1/{}", self.table))?;
        for (k, v) in &self.filters {
            url.query_pairs_mut().append_pair(k, v);
        }

        let response = self
            .client
            .authorize(self.client.http().patch(url))
            .header("Prefer", "return=minimal")
            .json(&self.body)
            .send()
            .await?;
        check_write(response).await
    }
}

/// A pending single-table delete.
pub struct DeleteBuilder {
    client: SupabaseClient,
    table: String,
    filters: Vec<(String, String)>,
}

impl DeleteBuilder {
    /// Filter on column equality.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Execute the delete.
    ///
    /// # Errors
    ///
    /// Returns the service's message verbatim on failure.
    #[instrument(skip(self), fields(table = %self.table))]
    pub async fn execute(self) -> Result<(), ClientError> {
        let mut url = self
            .client
            .endpoint(&format!("rest/v1/{}", self.table))?;
        for (k, v) in &self.filters {
            url.query_pairs_mut().append_pair(k, v);
        }

        let response = self
            .client
            .authorize(self.client.http().delete(url))
            .header("Prefer", "return=minimal")
            .send()
            .await?;
        check_write(response).await
    }
}

async fn check_write(response: reqwest::Response) -> Result<(), ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::from_response(status.as_u16(), &body))
}
