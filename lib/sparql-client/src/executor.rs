use crate::config::ClientConfig;
use crate::error::{QueryError, QueryFailure};
use crate::results::RowSet;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use sparesults::QueryResultsFormat;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Sends a single, complete, read-only query to a store and returns its solutions.
///
/// Implementations hold no mutable state, so one executor can serve any number of independent
/// callers.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: &str) -> Result<RowSet, QueryFailure>;
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for &T {
    async fn execute(&self, query: &str) -> Result<RowSet, QueryFailure> {
        (**self).execute(query).await
    }
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for Box<T> {
    async fn execute(&self, query: &str) -> Result<RowSet, QueryFailure> {
        (**self).execute(query).await
    }
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for Arc<T> {
    async fn execute(&self, query: &str) -> Result<RowSet, QueryFailure> {
        (**self).execute(query).await
    }
}

/// A [`QueryExecutor`] talking the SPARQL 1.1 protocol over HTTP.
///
/// Queries are sent as URL-encoded `POST` bodies and answers are requested as SPARQL JSON
/// results. There are no retries and no caching: one call is one round-trip.
#[derive(Debug, Clone)]
pub struct HttpQueryExecutor {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpQueryExecutor {
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// CSV results cannot be read back into terms, so a `text/csv` or `text/plain` label is
    /// taken as JSON, the format that was asked for.
    async fn send(&self, query: &str) -> Result<RowSet, QueryFailure> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", query)])
            .send()
            .await
            .map_err(|error| self.classify(error))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(self.unreachable(None));
        }

        let format = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(QueryResultsFormat::from_media_type)
            .filter(|format| {
                matches!(
                    format,
                    QueryResultsFormat::Json | QueryResultsFormat::Xml | QueryResultsFormat::Tsv
                )
            })
            .unwrap_or(QueryResultsFormat::Json);
        let body = response
            .bytes()
            .await
            .map_err(|error| self.classify(error))?;

        if !status.is_success() {
            return Err(QueryError::Rejected {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            }
            .into());
        }
        Ok(RowSet::parse(&body, format)?)
    }

    fn classify(&self, error: reqwest::Error) -> QueryFailure {
        if error.is_connect() {
            self.unreachable(Some(error))
        } else if error.is_timeout() {
            QueryError::Timeout(error).into()
        } else {
            QueryError::Transport(error).into()
        }
    }

    fn unreachable(&self, source: Option<reqwest::Error>) -> QueryFailure {
        QueryFailure::EndpointUnreachable {
            endpoint: self.endpoint.to_string(),
            source,
        }
    }
}

#[async_trait]
impl QueryExecutor for HttpQueryExecutor {
    async fn execute(&self, query: &str) -> Result<RowSet, QueryFailure> {
        let start = Instant::now();
        let result = self.send(query).await;
        match &result {
            Ok(rows) => debug!(
                endpoint = %self.endpoint,
                rows = rows.len(),
                elapsed_ms = start.elapsed().as_millis(),
                "SPARQL query answered"
            ),
            Err(error) => warn!(endpoint = %self.endpoint, %error, "SPARQL query failed"),
        }
        result
    }
}
