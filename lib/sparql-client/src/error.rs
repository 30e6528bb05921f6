use reqwest::StatusCode;
use sparesults::QueryResultsParseError;

/// An error raised while executing a query against a remote SPARQL endpoint.
///
/// The executor never panics on a remote fault: every transport or protocol problem ends up in one
/// of these variants.
#[derive(Debug, thiserror::Error)]
pub enum QueryFailure {
    /// The endpoint could not be contacted, or the configured path does not exist on the server.
    #[error("SPARQL endpoint not found: {endpoint}")]
    EndpointUnreachable {
        /// The endpoint URL that was used.
        endpoint: String,
        /// The transport error, if any. A `404 Not Found` answer has none.
        #[source]
        source: Option<reqwest::Error>,
    },
    /// The endpoint was reached but did not answer the query with a solution sequence.
    #[error("Query error: {0}")]
    Query(#[from] QueryError),
}

impl QueryFailure {
    /// Returns `true` if the endpoint itself could not be reached.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::EndpointUnreachable { .. })
    }
}

/// A query that reached the endpoint but failed there or on the way back.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The endpoint answered with a non-success HTTP status (malformed query, overload...).
    #[error("the endpoint answered {status}: {body}")]
    Rejected {
        /// The HTTP status of the answer.
        status: StatusCode,
        /// The body of the answer, usually the store's own error message.
        body: String,
    },
    /// No answer arrived within the configured timeout.
    #[error("the request timed out")]
    Timeout(#[source] reqwest::Error),
    /// Any other transport level error (TLS, broken connection, body decoding...).
    #[error(transparent)]
    Transport(reqwest::Error),
    /// The answer is not a valid SPARQL query results document.
    #[error(transparent)]
    Syntax(#[from] QueryResultsParseError),
    /// The endpoint returned a boolean where solutions were expected.
    #[error("expected query solutions but the endpoint returned a boolean")]
    NotSolutions,
}
