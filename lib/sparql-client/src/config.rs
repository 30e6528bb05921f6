use std::time::Duration;
use url::Url;

/// The public SPARQL endpoint of the Flemish local-government linked-data platform.
pub const DEFAULT_ENDPOINT: &str = "https://data.lblod.info/sparql";

/// Holds the configuration of an [`HttpQueryExecutor`](crate::HttpQueryExecutor).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// The SPARQL endpoint all queries are sent to.
    pub endpoint: Url,
    /// Upper bound on a single round-trip. `None` keeps the transport default.
    pub timeout: Option<Duration>,
    /// The `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration for `endpoint` with no timeout.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: None,
            user_agent: concat!("lblod-mcp/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }

    /// Creates a configuration for [`DEFAULT_ENDPOINT`].
    pub fn lblod() -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(DEFAULT_ENDPOINT)?))
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
