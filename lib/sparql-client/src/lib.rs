//! A thin, read-only SPARQL client.
//!
//! [`QueryExecutor`] is the seam the resolution pipeline depends on: it takes a complete query
//! string and returns either the store's ordered solutions ([`RowSet`]) or a tagged
//! [`QueryFailure`]. [`HttpQueryExecutor`] implements it against a SPARQL 1.1 protocol endpoint.

mod config;
mod error;
mod executor;
mod results;

pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use error::{QueryError, QueryFailure};
pub use executor::{HttpQueryExecutor, QueryExecutor};
pub use reqwest::StatusCode;
pub use results::{Row, RowSet};
pub use sparesults::QueryResultsFormat;

pub mod model {
    pub use oxrdf::*;
}
