//! Resolution of Flemish municipalities to their governing bodies and decisions.
//!
//! Each step of [`DecisionResolver`] is a single read-only SPARQL query, parameterized by the
//! identifiers the previous step produced:
//!
//! ```text
//! name ──► operating area ──► governing units ──► governing bodies ──► time specializations ──► decisions
//! name ──► municipality ──► municipal council
//! ```

mod error;
mod order;
mod query;
mod resolver;
pub mod vocab;

pub use error::{InvalidSortOrder, ResolveError};
pub use order::{ResultLimit, SortOrder};
pub use resolver::{no_decisions_message, DecisionResolver};
