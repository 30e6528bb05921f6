use lblod_sparql_client::QueryFailure;
use oxrdf::Term;

/// Why a resolution step produced nothing.
///
/// The public steps of [`DecisionResolver`](crate::DecisionResolver) collapse all of these into
/// "not found"; the `try_*` steps expose them.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The store could not be queried.
    #[error(transparent)]
    Query(#[from] QueryFailure),
    /// A result row lacks the variable the step projects.
    #[error("variable ?{variable} is not bound in a result row")]
    MissingBinding { variable: &'static str },
    /// A result row binds the projected variable to something other than an IRI.
    #[error("variable ?{variable} is bound to {term}, expected an IRI")]
    MalformedBinding { variable: &'static str, term: Term },
}

impl ResolveError {
    /// Returns `true` if the store answered but the answer did not have the expected shape.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MissingBinding { .. } | Self::MalformedBinding { .. }
        )
    }
}

/// A sort order other than `ASC` or `DESC`.
#[derive(Debug, thiserror::Error)]
#[error("invalid sort order '{0}', expected ASC or DESC")]
pub struct InvalidSortOrder(pub(crate) String);
