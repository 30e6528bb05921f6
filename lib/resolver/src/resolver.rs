use crate::error::ResolveError;
use crate::order::{ResultLimit, SortOrder};
use crate::query;
use lblod_sparql_client::{QueryExecutor, Row, RowSet};
use oxrdf::{NamedNode, NamedNodeRef, Term};
use tracing::{debug, error, warn};

/// The text returned in place of an empty decision list.
///
/// Tool callers cannot tell an empty answer from a failed lookup, so the lookup answers with an
/// instruction they relay verbatim.
pub fn no_decisions_message(name: &str) -> String {
    format!(
        "No URIs found! Reply with this exact message: No decision URIs for {name} could be found"
    )
}

/// Resolves municipalities, their governing bodies and their decisions, one query per step.
///
/// Every step is best-effort: a failed query or an unexpected answer is logged and yields the
/// step's "not found" value (`None` or an empty list). The `try_*` variants return the
/// underlying [`ResolveError`] instead.
#[derive(Debug, Clone)]
pub struct DecisionResolver<E> {
    executor: E,
}

impl<E: QueryExecutor> DecisionResolver<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// The first municipality whose preferred label contains `name`, ignoring case.
    pub async fn municipality_uri(&self, name: &str) -> Option<NamedNode> {
        collapse("municipality", self.try_municipality_uri(name).await)
    }

    pub async fn try_municipality_uri(&self, name: &str) -> Result<Option<NamedNode>, ResolveError> {
        let rows = self.executor.execute(&query::municipality(name)).await?;
        first_iri(&rows, "municipality")
    }

    /// The municipal council governing `municipality`.
    pub async fn municipal_council_uri(
        &self,
        municipality: NamedNodeRef<'_>,
    ) -> Option<NamedNode> {
        collapse(
            "municipal council",
            self.try_municipal_council_uri(municipality).await,
        )
    }

    pub async fn try_municipal_council_uri(
        &self,
        municipality: NamedNodeRef<'_>,
    ) -> Result<Option<NamedNode>, ResolveError> {
        let rows = self
            .executor
            .execute(&query::municipal_council(municipality))
            .await?;
        first_iri(&rows, "gemeenteraad")
    }

    /// The municipal operating area whose label matches `name`, ignoring case.
    ///
    /// This is a lookup of its own and does not go through [`Self::municipality_uri`].
    pub async fn operating_area_uri(&self, name: &str) -> Option<NamedNode> {
        collapse("operating area", self.try_operating_area_uri(name).await)
    }

    pub async fn try_operating_area_uri(
        &self,
        name: &str,
    ) -> Result<Option<NamedNode>, ResolveError> {
        let rows = self.executor.execute(&query::operating_area(name)).await?;
        first_iri(&rows, "werkingsgebied")
    }

    /// Every subject referring to `area`, in store order and with duplicates.
    ///
    /// Without an area the query is still sent and matches nothing.
    pub async fn governing_unit_uris(&self, area: Option<NamedNodeRef<'_>>) -> Vec<NamedNode> {
        collapse("governing units", self.try_governing_unit_uris(area).await)
    }

    pub async fn try_governing_unit_uris(
        &self,
        area: Option<NamedNodeRef<'_>>,
    ) -> Result<Vec<NamedNode>, ResolveError> {
        let rows = self.executor.execute(&query::governing_units(area)).await?;
        all_iris(&rows, "bestuurseenheid")
    }

    /// The governing bodies of each unit, concatenated in unit order.
    ///
    /// One query is sent per unit, sequentially. A body governing several units appears once per
    /// unit. A unit whose query fails contributes nothing and the remaining units are still
    /// queried.
    pub async fn governing_body_uris(&self, units: &[NamedNode]) -> Vec<NamedNode> {
        debug!(step = "governing bodies", units = units.len(), "Querying");
        let mut bodies = Vec::new();
        for unit in units {
            bodies.extend(collapse(
                "governing bodies",
                self.try_governing_bodies_of(unit.as_ref()).await,
            ));
        }
        bodies
    }

    /// The governing bodies of a single unit.
    pub async fn try_governing_bodies_of(
        &self,
        unit: NamedNodeRef<'_>,
    ) -> Result<Vec<NamedNode>, ResolveError> {
        let rows = self
            .executor
            .execute(&query::governing_bodies(unit))
            .await?;
        all_iris(&rows, "bestuursorgaan")
    }

    /// The time specializations of any of `bodies`, in one query.
    pub async fn time_specialization_uris(&self, bodies: &[NamedNode]) -> Vec<NamedNode> {
        collapse(
            "time specializations",
            self.try_time_specialization_uris(bodies).await,
        )
    }

    pub async fn try_time_specialization_uris(
        &self,
        bodies: &[NamedNode],
    ) -> Result<Vec<NamedNode>, ResolveError> {
        debug!(step = "time specializations", bodies = bodies.len(), "Querying");
        let rows = self
            .executor
            .execute(&query::time_specializations(
                bodies.iter().map(NamedNode::as_ref),
            ))
            .await?;
        all_iris(&rows, "tijdspecialisatie")
    }

    /// The decisions passed by any of `bodies`, sorted by publication date by the store and then
    /// cut to `limit`.
    pub async fn decision_uris_from_time_specializations(
        &self,
        bodies: &[NamedNode],
        limit: ResultLimit,
        order: SortOrder,
    ) -> Vec<NamedNode> {
        collapse(
            "decisions",
            self.try_decision_uris_from_time_specializations(bodies, limit, order)
                .await,
        )
    }

    pub async fn try_decision_uris_from_time_specializations(
        &self,
        bodies: &[NamedNode],
        limit: ResultLimit,
        order: SortOrder,
    ) -> Result<Vec<NamedNode>, ResolveError> {
        debug!(step = "decisions", bodies = bodies.len(), %order, "Querying");
        let rows = self
            .executor
            .execute(&query::decisions(bodies.iter().map(NamedNode::as_ref), order))
            .await?;
        let mut decisions = all_iris(&rows, "besluit")?;
        limit.apply(&mut decisions);
        Ok(decisions)
    }

    /// Resolves a municipality name to the decisions of its governing bodies.
    ///
    /// Chains operating area → governing units → governing bodies → time specializations →
    /// decisions. The chain never stops early: a step that found nothing hands empty input to the
    /// next one.
    pub async fn decision_uris(
        &self,
        name: &str,
        limit: ResultLimit,
        order: SortOrder,
    ) -> Vec<NamedNode> {
        let area = self.operating_area_uri(name).await;
        debug!(municipality = name, area = ?area.as_ref().map(NamedNode::as_str), "Resolved operating area");
        let units = self
            .governing_unit_uris(area.as_ref().map(NamedNode::as_ref))
            .await;
        debug!(municipality = name, units = units.len(), "Resolved governing units");
        let bodies = self.governing_body_uris(&units).await;
        debug!(municipality = name, bodies = bodies.len(), "Resolved governing bodies");
        let specializations = self.time_specialization_uris(&bodies).await;
        debug!(
            municipality = name,
            specializations = specializations.len(),
            "Resolved time specializations"
        );
        let decisions = self
            .decision_uris_from_time_specializations(&specializations, limit, order)
            .await;
        debug!(municipality = name, decisions = decisions.len(), %order, "Resolved decisions");
        decisions
    }
}

fn collapse<T: Default>(step: &'static str, result: Result<T, ResolveError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) if e.is_malformed() => {
            error!(step, error = %e, "Unexpected query answer, treating as not found");
            T::default()
        }
        Err(e) => {
            warn!(step, error = %e, "Query failed, treating as not found");
            T::default()
        }
    }
}

fn first_iri(rows: &RowSet, variable: &'static str) -> Result<Option<NamedNode>, ResolveError> {
    rows.first().map(|row| iri(row, variable)).transpose()
}

/// Every IRI bound to `variable`, in row order.
///
/// Rows binding something else (a blank node subject of the reverse lookup, say) are logged and
/// skipped. A row without the variable at all fails the whole answer.
fn all_iris(rows: &RowSet, variable: &'static str) -> Result<Vec<NamedNode>, ResolveError> {
    let mut iris = Vec::with_capacity(rows.len());
    for row in rows {
        match iri(row, variable) {
            Ok(node) => iris.push(node),
            Err(e @ ResolveError::MalformedBinding { .. }) => {
                error!(error = %e, "Skipping result row");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(iris)
}

fn iri(row: &Row, variable: &'static str) -> Result<NamedNode, ResolveError> {
    match row.get(variable) {
        Some(Term::NamedNode(node)) => Ok(node.clone()),
        Some(term) => Err(ResolveError::MalformedBinding {
            variable,
            term: term.clone(),
        }),
        None => Err(ResolveError::MissingBinding { variable }),
    }
}
