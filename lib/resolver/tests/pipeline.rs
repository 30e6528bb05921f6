#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

use async_trait::async_trait;
use lblod_resolver::{
    no_decisions_message, DecisionResolver, ResolveError, ResultLimit, SortOrder,
};
use lblod_sparql_client::model::{BlankNode, Literal, NamedNode, Term};
use lblod_sparql_client::{QueryExecutor, QueryFailure, Row, RowSet};
use std::sync::Mutex;

/// Answers every query with a closure and records what was asked, in order.
struct ScriptedExecutor<F> {
    answer: F,
    queries: Mutex<Vec<String>>,
}

impl<F> ScriptedExecutor<F>
where
    F: Fn(&str) -> Result<RowSet, QueryFailure> + Send + Sync,
{
    fn new(answer: F) -> Self {
        Self {
            answer,
            queries: Mutex::new(Vec::new()),
        }
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl<F> QueryExecutor for ScriptedExecutor<F>
where
    F: Fn(&str) -> Result<RowSet, QueryFailure> + Send + Sync,
{
    async fn execute(&self, query: &str) -> Result<RowSet, QueryFailure> {
        self.queries.lock().unwrap().push(query.to_owned());
        (self.answer)(query)
    }
}

fn node(iri: &str) -> NamedNode {
    NamedNode::new_unchecked(iri)
}

fn iris(variable: &str, values: &[&str]) -> RowSet {
    RowSet::new(
        vec![variable.to_owned()],
        values
            .iter()
            .map(|value| Row::from_iter([(variable, node(value))]))
            .collect(),
    )
}

fn unreachable() -> QueryFailure {
    QueryFailure::EndpointUnreachable {
        endpoint: "https://data.lblod.info/sparql".to_owned(),
        source: None,
    }
}

fn empty(_: &str) -> Result<RowSet, QueryFailure> {
    Ok(RowSet::default())
}

#[tokio::test]
async fn test_governing_bodies_one_query_per_unit_in_unit_order() {
    let executor = ScriptedExecutor::new(|query: &str| {
        if query.contains("<http://example.com/unit/1>") {
            Ok(iris(
                "bestuursorgaan",
                &["http://example.com/body/a", "http://example.com/body/shared"],
            ))
        } else if query.contains("<http://example.com/unit/2>") {
            Ok(iris(
                "bestuursorgaan",
                &["http://example.com/body/shared", "http://example.com/body/b"],
            ))
        } else {
            Ok(RowSet::default())
        }
    });
    let resolver = DecisionResolver::new(&executor);

    let bodies = resolver
        .governing_body_uris(&[
            node("http://example.com/unit/1"),
            node("http://example.com/unit/2"),
        ])
        .await;

    assert_eq!(
        bodies,
        [
            node("http://example.com/body/a"),
            node("http://example.com/body/shared"),
            node("http://example.com/body/shared"),
            node("http://example.com/body/b"),
        ]
    );
    let queries = executor.queries();
    assert_eq!(queries.len(), 2);
    assert!(queries[0].contains("besluit:bestuurt <http://example.com/unit/1>"));
    assert!(queries[1].contains("besluit:bestuurt <http://example.com/unit/2>"));
}

#[tokio::test]
async fn test_governing_bodies_without_units_sends_nothing() {
    let executor = ScriptedExecutor::new(empty);
    let resolver = DecisionResolver::new(&executor);

    assert!(resolver.governing_body_uris(&[]).await.is_empty());
    assert!(executor.queries().is_empty());
}

#[tokio::test]
async fn test_failing_unit_does_not_stop_the_other_units() {
    let executor = ScriptedExecutor::new(|query: &str| {
        if query.contains("<http://example.com/unit/1>") {
            Err(unreachable())
        } else if query.contains("<http://example.com/unit/2>") {
            Ok(iris("bestuursorgaan", &["http://example.com/body/b"]))
        } else {
            Ok(iris("bestuursorgaan", &["http://example.com/body/c"]))
        }
    });
    let resolver = DecisionResolver::new(&executor);
    let units = [
        node("http://example.com/unit/1"),
        node("http://example.com/unit/2"),
        node("http://example.com/unit/3"),
    ];

    let bodies = resolver.governing_body_uris(&units).await;

    assert_eq!(
        bodies,
        [node("http://example.com/body/b"), node("http://example.com/body/c")]
    );
    assert_eq!(executor.queries().len(), 3);
    assert!(matches!(
        resolver.try_governing_bodies_of(units[0].as_ref()).await,
        Err(ResolveError::Query(QueryFailure::EndpointUnreachable { .. }))
    ));
}

#[tokio::test]
async fn test_non_iri_rows_are_skipped_in_lists() {
    let executor = ScriptedExecutor::new(|_: &str| {
        Ok(RowSet::new(
            vec!["bestuurseenheid".to_owned()],
            vec![
                Row::from_iter([("bestuurseenheid", node("http://example.com/unit/1"))]),
                Row::from_iter([("bestuurseenheid", BlankNode::default())]),
                Row::from_iter([(
                    "bestuurseenheid",
                    Literal::new_simple_literal("http://example.com/unit/2"),
                )]),
                Row::from_iter([("bestuurseenheid", node("http://example.com/unit/3"))]),
            ],
        ))
    });
    let resolver = DecisionResolver::new(&executor);

    let units = resolver.governing_unit_uris(None).await;

    assert_eq!(
        units,
        [node("http://example.com/unit/1"), node("http://example.com/unit/3")]
    );
}

#[tokio::test]
async fn test_unknown_municipality_still_runs_the_whole_chain() {
    let executor = ScriptedExecutor::new(empty);
    let resolver = DecisionResolver::new(&executor);

    let decisions = resolver
        .decision_uris("Nowhereville", ResultLimit::from_count(-1), SortOrder::Desc)
        .await;

    assert!(decisions.is_empty());
    let queries = executor.queries();
    assert_eq!(queries.len(), 4, "{queries:#?}");
    assert!(queries[0].contains("REGEX(STR(?label), \"Nowhereville\", \"i\")"));
    assert!(queries[1].contains("VALUES ?werkingsgebied { }"));
    assert!(queries[2].contains("mandaat:isTijdspecialisatieVan"));
    assert!(queries[2].contains("VALUES ?bestuursorgaan { }"));
    assert!(queries[3].contains("eli:passed_by"));
    assert!(queries[3].contains("VALUES ?bestuursorgaan { }"));
    assert!(queries[3].ends_with("ORDER BY DESC(?publicatiedatum)"));
}

#[tokio::test]
async fn test_unreachable_store_collapses_to_not_found() {
    let executor = ScriptedExecutor::new(|_: &str| Err(unreachable()));
    let resolver = DecisionResolver::new(&executor);

    assert_eq!(resolver.municipality_uri("Gent").await, None);
    assert_eq!(
        resolver
            .municipal_council_uri(node("http://example.com/gent").as_ref())
            .await,
        None
    );
    assert!(resolver
        .decision_uris("Gent", ResultLimit::from_count(5), SortOrder::Asc)
        .await
        .is_empty());
    // municipality, council, then area, units, specializations and decisions
    assert_eq!(executor.queries().len(), 6);
}

#[tokio::test]
async fn test_chain_feeds_each_step_into_the_next() {
    let executor = ScriptedExecutor::new(|query: &str| {
        Ok(if query.contains("ext:werkingsgebiedNiveau") {
            iris("werkingsgebied", &["http://example.com/area/aalst"])
        } else if query.contains("VALUES ?werkingsgebied { <http://example.com/area/aalst> }") {
            iris("bestuurseenheid", &["http://example.com/unit/aalst"])
        } else if query.contains("besluit:bestuurt <http://example.com/unit/aalst>") {
            iris("bestuursorgaan", &["http://example.com/body/raad"])
        } else if query.contains("VALUES ?bestuursorgaan { <http://example.com/body/raad> }")
            && query.contains("isTijdspecialisatieVan")
        {
            iris("tijdspecialisatie", &["http://example.com/body/raad-2019"])
        } else if query.contains("VALUES ?bestuursorgaan { <http://example.com/body/raad-2019> }")
            && query.contains("eli:passed_by")
        {
            iris(
                "besluit",
                &[
                    "http://example.com/decision/1",
                    "http://example.com/decision/2",
                    "http://example.com/decision/3",
                ],
            )
        } else {
            RowSet::default()
        })
    });
    let resolver = DecisionResolver::new(&executor);

    let decisions = resolver
        .decision_uris("Aalst", ResultLimit::from_count(2), SortOrder::Asc)
        .await;

    assert_eq!(
        decisions,
        [
            node("http://example.com/decision/1"),
            node("http://example.com/decision/2"),
        ]
    );
    assert_eq!(executor.queries().len(), 5);
}

#[tokio::test]
async fn test_decision_limit_keeps_store_order() {
    let all = [
        "http://example.com/decision/3",
        "http://example.com/decision/1",
        "http://example.com/decision/2",
    ];
    let executor = ScriptedExecutor::new(move |_: &str| Ok(iris("besluit", &all)));
    let resolver = DecisionResolver::new(&executor);
    let bodies = [node("http://example.com/body/raad-2019")];

    let limited = resolver
        .decision_uris_from_time_specializations(&bodies, ResultLimit::from_count(2), SortOrder::Desc)
        .await;
    let unlimited = resolver
        .decision_uris_from_time_specializations(&bodies, ResultLimit::from_count(-1), SortOrder::Desc)
        .await;
    let zero = resolver
        .decision_uris_from_time_specializations(&bodies, ResultLimit::from_count(0), SortOrder::Desc)
        .await;

    assert_eq!(limited, [node(all[0]), node(all[1])]);
    assert_eq!(unlimited.len(), 3);
    assert_eq!(zero, unlimited);
}

#[tokio::test]
async fn test_literal_binding_is_a_malformed_answer() {
    let executor = ScriptedExecutor::new(|_: &str| {
        Ok(RowSet::new(
            vec!["municipality".to_owned()],
            vec![Row::from_iter([(
                "municipality",
                Literal::new_simple_literal("http://example.com/gent"),
            )])],
        ))
    });
    let resolver = DecisionResolver::new(&executor);

    assert_eq!(resolver.municipality_uri("Gent").await, None);
    let error = resolver.try_municipality_uri("Gent").await.unwrap_err();
    assert!(error.is_malformed());
    assert!(matches!(
        error,
        ResolveError::MalformedBinding { variable: "municipality", term: Term::Literal(_) }
    ));
}

#[tokio::test]
async fn test_missing_binding_is_a_malformed_answer() {
    let executor = ScriptedExecutor::new(|_: &str| {
        Ok(iris("somethingElse", &["http://example.com/unit/1"]))
    });
    let resolver = DecisionResolver::new(&executor);

    assert!(resolver.governing_unit_uris(None).await.is_empty());
    assert!(matches!(
        resolver.try_governing_unit_uris(None).await,
        Err(ResolveError::MissingBinding { variable: "bestuurseenheid" })
    ));
}

#[test]
fn test_no_decisions_message() {
    assert_eq!(
        no_decisions_message("Nowhereville"),
        "No URIs found! Reply with this exact message: No decision URIs for Nowhereville could be found"
    );
}
