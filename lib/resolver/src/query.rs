//! Query templates for every resolution step.
//!
//! Caller input never reaches a query as raw text: names are rendered as escaped string literals
//! and identifiers as IRIs, both through `oxrdf`'s serializers.

use crate::order::SortOrder;
use crate::vocab::{besluit, eli, ext, mandaat, prov, rdfs, skos};
use oxrdf::{Literal, NamedNodeRef};

pub(crate) fn municipality(name: &str) -> String {
    let needle = Literal::new_simple_literal(name.to_lowercase());
    let classification = besluit::MUNICIPALITY_CLASSIFICATION;
    format!(
        "PREFIX besluit: <{besluit}>
PREFIX skos: <{skos}>

SELECT DISTINCT ?municipality ?label
WHERE {{
    ?municipality a besluit:Bestuurseenheid ;
        besluit:classificatie {classification} ;
        skos:prefLabel ?label .
    FILTER(CONTAINS(LCASE(STR(?label)), {needle}))
}}
LIMIT 1",
        besluit = besluit::NAMESPACE,
        skos = skos::NAMESPACE,
    )
}

pub(crate) fn municipal_council(municipality: NamedNodeRef<'_>) -> String {
    let classification = besluit::MUNICIPAL_COUNCIL_CLASSIFICATION;
    format!(
        "PREFIX besluit: <{besluit}>

SELECT DISTINCT ?gemeenteraad
WHERE {{
    BIND ({municipality} AS ?gemeente)

    ?gemeenteraad a besluit:Bestuursorgaan ;
        besluit:bestuurt ?gemeente ;
        besluit:classificatie {classification} .
}}
LIMIT 1",
        besluit = besluit::NAMESPACE,
    )
}

pub(crate) fn operating_area(name: &str) -> String {
    let pattern = Literal::new_simple_literal(escape_regex(name));
    let level = Literal::new_simple_literal(ext::MUNICIPALITY_LEVEL);
    format!(
        "PREFIX ext: <{ext}>
PREFIX prov: <{prov}>
PREFIX rdfs: <{rdfs}>

SELECT DISTINCT ?werkingsgebied
WHERE {{
    ?werkingsgebied a prov:Location ;
        ext:werkingsgebiedNiveau {level} ;
        rdfs:label ?label .
    FILTER(REGEX(STR(?label), {pattern}, \"i\"))
}}
LIMIT 1",
        ext = ext::NAMESPACE,
        prov = prov::NAMESPACE,
        rdfs = rdfs::NAMESPACE,
    )
}

/// Any subject pointing at the area, through any predicate.
pub(crate) fn governing_units(area: Option<NamedNodeRef<'_>>) -> String {
    let values = values("werkingsgebied", area);
    format!(
        "SELECT ?bestuurseenheid
WHERE {{
    {values}
    ?bestuurseenheid ?p ?werkingsgebied .
}}"
    )
}

pub(crate) fn governing_bodies(unit: NamedNodeRef<'_>) -> String {
    format!(
        "PREFIX besluit: <{besluit}>

SELECT ?bestuursorgaan
WHERE {{
    ?bestuursorgaan besluit:bestuurt {unit} .
}}",
        besluit = besluit::NAMESPACE,
    )
}

pub(crate) fn time_specializations<'a>(
    bodies: impl IntoIterator<Item = NamedNodeRef<'a>>,
) -> String {
    let values = values("bestuursorgaan", bodies);
    format!(
        "PREFIX mandaat: <{mandaat}>

SELECT ?tijdspecialisatie
WHERE {{
    {values}
    ?tijdspecialisatie mandaat:isTijdspecialisatieVan ?bestuursorgaan .
}}",
        mandaat = mandaat::NAMESPACE,
    )
}

pub(crate) fn decisions<'a>(
    bodies: impl IntoIterator<Item = NamedNodeRef<'a>>,
    order: SortOrder,
) -> String {
    let values = values("bestuursorgaan", bodies);
    format!(
        "PREFIX eli: <{eli}>

SELECT DISTINCT ?besluit ?publicatiedatum
WHERE {{
    {values}
    ?besluit eli:passed_by ?bestuursorgaan ;
        eli:date_publication ?publicatiedatum .
}}
ORDER BY {order}(?publicatiedatum)",
        eli = eli::NAMESPACE,
    )
}

/// An inline `VALUES` block. Without any node the block is empty and the query matches nothing.
fn values<'a>(variable: &str, nodes: impl IntoIterator<Item = NamedNodeRef<'a>>) -> String {
    let nodes = nodes
        .into_iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>();
    if nodes.is_empty() {
        format!("VALUES ?{variable} {{ }}")
    } else {
        format!("VALUES ?{variable} {{ {} }}", nodes.join(" "))
    }
}

/// Escapes the metacharacters of XPath regular expressions so `text` matches itself.
fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '|' | '.' | '?' | '*' | '+' | '(' | ')' | '{' | '}' | '-' | '[' | ']' | '^' | '$'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
