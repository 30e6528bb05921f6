use crate::error::QueryError;
use oxrdf::{NamedNode, Term};
use sparesults::{
    QueryResultsFormat, QueryResultsParser, QuerySolution, ReaderQueryResultsParserOutput,
};
use std::collections::BTreeMap;

/// The solution sequence of a `SELECT` query, in the order the store returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    variables: Vec<String>,
    rows: Vec<Row>,
}

impl RowSet {
    pub fn new(variables: Vec<String>, rows: Vec<Row>) -> Self {
        Self { variables, rows }
    }

    /// Parses a SPARQL query results document.
    ///
    /// Boolean results are rejected with [`QueryError::NotSolutions`].
    pub fn parse(body: &[u8], format: QueryResultsFormat) -> Result<Self, QueryError> {
        match QueryResultsParser::from_format(format).for_reader(body)? {
            ReaderQueryResultsParserOutput::Solutions(solutions) => {
                let variables = solutions
                    .variables()
                    .iter()
                    .map(|variable| variable.as_str().to_owned())
                    .collect();
                let rows = solutions
                    .map(|solution| solution.map(Row::from))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self { variables, rows })
            }
            ReaderQueryResultsParserOutput::Boolean(_) => Err(QueryError::NotSolutions),
        }
    }

    /// The projected variables, without the leading `?`.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl IntoIterator for RowSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// A single solution: the terms bound to each variable. Unbound variables are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    bindings: BTreeMap<String, Term>,
}

impl Row {
    pub fn get(&self, variable: &str) -> Option<&Term> {
        self.bindings.get(variable)
    }

    /// The lexical value bound to `variable`: the IRI of a named node, the id of a blank node or
    /// the value of a literal.
    pub fn value(&self, variable: &str) -> Option<&str> {
        match self.get(variable)? {
            Term::NamedNode(node) => Some(node.as_str()),
            Term::BlankNode(node) => Some(node.as_str()),
            Term::Literal(literal) => Some(literal.value()),
            #[allow(unreachable_patterns, reason = "quoted triples only exist with rdf-star")]
            _ => None,
        }
    }

    /// The IRI bound to `variable`, if it is bound to a named node.
    pub fn named_node(&self, variable: &str) -> Option<&NamedNode> {
        match self.get(variable)? {
            Term::NamedNode(node) => Some(node),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.bindings
            .iter()
            .map(|(variable, term)| (variable.as_str(), term))
    }
}

impl From<QuerySolution> for Row {
    fn from(solution: QuerySolution) -> Self {
        solution
            .iter()
            .map(|(variable, term)| (variable.as_str(), term.clone()))
            .collect()
    }
}

impl<K: Into<String>, T: Into<Term>> FromIterator<(K, T)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            bindings: iter
                .into_iter()
                .map(|(variable, term)| (variable.into(), term.into()))
                .collect(),
        }
    }
}
