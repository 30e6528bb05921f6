use crate::error::ToolError;
use lblod_resolver::{
    no_decisions_message, DecisionResolver, InvalidSortOrder, ResultLimit, SortOrder,
};
use lblod_sparql_client::model::NamedNode;
use lblod_sparql_client::QueryExecutor;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

pub const GET_MUNICIPALITY_URI: &str = "getMunicipalityUri";
pub const GET_MUNICIPAL_COUNCIL_URI: &str = "getMunicipalCouncilUri";
pub const GET_DECISION_URIS: &str = "getDecisionURIs";

/// Arguments of `getMunicipalityUri`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct MunicipalityUriParams {
    #[schemars(description = "The (partial) name of the municipality (e.g., 'Gent', 'Aalst').")]
    pub name: String,
}

/// Arguments of `getMunicipalCouncilUri`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MunicipalCouncilUriParams {
    #[schemars(description = "The URI of the municipality, as returned by getMunicipalityUri.")]
    pub municipality_uri: String,
}

/// Arguments of `getDecisionURIs`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct DecisionUrisParams {
    #[schemars(description = "The (partial) name of the municipality (e.g., 'Gent', 'Aalst').")]
    pub name: String,
    #[serde(default = "all_decisions")]
    #[schemars(description = "How many decisions to return. -1 returns all of them.")]
    pub number: i64,
    #[serde(default = "newest_first")]
    #[schemars(
        description = "'DESC' for the most recently published decisions first, 'ASC' for the oldest first."
    )]
    pub order: String,
}

fn all_decisions() -> i64 {
    -1
}

fn newest_first() -> String {
    SortOrder::Desc.as_str().to_owned()
}

/// A tool as listed by `tools/list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// The tools this server offers, with their input schemas.
pub fn tool_definitions() -> Result<Vec<ToolDefinition>, serde_json::Error> {
    Ok(vec![
        ToolDefinition {
            name: GET_MUNICIPALITY_URI,
            description: "Get the URI of a municipality based on a partial or full name. \
                Returns the URI of the matched municipality, or an error message.",
            input_schema: serde_json::to_value(schema_for!(MunicipalityUriParams))?,
        },
        ToolDefinition {
            name: GET_MUNICIPAL_COUNCIL_URI,
            description: "Get the URI of the municipal council (gemeenteraad) governing a \
                municipality. Returns the URI of the council, or an error message.",
            input_schema: serde_json::to_value(schema_for!(MunicipalCouncilUriParams))?,
        },
        ToolDefinition {
            name: GET_DECISION_URIS,
            description: "Get the URIs of the decisions published by the governing bodies of a \
                municipality, sorted by publication date. Returns a list of decision URIs.",
            input_schema: serde_json::to_value(schema_for!(DecisionUrisParams))?,
        },
    ])
}

/// The answer of a single-URI lookup.
///
/// Serializes as the bare URI string or as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Lookup {
    Found(String),
    NotFound { error: String },
}

impl Lookup {
    fn not_found(message: String) -> Self {
        Self::NotFound { error: message }
    }
}

impl From<Lookup> for CallToolResult {
    fn from(lookup: Lookup) -> Self {
        match lookup {
            Lookup::Found(uri) => Self::text(uri),
            Lookup::NotFound { error } => Self::text(json!({ "error": error }).to_string()),
        }
    }
}

/// One item of a tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

/// The `result` of a `tools/call` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    pub is_error: bool,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            structured_content: None,
            is_error: false,
        }
    }

    /// One text item per entry, plus the whole list as structured content.
    pub fn list(items: Vec<String>) -> Self {
        Self {
            structured_content: Some(json!({ "result": items })),
            content: items
                .into_iter()
                .map(|text| Content::Text { text })
                .collect(),
            is_error: false,
        }
    }

    /// A failure the caller can read and act on, as opposed to a protocol error.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(text)
        }
    }
}

/// The lookups offered as MCP tools, backed by a [`DecisionResolver`].
#[derive(Debug, Clone)]
pub struct ToolSet<E> {
    resolver: DecisionResolver<E>,
}

impl<E: QueryExecutor> ToolSet<E> {
    pub fn new(resolver: DecisionResolver<E>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &DecisionResolver<E> {
        &self.resolver
    }

    /// Runs the tool `name` with JSON `arguments`.
    ///
    /// Only an unknown tool or arguments of the wrong shape are errors. Lookups that find nothing
    /// are ordinary results.
    pub async fn call(&self, name: &str, arguments: Value) -> Result<CallToolResult, ToolError> {
        info!(tool = name, "Calling tool");
        Ok(match name {
            GET_MUNICIPALITY_URI => self
                .municipality_uri(parse_arguments(name, arguments)?)
                .await
                .into(),
            GET_MUNICIPAL_COUNCIL_URI => self
                .municipal_council_uri(parse_arguments(name, arguments)?)
                .await
                .into(),
            GET_DECISION_URIS => match self.decision_uris(parse_arguments(name, arguments)?).await {
                Ok(uris) => CallToolResult::list(uris),
                Err(e) => CallToolResult::error(e.to_string()),
            },
            _ => return Err(ToolError::UnknownTool(name.to_owned())),
        })
    }

    pub async fn municipality_uri(&self, params: MunicipalityUriParams) -> Lookup {
        match self.resolver.municipality_uri(&params.name).await {
            Some(uri) => Lookup::Found(uri.into_string()),
            None => Lookup::not_found(format!(
                "No municipality URI found for name: {}",
                params.name
            )),
        }
    }

    pub async fn municipal_council_uri(&self, params: MunicipalCouncilUriParams) -> Lookup {
        let Ok(municipality) = NamedNode::new(params.municipality_uri.as_str()) else {
            return Lookup::not_found(format!(
                "Invalid municipality URI: {}",
                params.municipality_uri
            ));
        };
        match self
            .resolver
            .municipal_council_uri(municipality.as_ref())
            .await
        {
            Some(uri) => Lookup::Found(uri.into_string()),
            None => Lookup::not_found(format!(
                "No municipal council URI found for municipality: {}",
                params.municipality_uri
            )),
        }
    }

    /// The decision URIs of the municipality, or a single instruction message when there are
    /// none.
    pub async fn decision_uris(
        &self,
        params: DecisionUrisParams,
    ) -> Result<Vec<String>, InvalidSortOrder> {
        let order = params.order.parse::<SortOrder>()?;
        let uris = self
            .resolver
            .decision_uris(&params.name, ResultLimit::from_count(params.number), order)
            .await;
        if uris.is_empty() {
            return Ok(vec![no_decisions_message(&params.name)]);
        }
        Ok(uris.into_iter().map(NamedNode::into_string).collect())
    }
}

fn parse_arguments<T: for<'de> Deserialize<'de>>(
    tool: &str,
    arguments: Value,
) -> Result<T, ToolError> {
    let arguments = if arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|source| ToolError::InvalidArguments {
        tool: tool.to_owned(),
        source,
    })
}
