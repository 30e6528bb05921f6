//! The LBLOD lookups as Model Context Protocol tools.
//!
//! ```text
//! MCP client
//!      │  JSON-RPC over stdio (framing)
//!      ▼
//! McpServer ── initialize, ping, tools/list, tools/call
//!      │
//!      ▼
//! ToolSet ── getMunicipalityUri, getMunicipalCouncilUri, getDecisionURIs
//!      │
//!      ▼
//! DecisionResolver ── QueryExecutor ── SPARQL endpoint
//! ```

mod config;
mod error;
pub mod framing;
pub mod jsonrpc;
mod server;
mod tools;

pub use config::{ServerConfig, PROTOCOL_VERSION};
pub use error::ToolError;
pub use server::McpServer;
pub use tools::{
    tool_definitions, CallToolResult, Content, DecisionUrisParams, Lookup,
    MunicipalCouncilUriParams, MunicipalityUriParams, ToolDefinition, ToolSet,
    GET_DECISION_URIS, GET_MUNICIPALITY_URI, GET_MUNICIPAL_COUNCIL_URI,
};
