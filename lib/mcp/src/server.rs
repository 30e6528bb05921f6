use crate::config::{ServerConfig, PROTOCOL_VERSION};
use crate::error::ToolError;
use crate::jsonrpc::{RpcRequest, RpcResponse};
use crate::tools::{tool_definitions, CallToolResult, ToolSet};
use lblod_sparql_client::QueryExecutor;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Answers MCP requests with a [`ToolSet`].
///
/// The server is transport-agnostic: it takes message bodies and returns responses. Framing is
/// left to [`crate::framing`].
#[derive(Debug, Clone)]
pub struct McpServer<E> {
    config: ServerConfig,
    tools: ToolSet<E>,
}

impl<E: QueryExecutor> McpServer<E> {
    pub fn new(config: ServerConfig, tools: ToolSet<E>) -> Self {
        Self { config, tools }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn tools(&self) -> &ToolSet<E> {
        &self.tools
    }

    /// Handles one raw message body.
    ///
    /// Returns `None` for notifications, which must not be answered.
    pub async fn handle(&self, message: &[u8]) -> Option<RpcResponse> {
        let request = match serde_json::from_slice::<RpcRequest>(message) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Invalid JSON-RPC message");
                return Some(RpcResponse::parse_error());
            }
        };
        if request.is_notification() {
            debug!(method = %request.method, "Received notification");
            return None;
        }
        Some(self.dispatch(request).await)
    }

    pub async fn dispatch(&self, request: RpcRequest) -> RpcResponse {
        let RpcRequest {
            jsonrpc,
            id,
            method,
            params,
        } = request;
        if jsonrpc != "2.0" {
            return RpcResponse::invalid_request(id);
        }
        debug!(method = %method, "Dispatching request");
        match method.as_str() {
            "initialize" => RpcResponse::success(id, self.initialize()),
            "ping" => RpcResponse::success(id, json!({})),
            "tools/list" => match tool_definitions() {
                Ok(tools) => RpcResponse::success(id, json!({ "tools": tools })),
                Err(e) => {
                    error!(error = %e, "Failed to render the tool schemas");
                    RpcResponse::internal_error(id, e.to_string())
                }
            },
            "tools/call" => match self.call_tool(params).await {
                Ok(result) => match serde_json::to_value(result) {
                    Ok(result) => RpcResponse::success(id, result),
                    Err(e) => RpcResponse::internal_error(id, e.to_string()),
                },
                Err(e) => {
                    warn!(error = %e, "Rejected tool call");
                    RpcResponse::invalid_params(id, e.to_string())
                }
            },
            _ => RpcResponse::method_not_found(id, &method),
        }
    }

    fn initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": self.config.name,
                "version": self.config.version,
            },
            "instructions": self.config.instructions,
        })
    }

    async fn call_tool(&self, params: Value) -> Result<CallToolResult, ToolError> {
        let CallParams { name, arguments } =
            serde_json::from_value(params).map_err(ToolError::InvalidCall)?;
        self.tools.call(&name, arguments).await
    }
}
