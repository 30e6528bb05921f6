/// A `tools/call` request that cannot be served.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid tools/call parameters: {0}")]
    InvalidCall(#[source] serde_json::Error),
}
