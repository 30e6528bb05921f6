/// The MCP revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// What the server announces about itself during `initialize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
    pub instructions: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "Municipality URI Query Tool".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            instructions: "Looks up Flemish municipalities, their municipal councils and the \
                decisions of their governing bodies in the LBLOD linked-data store. Start from a \
                (partial) municipality name such as 'Gent' or 'Aalst'."
                .to_owned(),
        }
    }
}
