use clap::{Parser, Subcommand, ValueHint};
use lblod_resolver::SortOrder;
use lblod_sparql_client::DEFAULT_ENDPOINT;
use url::Url;

#[derive(Parser)]
#[command(about, version, name = "lblod-mcp")]
/// Looks up Flemish municipalities and their decisions in the LBLOD linked-data store, as an MCP
/// server or from the command line
pub struct Args {
    /// SPARQL endpoint to query
    #[arg(long, global = true, default_value = DEFAULT_ENDPOINT, value_hint = ValueHint::Url)]
    pub endpoint: Url,
    /// Give up on a query after this many seconds
    ///
    /// By default queries wait until the endpoint answers or the connection fails.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
    /// Log filter, in `RUST_LOG` syntax
    ///
    /// The `RUST_LOG` environment variable takes precedence. Logs are written to stderr.
    #[arg(long, global = true, default_value = "info")]
    pub log: String,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the lookups as MCP tools over stdin and stdout (the default)
    Serve,
    /// Print the URI of the municipality whose name contains NAME
    Municipality {
        /// The (partial) name of the municipality, e.g. "Gent"
        name: String,
    },
    /// Print the URI of the municipal council of a municipality
    Council {
        /// The municipality URI, as printed by the `municipality` command
        #[arg(value_hint = ValueHint::Url)]
        municipality_uri: String,
    },
    /// Print the URIs of the decisions of a municipality's governing bodies
    Decisions {
        /// The (partial) name of the municipality, e.g. "Aalst"
        name: String,
        /// How many decisions to print, -1 for all of them
        #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
        number: i64,
        /// ASC for the oldest decisions first, DESC for the newest first
        #[arg(short, long, default_value_t = SortOrder::Desc)]
        order: SortOrder,
    },
}
