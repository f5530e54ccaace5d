//! CLI for the Context7 documentation API.
//!
//! Usage: context7 docs --library-id /facebook/react --query "useEffect cleanup"

#[cfg(feature = "cli")]
mod cli {
    use clap::{Parser, Subcommand};
    use devlookup::context7::DocsFormat;
    use devlookup::output::Emitter;
    use devlookup::Context7Client;

    #[derive(Parser)]
    #[command(name = "context7", about = "Context7 API client for library documentation", version)]
    struct Cli {
        /// API key (overrides CONTEXT7_API_KEY env var)
        #[arg(long, global = true)]
        api_key: Option<String>,

        /// Enable debug logging
        #[arg(long, global = true)]
        verbose: bool,

        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// Search for libraries
        Search {
            /// Library name to search for
            #[arg(short, long)]
            library: String,
            /// Query for relevance ranking
            #[arg(short, long)]
            query: String,
        },
        /// Get library documentation
        Docs {
            /// Library ID (e.g., /facebook/react)
            #[arg(short = 'l', long)]
            library_id: String,
            /// Documentation topic or question
            #[arg(short, long)]
            query: String,
            /// Output format
            #[arg(short, long, value_enum, default_value = "txt")]
            format: DocsFormat,
        },
    }

    fn make_client(api_key: Option<String>) -> devlookup::error::Result<Context7Client> {
        match api_key {
            Some(key) => Context7Client::from_key(key),
            None => Context7Client::from_env(),
        }
    }

    pub async fn run() -> devlookup::error::Result<()> {
        let cli = Cli::parse();
        devlookup::logging::init(cli.verbose);

        let client = make_client(cli.api_key)?;
        let emitter = Emitter::new();

        match cli.command {
            Commands::Search { library, query } => {
                let result = client.search_libraries(&library, &query).await?;
                let output = serde_json::to_string_pretty(&result)?;
                emitter.emit(&output, "context7_search")?;
            }

            Commands::Docs {
                library_id,
                query,
                format,
            } => {
                let docs = client.docs(&library_id, &query, format).await?;
                emitter.emit(&docs.render()?, "context7_docs")?;
            }
        }

        Ok(())
    }
}

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary requires the 'cli' feature. Build with: cargo build --features cli");
    std::process::exit(1);
}
