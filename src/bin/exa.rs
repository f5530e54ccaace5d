//! CLI for the Exa search API.
//!
//! Usage: exa search --query "rust async runtimes" --num-results 5 --text

#[cfg(feature = "cli")]
mod cli {
    use clap::{Parser, Subcommand, ValueEnum};
    use devlookup::exa::{split_list, Livecrawl, SearchOptions, SearchType, TokenBudget};
    use devlookup::output::Emitter;
    use devlookup::types::{CodeContext, ResultsPage};
    use devlookup::format as report;
    use devlookup::ExaClient;

    #[derive(Parser)]
    #[command(name = "exa", about = "Exa API client for web search and content extraction", version)]
    struct Cli {
        /// API key (overrides EXA_API_KEY env var)
        #[arg(long, global = true)]
        api_key: Option<String>,

        /// Enable debug logging
        #[arg(long, global = true)]
        verbose: bool,

        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Clone, Copy, ValueEnum)]
    enum OutputFormat {
        Text,
        Json,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// Search the web
        Search {
            /// Search query
            #[arg(short, long)]
            query: String,
            /// Search type
            #[arg(short = 't', long = "type", value_enum, default_value = "auto")]
            search_type: SearchType,
            /// Number of results (max: 100)
            #[arg(short, long, default_value = "10")]
            num_results: u32,
            /// Include full text content
            #[arg(long)]
            text: bool,
            /// Include LLM-optimized context
            #[arg(long)]
            context: bool,
            /// Comma-separated domains to include
            #[arg(long)]
            include_domains: Option<String>,
            /// Comma-separated domains to exclude
            #[arg(long)]
            exclude_domains: Option<String>,
            /// Filter from date (ISO 8601)
            #[arg(long)]
            start_date: Option<String>,
            /// Filter to date (ISO 8601)
            #[arg(long)]
            end_date: Option<String>,
            /// Output format
            #[arg(short, long, value_enum, default_value = "text")]
            format: OutputFormat,
        },
        /// Extract content from URLs
        Contents {
            /// Comma-separated URLs to extract
            #[arg(short, long)]
            urls: String,
            /// Live crawl mode
            #[arg(long, value_enum)]
            livecrawl: Option<Livecrawl>,
            /// Output format
            #[arg(short, long, value_enum, default_value = "text")]
            format: OutputFormat,
        },
        /// Find code examples and programming context
        Code {
            /// Programming query
            #[arg(short, long)]
            query: String,
            /// Token limit: 'dynamic' or 50-100000
            #[arg(short, long, default_value = "5000", value_parser = parse_tokens)]
            tokens: TokenBudget,
            /// Output format
            #[arg(short, long, value_enum, default_value = "text")]
            format: OutputFormat,
        },
    }

    fn parse_tokens(s: &str) -> Result<TokenBudget, String> {
        s.parse::<TokenBudget>().map_err(|e| e.to_string())
    }

    fn make_client(api_key: Option<String>) -> devlookup::error::Result<ExaClient> {
        match api_key {
            Some(key) => ExaClient::from_key(key),
            None => ExaClient::from_env(),
        }
    }

    fn pretty(value: &serde_json::Value) -> devlookup::error::Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    pub async fn run() -> devlookup::error::Result<()> {
        let cli = Cli::parse();
        devlookup::logging::init(cli.verbose);

        let client = make_client(cli.api_key)?;
        let emitter = Emitter::new();

        match cli.command {
            Commands::Search {
                query,
                search_type,
                num_results,
                text,
                context,
                include_domains,
                exclude_domains,
                start_date,
                end_date,
                format,
            } => {
                let mut options = SearchOptions::new(query);
                options.search_type = search_type;
                options.num_results = num_results;
                options.text = text;
                options.context = context;
                options.include_domains = include_domains.as_deref().map(split_list).unwrap_or_default();
                options.exclude_domains = exclude_domains.as_deref().map(split_list).unwrap_or_default();
                options.start_date = start_date;
                options.end_date = end_date;

                let result = client.search(&options).await?;
                let output = match format {
                    OutputFormat::Json => pretty(&result)?,
                    OutputFormat::Text => {
                        report::search_results(&ResultsPage::from_value(result)?.results)
                    }
                };
                emitter.emit(&output, "exa_search")?;
            }

            Commands::Contents {
                urls,
                livecrawl,
                format,
            } => {
                let result = client.contents(&split_list(&urls), livecrawl).await?;
                let output = match format {
                    OutputFormat::Json => pretty(&result)?,
                    OutputFormat::Text => {
                        report::contents_results(&ResultsPage::from_value(result)?.results)
                    }
                };
                emitter.emit(&output, "exa_contents")?;
            }

            Commands::Code {
                query,
                tokens,
                format,
            } => {
                let result = client.code_context(&query, Some(tokens)).await?;
                let output = match format {
                    OutputFormat::Json => pretty(&result)?,
                    OutputFormat::Text => report::code_context(&CodeContext::from_value(result)?),
                };
                emitter.emit(&output, "exa_code")?;
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
