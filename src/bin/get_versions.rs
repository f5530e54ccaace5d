//! Latest versions of many packages from deps.dev, as JSON.
//!
//! Usage:
//!     get-versions npm express lodash @types/node
//!     get-versions pypi requests django flask
//!     get-versions go github.com/gin-gonic/gin

#[cfg(feature = "cli")]
mod cli {
    use clap::error::ErrorKind;
    use clap::{Parser, ValueEnum};
    use devlookup::batch::DEFAULT_WIDTH;
    use devlookup::versions::{
        invalid_system_error, latest_versions, parse_batch_system, usage_error, LatestVersion,
        VersionReport, BATCH_TIMEOUT,
    };
    use devlookup::DepsDevClient;

    #[derive(Parser)]
    #[command(
        name = "get-versions",
        about = "Get latest versions of packages from deps.dev",
        version
    )]
    struct Cli {
        /// Package ecosystem (npm, pypi, go, cargo, maven, nuget)
        system: String,

        /// Package names
        #[arg(required = true)]
        packages: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Maximum lookups in flight
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        concurrency: usize,

        /// Enable debug logging
        #[arg(long)]
        verbose: bool,
    }

    #[derive(Clone, Copy, ValueEnum)]
    enum OutputFormat {
        Json,
        Table,
    }

    fn print_table(records: &[LatestVersion]) {
        use comfy_table::{ContentArrangement, Table};

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Package", "Version", "Published", "Deprecated", "Note"]);

        for record in records {
            let row = match &record.error {
                Some(error) => vec![
                    record.package.clone(),
                    "-".to_string(),
                    String::new(),
                    String::new(),
                    error.clone(),
                ],
                None => vec![
                    record.package.clone(),
                    record.version.clone().unwrap_or_default(),
                    record.published_at.clone().unwrap_or_default(),
                    record.is_deprecated.map(|d| d.to_string()).unwrap_or_default(),
                    record.note.clone().unwrap_or_default(),
                ],
            };
            table.add_row(row);
        }

        println!("{table}");
    }

    fn fail(value: serde_json::Value) -> ! {
        println!(
            "{}",
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
        );
        std::process::exit(1);
    }

    pub async fn run() -> devlookup::error::Result<()> {
        let cli = match Cli::try_parse() {
            Ok(cli) => cli,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(_) => fail(usage_error()),
        };
        devlookup::logging::init(cli.verbose);

        let Some(system) = parse_batch_system(&cli.system) else {
            fail(invalid_system_error(&cli.system))
        };

        let client = DepsDevClient::from_env()?.with_timeout(BATCH_TIMEOUT)?;
        let packages = latest_versions(&client, system, &cli.packages, cli.concurrency).await;

        match cli.format {
            OutputFormat::Json => {
                let report = VersionReport {
                    system: system.as_cli_str().to_string(),
                    packages,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Table => print_table(&packages),
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
