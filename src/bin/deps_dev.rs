//! CLI for the deps.dev package metadata API.
//!
//! Usage: deps-dev package --system npm --package express --all-versions

#[cfg(feature = "cli")]
mod cli {
    use clap::{Parser, Subcommand, ValueEnum};
    use devlookup::format::{package_report, version_report};
    use devlookup::output::Emitter;
    use devlookup::{DepsDevClient, PackageInfo, System, VersionDetail};

    #[derive(Parser)]
    #[command(name = "deps-dev", about = "deps.dev API client for package version lookup", version)]
    struct Cli {
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
        /// Get package info
        Package {
            /// Package ecosystem (npm, pypi, go, etc.)
            #[arg(short, long)]
            system: String,
            /// Package name
            #[arg(short, long)]
            package: String,
            /// Output format
            #[arg(short, long, value_enum, default_value = "text")]
            format: OutputFormat,
            /// Show recent versions
            #[arg(short, long)]
            all_versions: bool,
        },
        /// Get specific version details
        Version {
            /// Package ecosystem (npm, pypi, go, etc.)
            #[arg(short, long)]
            system: String,
            /// Package name
            #[arg(short, long)]
            package: String,
            /// Version number
            #[arg(short = 'v', long)]
            version: String,
            /// Output format
            #[arg(short, long, value_enum, default_value = "text")]
            format: OutputFormat,
        },
    }

    pub async fn run() -> devlookup::error::Result<()> {
        let cli = Cli::parse();
        devlookup::logging::init(cli.verbose);

        let client = DepsDevClient::from_env()?;
        let emitter = Emitter::new();

        match cli.command {
            Commands::Package {
                system,
                package,
                format,
                all_versions,
            } => {
                let system: System = system.parse()?;
                let raw = client.package_json(system, &package).await?;
                let output = match format {
                    OutputFormat::Json => serde_json::to_string_pretty(&raw)?,
                    OutputFormat::Text => {
                        let info = PackageInfo::from_value(raw)?;
                        package_report(&info, system, &package, all_versions)
                    }
                };
                emitter.emit(&output, "deps_dev_package")?;
            }

            Commands::Version {
                system,
                package,
                version,
                format,
            } => {
                let system: System = system.parse()?;
                let raw = client.version_json(system, &package, &version).await?;
                let output = match format {
                    OutputFormat::Json => serde_json::to_string_pretty(&raw)?,
                    OutputFormat::Text => {
                        let detail = VersionDetail::from_value(raw)?;
                        version_report(&detail, system, &package, &version)
                    }
                };
                emitter.emit(&output, "deps_dev_version")?;
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
        if let devlookup::LookupError::UnknownSystem(_) = e {
            eprintln!("Supported systems: {}", devlookup::System::supported_list());
        }
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary requires the 'cli' feature. Build with: cargo build --features cli");
    std::process::exit(1);
}
