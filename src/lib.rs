//! # devlookup
//!
//! Rust clients for three developer lookup APIs:
//!
//! - **Context7**: library search and up-to-date library documentation
//! - **Exa**: web search, page content extraction, and code context
//! - **deps.dev**: package and version metadata across ecosystems
//!
//! Provides:
//! - **Library**: async clients, text formatters, and a bounded parallel
//!   lookup that returns results in input order
//! - **CLI**: `context7`, `exa`, `deps-dev` and `get-versions` binaries
//!   (feature `cli`, on by default)
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn example() -> devlookup::error::Result<()> {
//! use devlookup::{DepsDevClient, System};
//!
//! let client = DepsDevClient::new()?;
//! let info = client.package(System::Npm, "express").await?;
//! if let Some(latest) = info.default_version() {
//!     println!("express {:?}", latest.version_key.version);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Many packages at once
//!
//! ```no_run
//! # async fn example() -> devlookup::error::Result<()> {
//! use devlookup::versions::latest_versions;
//! use devlookup::{batch::DEFAULT_WIDTH, DepsDevClient, System};
//!
//! let client = DepsDevClient::new()?;
//! let packages = vec!["requests".to_string(), "django".to_string()];
//! for record in latest_versions(&client, System::Pypi, &packages, DEFAULT_WIDTH).await {
//!     println!("{:?}", record);
//! }
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod client;
pub mod context7;
pub mod depsdev;
pub mod error;
pub mod exa;
pub mod format;
pub mod output;
pub mod retry;
pub mod service;
pub mod types;
pub mod versions;

#[cfg(feature = "cli")]
pub mod logging;

// Re-export key types at the crate root.
pub use context7::Context7Client;
pub use depsdev::{DepsDevClient, System};
pub use error::LookupError;
pub use exa::ExaClient;
pub use retry::RetryPolicy;
pub use service::Service;
pub use types::*;
