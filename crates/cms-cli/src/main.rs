//! CMS CLI - run guarded CMS resolvers from the terminal
//!
//! Each invocation loads a config fixture, builds one request context and
//! runs exactly one resolver. The typed response is printed to stdout as
//! pretty JSON; logs go to stderr.
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`CMS_*`)
//! 3. Config file (`--config FILE`, also: `CMS_CONFIG`)
//! 4. Global config (`~/.cms/config.toml`)
//! 5. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `CMS_CONFIG`: Config file path
//! - `CMS_LOCALE`: Content locale of the request
//! - `CMS_IDENTITY_ID`: Acting identity id
//! - `CMS_IDENTITY_NAME`: Acting identity display name
//! - `CMS_INSTALLED`: Start with the CMS installed (`true`/`false`)
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | `ok` response |
//! | 1 | invalid arguments or configuration |
//! | 2 | `notFound`, `notAuthorized` or `error` response |

mod commands;

use anyhow::Result;
use clap::Parser;
use cms_runtime::config::ConfigLoader;
use cms_types::ErrorCode;
use commands::Command;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// CMS CLI - run guarded CMS resolvers from the terminal
#[derive(Parser, Debug)]
#[command(name = "cms")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file layered over the global config
    #[arg(short, long, value_name = "FILE", env = "CMS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Skip the global config (~/.cms/config.toml)
    #[arg(long, global = true)]
    no_global: bool,

    /// Content locale of the request (overrides CMS_LOCALE)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Acting identity id (overrides CMS_IDENTITY_ID)
    #[arg(long = "as", value_name = "ID", global = true)]
    identity: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing(args: &Args) {
    // --debug > --verbose > RUST_LOG env > default "warn"
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(&args);

    let mut loader = ConfigLoader::new();
    if args.no_global {
        loader = loader.skip_global_config();
    }
    if let Some(ref path) = args.config {
        loader = loader.with_file(path);
    }
    let mut config = loader
        .load()
        .map_err(|e| anyhow::anyhow!("Config error [{}]: {e}", e.code()))?;

    // CLI args override (highest priority)
    if let Some(ref locale) = args.locale {
        config.locale = Some(locale.clone());
    }
    if let Some(ref id) = args.identity {
        config.identity.id = Some(id.clone());
    }

    info!(
        identity = config.identity.id(),
        locale = config.locale.as_deref().unwrap_or("(none)"),
        grants = config.grants.len(),
        "Request context"
    );

    let ctx = config.into_context();
    let ok = commands::run(args.command, &ctx).await?;

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}
