//! Command-line interface for email-warden.
//!
//! Validates one or more addresses through the configured chain and prints
//! the verdicts. Exits non-zero when any address would be rejected.

use clap::Parser;
use email_warden_core::{build_validator, ConfigBuilder, EmailValidator};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "email-warden",
    version,
    about = "Checks whether email addresses should be accepted before use."
)]
struct Cli {
    /// Email addresses to validate.
    #[arg(required = true)]
    addresses: Vec<String>,

    /// Path to a TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Remote verification account username.
    #[arg(long, env = "EMAIL_WARDEN_API_USERNAME", hide_env_values = true)]
    api_username: Option<String>,

    /// Remote verification account password.
    #[arg(long, env = "EMAIL_WARDEN_API_PASSWORD", hide_env_values = true)]
    api_password: Option<String>,

    /// Print one JSON object per result instead of the table.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut builder = ConfigBuilder::new();
    if let Some(path) = cli.config {
        builder = builder.config_file(path);
    }
    if let (Some(username), Some(password)) = (cli.api_username, cli.api_password) {
        builder = builder.api_credentials(username, password);
    }
    let config = builder.build()?;

    let validator = build_validator(&config)?;
    let results = validator.validate_batch(&cli.addresses).await;

    let mut rejected = 0usize;
    for result in &results {
        let allowed = validator.should_allow(result);
        if !allowed {
            rejected += 1;
        }

        if cli.json {
            println!("{}", serde_json::to_string(result)?);
        } else {
            println!(
                "{:<40} {:<8} allow={} {}",
                result.email,
                result.status.to_string(),
                allowed,
                result.reason.as_deref().unwrap_or("")
            );
        }
    }

    if rejected > 0 {
        tracing::info!(rejected, total = results.len(), "Some addresses were rejected");
        std::process::exit(1);
    }
    Ok(())
}
