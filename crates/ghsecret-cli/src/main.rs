//! putsecret
//!
//! Encrypts a value against a repository's Actions public key and stores it
//! as a GitHub Actions secret.

use std::io;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ghsecret_cli::github::{DEFAULT_API_URL, GitHubClient, GitHubConfig};
use ghsecret_cli::put_cmd::{self, PutSecretArgs};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "putsecret=info,ghsecret_cli=info,ghsecret_crypto=warn";

#[derive(Parser, Debug)]
#[command(name = "putsecret")]
#[command(version, about = "Encrypt and store a GitHub Actions secret", long_about = None)]
struct Cli {
    #[command(flatten)]
    put: PutSecretArgs,

    /// GitHub API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Account name for basic auth (bearer auth when unset)
    #[arg(long, env = "GITHUB_USERNAME")]
    username: Option<String>,

    /// Personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --dry output on stdout stays pipeable.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting putsecret");

    let client = GitHubClient::new(&GitHubConfig {
        base_url: cli.api_url,
        username: cli.username,
        token: cli.token,
    })?;

    put_cmd::run(&client, &cli.put, &mut io::stdout().lock()).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn default_log_filter_parses() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
