//! The `putsecret` command: fetch the repository key, encrypt, store.
//!
//! User-facing output uses writeln! to the given writer (stdout in the binary).

use std::io::Write;

use anyhow::Context;

use crate::github::GitHubClient;

/// Positional arguments and flags for one secret write.
#[derive(clap::Args, Debug, Clone)]
pub struct PutSecretArgs {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Name of the Actions secret.
    pub secret_name: String,
    /// Plaintext value to encrypt.
    pub secret_value: String,
    /// Dry run: encrypt and print the sealed value without storing it.
    #[arg(long)]
    pub dry: bool,
}

/// Run one secret write against `client`.
pub async fn run(client: &GitHubClient, args: &PutSecretArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let key = client
        .get_public_key(&args.owner, &args.repo)
        .await
        .context("couldn't obtain public key")?;

    if args.dry {
        let encrypted = ghsecret_crypto::encrypt(&key.key, &args.secret_value)
            .context("couldn't encrypt secret")?;
        writeln!(out, "{encrypted}")?;
        return Ok(());
    }

    let outcome = client
        .store_secret(&args.owner, &args.repo, &key, &args.secret_name, &args.secret_value)
        .await
        .context("couldn't store secret")?;
    writeln!(
        out,
        "{outcome} secret {} in {}/{}",
        args.secret_name, args.owner, args.repo
    )?;
    Ok(())
}
