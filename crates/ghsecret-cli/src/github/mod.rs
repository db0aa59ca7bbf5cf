//! GitHub API integration.
//!
//! Provides a reqwest-based client for the GitHub REST API v3, covering the
//! repository Actions secrets endpoints.

mod client;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::{DEFAULT_API_URL, GitHubClient, GitHubConfig, GitHubError};
pub use types::{EncryptedSecret, RepoPublicKey, SecretWrite};
