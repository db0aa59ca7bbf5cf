//! Tests for the GitHub API client and types.

#![allow(clippy::unwrap_used)]

use super::client::{DEFAULT_API_URL, GitHubClient, GitHubConfig, GitHubError};
use super::types::{EncryptedSecret, RepoPublicKey, SecretWrite};

fn config(base_url: &str) -> GitHubConfig {
    GitHubConfig {
        base_url: base_url.into(),
        username: None,
        token: "ghp_test".into(),
    }
}

// =============================================================================
// Client construction tests
// =============================================================================

#[test]
fn empty_base_url_returns_config_error() {
    let err = GitHubClient::new(&config("")).unwrap_err();
    assert!(matches!(err, GitHubError::Config(_)));
}

#[test]
fn empty_token_returns_config_error() {
    let cfg = GitHubConfig {
        token: String::new(),
        ..config(DEFAULT_API_URL)
    };
    let err = GitHubClient::new(&cfg).unwrap_err();
    assert!(matches!(err, GitHubError::Config(_)));
}

#[test]
fn valid_config_creates_client() {
    assert!(GitHubClient::new(&config(DEFAULT_API_URL)).is_ok());
}

#[test]
fn unparseable_base_url_returns_config_error() {
    let err = GitHubClient::new(&config("api.github.com")).unwrap_err();
    assert!(matches!(err, GitHubError::Config(_)));
}

#[test]
fn non_hierarchical_base_url_returns_config_error() {
    let err = GitHubClient::new(&config("mailto:octocat@github.com")).unwrap_err();
    assert!(matches!(err, GitHubError::Config(_)));
}

#[test]
fn trailing_slash_stripped_from_base_url() {
    let client = GitHubClient::new(&config("https://api.github.com/")).unwrap();
    assert_eq!(
        client.secrets_url("o", "r", "public-key").unwrap().as_str(),
        "https://api.github.com/repos/o/r/actions/secrets/public-key"
    );
}

#[test]
fn secrets_url_keeps_base_path_prefix() {
    let client = GitHubClient::new(&config("https://ghe.example.com/api/v3")).unwrap();
    assert_eq!(
        client.secrets_url("octocat", "hello-world", "TOKEN").unwrap().as_str(),
        "https://ghe.example.com/api/v3/repos/octocat/hello-world/actions/secrets/TOKEN"
    );
}

#[test]
fn secrets_url_escapes_reserved_characters() {
    let client = GitHubClient::new(&config(DEFAULT_API_URL)).unwrap();
    let url = client.secrets_url("oct/cat", "hello?world", "PROD#TOKEN").unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.github.com/repos/oct%2Fcat/hello%3Fworld/actions/secrets/PROD%23TOKEN"
    );
    assert_eq!(url.fragment(), None);
    assert_eq!(url.query(), None);
}

// =============================================================================
// Type tests
// =============================================================================

#[test]
fn public_key_deserializes_from_api_json() {
    let json = r#"{
        "key_id": "012345678912345678",
        "key": "2Sg8iYjAxxmI2LvUXpJjkYrMxURPc8r+dB7TJyvv1234"
    }"#;
    let key: RepoPublicKey = serde_json::from_str(json).unwrap();
    assert_eq!(key.key_id, "012345678912345678");
    assert_eq!(key.key, "2Sg8iYjAxxmI2LvUXpJjkYrMxURPc8r+dB7TJyvv1234");
}

#[test]
fn encrypted_secret_serializes_expected_fields() {
    let secret = EncryptedSecret {
        key_id: "kid".into(),
        encrypted_value: "c2VhbGVk".into(),
    };
    let value = serde_json::to_value(&secret).unwrap();
    assert_eq!(value["key_id"], "kid");
    assert_eq!(value["encrypted_value"], "c2VhbGVk");
    assert_eq!(value.as_object().unwrap().len(), 2);
}

#[test]
fn secret_write_display() {
    assert_eq!(SecretWrite::Created.to_string(), "created");
    assert_eq!(SecretWrite::Updated.to_string(), "updated");
}

#[test]
fn encrypt_error_wraps_seal_error() {
    let err = GitHubError::from(ghsecret_crypto::SealError::InvalidKeyLength(3));
    assert_eq!(
        err.to_string(),
        "Encryption failed: recipient public key has invalid length (3 bytes)"
    );
}
