//! putsecret library
//!
//! GitHub Actions secrets client and the command that drives it. Encryption
//! itself lives in `ghsecret-crypto`.

pub mod github;
pub mod put_cmd;
