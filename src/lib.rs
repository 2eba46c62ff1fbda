//! # Sesamo (Authentication Core)
//!
//! `sesamo` is a small authentication core: user signup and login, password
//! reset via short-lived tokens, and a permission-seeding utility. Session
//! token minting and email delivery belong to downstream services reached
//! over a message bus; this crate orchestrates calls to them behind narrow
//! trait interfaces and never implements a transport.
//!
//! ## Passwords
//!
//! Stored passwords are always bcrypt hashes. Plaintext passwords cross API
//! boundaries only as [`secrecy::SecretString`], and no value returned by
//! the orchestrator carries a password hash.
//!
//! ## Reset tokens
//!
//! A forgot-password request issues a 10-character URL-safe token bound to
//! one user. A token is honored only while its status is `ACTIVE` and its
//! age is within the configured TTL; a successful password change marks it
//! `CONSUMED`.

pub mod auth;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
