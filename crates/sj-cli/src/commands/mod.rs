//! CLI command implementations.

use anyhow::{Context, Result};

use crate::Config;
use crate::token::TokenStore;

pub mod auth;
pub mod chart;
pub mod edit;
pub mod log;
pub mod stats;
pub mod whoami;

/// Builds an unauthenticated API client from the configuration.
pub(crate) fn client(config: &Config) -> Result<sj_api::Client> {
    sj_api::Client::new(&config.base_url).context("failed to create API client")
}

/// Builds a client carrying the stored bearer token.
pub(crate) fn authed_client(config: &Config) -> Result<sj_api::Client> {
    let token = TokenStore::new(&config.token_path)
        .load()?
        .context("not signed in (run `sj login` first)")?;
    Ok(client(config)?.with_token(token))
}

/// Single-use runtime for driving the async client from the sync CLI.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")
}
