//! Account registration, sign-in, and sign-out.

use std::io::Write;

use anyhow::{Context, Result};

use crate::Config;
use crate::commands::{client, runtime};
use crate::token::TokenStore;

pub fn register<W: Write>(
    writer: &mut W,
    config: &Config,
    username: &str,
    email: &str,
    password: &str,
) -> Result<()> {
    let client = client(config)?;
    let token = runtime()?
        .block_on(client.sign_up(username, email, password))
        .context("registration failed")?;
    TokenStore::new(&config.token_path).save(&token)?;
    writeln!(writer, "registered and signed in as {username}")?;
    Ok(())
}

pub fn login<W: Write>(
    writer: &mut W,
    config: &Config,
    email: &str,
    password: &str,
) -> Result<()> {
    let client = client(config)?;
    let token = runtime()?
        .block_on(client.sign_in(email, password))
        .context("sign-in failed")?;
    TokenStore::new(&config.token_path).save(&token)?;
    writeln!(writer, "signed in as {email}")?;
    Ok(())
}

pub fn logout<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    TokenStore::new(&config.token_path).clear()?;
    writeln!(writer, "signed out")?;
    Ok(())
}
