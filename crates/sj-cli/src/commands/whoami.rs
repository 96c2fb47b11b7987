//! Show the signed-in user's profile.

use std::io::Write;

use anyhow::{Context, Result};

use crate::Config;
use crate::commands::{authed_client, runtime};

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let client = authed_client(config)?;
    let user = runtime()?
        .block_on(client.current_user())
        .context("failed to fetch profile")?;

    writeln!(writer, "username: {}", user.username)?;
    writeln!(writer, "email:    {}", user.email)?;
    writeln!(writer, "user id:  {}", user.id)?;
    writeln!(
        writer,
        "status:   {}",
        if user.is_special { "special" } else { "regular" }
    )?;
    Ok(())
}
