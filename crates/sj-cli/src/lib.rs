//! Sleep journal CLI library.
//!
//! This crate provides the CLI interface for the sleep journal.

mod cli;
pub mod commands;
mod config;
mod token;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use token::TokenStore;
