//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the backend.
    pub base_url: String,

    /// Where the bearer token is persisted between invocations.
    pub token_path: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("token_path", &self.token_path)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let state_dir = dirs_state_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            base_url: sj_api::DEFAULT_BASE_URL.to_string(),
            token_path: state_dir.join("token"),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SJ_*)
        figment = figment.merge(Env::prefixed("SJ_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for sj.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sj"))
}

/// Returns the platform-specific state directory for sj.
///
/// On Linux: `~/.local/state/sj`
pub fn dirs_state_path() -> Option<PathBuf> {
    dirs::state_dir().map(|p| p.join("sj"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_is_the_hosted_backend() {
        let config = Config::default();
        assert_eq!(config.base_url, sj_api::DEFAULT_BASE_URL);
    }

    #[test]
    fn default_token_path_ends_with_token() {
        let config = Config::default();
        assert_eq!(config.token_path.file_name().unwrap(), "token");
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"https://sj.example.com\"\ntoken_path = \"/tmp/sj-token\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.base_url, "https://sj.example.com");
        assert_eq!(config.token_path, PathBuf::from("/tmp/sj-token"));
    }
}
