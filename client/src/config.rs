use std::{env, fs, path::PathBuf, time::Duration};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::session::AuthToken;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Where the single persisted credential token lives, if anywhere.
    #[serde(default)]
    pub token_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
            token_path: None,
        }
    }
}

impl ClientConfig {
    const CONFIG_ENV: &'static str = "TRADEPOST_CONFIG_FILE";
    const API_BASE_ENV: &'static str = "TRADEPOST_API_BASE";
    const REQUEST_TIMEOUT_ENV: &'static str = "TRADEPOST_REQUEST_TIMEOUT_SECS";
    const TOKEN_PATH_ENV: &'static str = "TRADEPOST_TOKEN_PATH";

    /// Load configuration from defaults layered with optional config files
    /// and environment variables.
    pub fn load() -> Result<Self> {
        Self::load_with(None)
    }

    pub fn load_with(config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::resolve_config_path(config_path)? {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            let file_config: Self = toml::from_str(&contents)
                .with_context(|| format!("invalid config file: {}", path.display()))?;

            config = file_config;
        }

        if let Ok(base) = env::var(Self::API_BASE_ENV) {
            config.api_base = base;
        }

        if let Ok(timeout) = env::var(Self::REQUEST_TIMEOUT_ENV) {
            config.request_timeout_secs = timeout
                .parse()
                .with_context(|| format!("invalid {name}", name = Self::REQUEST_TIMEOUT_ENV))?;
        }

        if let Ok(path) = env::var(Self::TOKEN_PATH_ENV) {
            config.token_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Read the persisted credential token. Absent or blank files mean an
    /// anonymous session, not an error.
    pub fn load_token(&self) -> Option<AuthToken> {
        let path = self.token_path.as_ref()?;
        let raw = fs::read_to_string(path).ok()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(AuthToken::new(trimmed))
        }
    }

    fn resolve_config_path(explicit: Option<PathBuf>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            return Self::validate_path(path);
        }

        if let Ok(path) = env::var(Self::CONFIG_ENV) {
            return Self::validate_path(PathBuf::from(path));
        }

        let mut candidates = vec![PathBuf::from("tradepost.toml")];
        if let Some(dir) = Self::default_config_dir() {
            candidates.push(dir.join("config.toml"));
        }

        for candidate in candidates {
            if candidate.exists() {
                return Ok(Some(candidate));
            }
        }

        Ok(None)
    }

    fn validate_path(path: PathBuf) -> Result<Option<PathBuf>> {
        if path.exists() {
            Ok(Some(path))
        } else {
            Err(anyhow!(
                "configuration file does not exist: {}",
                path.display()
            ))
        }
    }

    fn default_config_dir() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".tradepost"))
    }
}

fn default_api_base() -> String {
    "http://localhost:5000".to_owned()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn home_dir() -> Option<PathBuf> {
    if let Some(path) = env::var_os("HOME") {
        return Some(PathBuf::from(path));
    }

    if let Some(path) = env::var_os("USERPROFILE") {
        return Some(PathBuf::from(path));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_config_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tradepost.toml");
        fs::write(
            &path,
            "api_base = \"http://market.test\"\nrequest_timeout_secs = 5\n",
        )
        .unwrap();

        let config = ClientConfig::load_with(Some(path)).unwrap();
        assert_eq!(config.api_base, "http://market.test");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ClientConfig::load_with(Some(dir.path().join("absent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn token_file_round_trip_trims_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("token");
        let mut file = fs::File::create(&token_path).unwrap();
        writeln!(file, "  secret-token  ").unwrap();

        let config = ClientConfig {
            token_path: Some(token_path),
            ..ClientConfig::default()
        };
        let token = config.load_token().unwrap();
        assert_eq!(token.as_str(), "secret-token");
    }

    #[test]
    fn blank_or_absent_token_file_means_anonymous() {
        let dir = tempfile::tempdir().unwrap();

        let config = ClientConfig {
            token_path: Some(dir.path().join("nope")),
            ..ClientConfig::default()
        };
        assert!(config.load_token().is_none());

        let blank = dir.path().join("blank");
        fs::write(&blank, "\n").unwrap();
        let config = ClientConfig {
            token_path: Some(blank),
            ..ClientConfig::default()
        };
        assert!(config.load_token().is_none());
    }
}
