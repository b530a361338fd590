use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_HTTP_PORT: u16 = 3000;
pub const DEFAULT_PREFIX_STORE_PATH: &str = "prefixes.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub discord_token: Option<String>,
    pub http_port: u16,
    pub prefix_store_path: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_port = match lookup("PORT").filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number, got '{}': {}", raw, e))?,
            None => DEFAULT_HTTP_PORT,
        };

        Ok(Config {
            discord_token: lookup("DISCORD_TOKEN")
                .or_else(|| lookup("TOKEN"))
                .filter(|token| !token.trim().is_empty()),
            http_port,
            prefix_store_path: lookup("PREFIX_STORE_PATH")
                .unwrap_or_else(|| DEFAULT_PREFIX_STORE_PATH.to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn discord_token(&self) -> Result<&str> {
        self.discord_token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("DISCORD_TOKEN (or TOKEN) environment variable not set"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_with_defaults() {
        let config = Config::from_lookup(lookup_from(&[("DISCORD_TOKEN", "test_discord_token")])).unwrap();
        assert_eq!(config.discord_token().unwrap(), "test_discord_token");
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.prefix_store_path, "prefixes.json");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_falls_back_to_token_variable() {
        let config = Config::from_lookup(lookup_from(&[("TOKEN", "legacy_token")])).unwrap();
        assert_eq!(config.discord_token().unwrap(), "legacy_token");
    }

    #[test]
    fn test_config_missing_token_only_fails_on_access() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.discord_token.is_none());
        assert!(config.discord_token().is_err());
    }

    #[test]
    fn test_config_reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "t"),
            ("PORT", "8080"),
            ("PREFIX_STORE_PATH", "/var/lib/warden/prefixes.json"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.prefix_store_path, "/var/lib/warden/prefixes.json");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_config_blank_port_uses_default() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "")])).unwrap();
        assert_eq!(config.http_port, 3000);

        let config = Config::from_lookup(lookup_from(&[("PORT", "   ")])).unwrap();
        assert_eq!(config.http_port, 3000);
    }

    #[test]
    fn test_config_rejects_invalid_port() {
        let result = Config::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert!(result.is_err());
    }
}
