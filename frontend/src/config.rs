//! Configuration for native runs.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Configuration structure that matches the TOML file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    api: ApiConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiConfig {
    #[serde(default = "default_api_url")]
    url: String,
    /// Accept self-signed certificates (development API servers)
    #[serde(default)]
    accept_invalid_certs: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            accept_invalid_certs: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    /// If not set, uses RUST_LOG environment variable or defaults to "info"
    log_level: Option<String>,
}

fn default_api_url() -> String {
    mediadeck_types::DEFAULT_API_URL.to_string()
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Origin of the REST API, without trailing slash
    pub api_url: String,
    pub accept_invalid_certs: bool,
    /// Log level (if set, overrides RUST_LOG environment variable)
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with full priority chain: CLI args > env vars > config files > defaults.
    ///
    /// Config files are searched in this order:
    /// 1. `.mediadeck.toml` in current directory
    /// 2. `config.toml` in user config directory (~/.config/mediadeck/ on Linux)
    ///
    /// Environment variables use the `MEDIADECK_` prefix with `__` between
    /// section and key, e.g. `MEDIADECK_API__URL`.
    pub fn from_figment(
        api_url: Option<String>,
        accept_invalid_certs: Option<bool>,
        log_level: Option<String>,
    ) -> anyhow::Result<Self> {
        let local_config = std::env::current_dir()
            .ok()
            .map(|d| d.join(".mediadeck.toml"));
        let user_config = directories::ProjectDirs::from("", "", "mediadeck")
            .map(|dirs| dirs.config_dir().join("config.toml"));

        let mut figment = Figment::new().merge(Serialized::defaults(ConfigFile {
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
        }));

        if let Some(ref path) = user_config {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        if let Some(ref path) = local_config {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("MEDIADECK_").split("__"));

        if let Some(ref url) = api_url {
            figment = figment.merge(Serialized::default("api.url", url));
        }
        if let Some(accept) = accept_invalid_certs {
            figment = figment.merge(Serialized::default("api.accept_invalid_certs", accept));
        }
        if let Some(ref level) = log_level {
            figment = figment.merge(Serialized::default("logging.log_level", level));
        }

        let config_file: ConfigFile = figment.extract()?;
        let api_url = config_file.api.url.trim().trim_end_matches('/').to_string();

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            anyhow::bail!("API URL must start with http:// or https://, got '{}'", api_url);
        }

        Ok(Self {
            api_url,
            accept_invalid_certs: config_file.api.accept_invalid_certs,
            log_level: config_file.logging.log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        std::env::remove_var("MEDIADECK_API__URL");
        std::env::remove_var("MEDIADECK_API__ACCEPT_INVALID_CERTS");
        std::env::remove_var("MEDIADECK_LOGGING__LOG_LEVEL");
    }

    /// Run `f` with the working directory set to a fresh temp dir holding `local_config`.
    fn in_temp_dir<T>(local_config: Option<&str>, f: impl FnOnce() -> T) -> T {
        let temp_dir = TempDir::new().unwrap();
        if let Some(content) = local_config {
            fs::write(temp_dir.path().join(".mediadeck.toml"), content).unwrap();
        }

        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();
        let result = f();
        // Restore before temp_dir is dropped
        let _ = std::env::set_current_dir(original_dir);
        result
    }

    #[test]
    #[serial]
    fn test_from_figment_defaults() {
        clear_env();

        let config = in_temp_dir(None, || Config::from_figment(None, None, None).unwrap());

        assert_eq!(config.api_url, mediadeck_types::DEFAULT_API_URL);
        assert!(!config.accept_invalid_certs);
        assert!(config.log_level.is_none());
    }

    #[test]
    #[serial]
    fn test_from_figment_config_file() {
        clear_env();

        let config = in_temp_dir(
            Some(
                r#"
[api]
url = "http://media.internal:5000/"
accept_invalid_certs = true

[logging]
log_level = "debug"
"#,
            ),
            || Config::from_figment(None, None, None).unwrap(),
        );

        assert_eq!(config.api_url, "http://media.internal:5000");
        assert!(config.accept_invalid_certs);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    #[serial]
    fn test_from_figment_env_vars_override_config_file() {
        clear_env();
        std::env::set_var("MEDIADECK_API__URL", "https://env.example.com");

        let config = in_temp_dir(Some("[api]\nurl = \"http://file.example.com\""), || {
            Config::from_figment(None, None, None).unwrap()
        });
        clear_env();

        assert_eq!(config.api_url, "https://env.example.com");
    }

    #[test]
    #[serial]
    fn test_from_figment_cli_overrides_env_and_config() {
        clear_env();
        std::env::set_var("MEDIADECK_API__URL", "https://env.example.com");

        let config = in_temp_dir(Some("[api]\nurl = \"http://file.example.com\""), || {
            Config::from_figment(
                Some("https://cli.example.com".to_string()),
                Some(true),
                Some("warn".to_string()),
            )
            .unwrap()
        });
        clear_env();

        assert_eq!(config.api_url, "https://cli.example.com");
        assert!(config.accept_invalid_certs);
        assert_eq!(config.log_level.as_deref(), Some("warn"));
    }

    #[test]
    #[serial]
    fn test_from_figment_rejects_non_http_url() {
        clear_env();

        let result = in_temp_dir(None, || {
            Config::from_figment(Some("ftp://files.example.com".to_string()), None, None)
        });

        assert!(result.is_err());
    }
}
