use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory (also holds persisted city selection)
    pub config_dir: PathBuf,

    /// Static-shell server settings
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Plaintext listener port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// TLS listener port
    #[serde(default = "default_https_port")]
    pub https_port: u16,

    /// PEM certificate for the TLS listener
    #[serde(default = "default_cert_path")]
    pub cert_path: PathBuf,

    /// PEM private key for the TLS listener
    #[serde(default = "default_key_path")]
    pub key_path: PathBuf,

    /// Directory served as the static site (must contain index.html)
    #[serde(default = "default_site_root")]
    pub site_root: PathBuf,
}

fn default_http_port() -> u16 {
    8080
}

fn default_https_port() -> u16 {
    8443
}

fn default_cert_path() -> PathBuf {
    PathBuf::from("server.cert")
}

fn default_key_path() -> PathBuf {
    PathBuf::from("server.key")
}

fn default_site_root() -> PathBuf {
    PathBuf::from("static")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            https_port: default_https_port(),
            cert_path: default_cert_path(),
            key_path: default_key_path(),
            site_root: default_site_root(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tempo");

        Self {
            config_dir,
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns an error if validation fails with critical errors; warnings
    /// are logged and tolerated.
    pub fn load_validated() -> Result<Self> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.server.http_port == 0 {
            result.add_error("server.http_port", "Port must be greater than 0");
        }
        if self.server.https_port == 0 {
            result.add_error("server.https_port", "Port must be greater than 0");
        }
        if self.server.http_port == self.server.https_port {
            result.add_error(
                "server.https_port",
                "Plaintext and TLS listeners cannot share a port",
            );
        }

        if !self.server.site_root.join("index.html").exists() {
            result.add_warning(
                "server.site_root",
                format!(
                    "No index.html under {}",
                    self.server.site_root.display()
                ),
            );
        }

        if !self.server.cert_path.exists() {
            result.add_warning(
                "server.cert_path",
                format!(
                    "Certificate not found: {} (TLS listener will fail to start)",
                    self.server.cert_path.display()
                ),
            );
        }
        if !self.server.key_path.exists() {
            result.add_warning(
                "server.key_path",
                format!(
                    "Private key not found: {} (TLS listener will fail to start)",
                    self.server.key_path.display()
                ),
            );
        }

        result
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("tempo");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports() {
        let config = Config::default();
        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.server.https_port, 8443);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "{}", result.error_summary());
    }

    #[test]
    fn test_shared_port_is_rejected() {
        let mut config = Config::default();
        config.server.https_port = config.server.http_port;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.error_summary().contains("share a port"));
    }

    #[test]
    fn test_zero_port_is_rejected() {
        let mut config = Config::default();
        config.server.http_port = 0;
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.server.http_port, config.server.http_port);
        assert_eq!(parsed.server.site_root, config.server.site_root);
    }

    #[test]
    fn test_missing_cert_is_warning_not_error() {
        let mut config = Config::default();
        config.server.cert_path = PathBuf::from("/nonexistent/server.cert");
        let result = config.validate();
        assert!(result.is_valid());
        assert!(!result.warnings.is_empty());
    }
}
