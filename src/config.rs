//! Application configuration
//!
//! Loaded from a TOML file (`~/.config/siaran-report/config.toml` by
//! default). Every section falls back to defaults, and a handful of
//! environment variables override file values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("siaran-report")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub auth: AuthConfig,
    pub admin: AdminConfig,
    pub export: ExportConfig,
    pub reports: ReportsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./siaran.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        self.url.clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    /// Lifetime of an access token
    pub access_token_minutes: i64,
    /// Lifetime of a session (refresh token)
    pub session_days: i64,
    pub cookie_name: String,
    /// Mark the session cookie `Secure` (HTTPS only)
    pub cookie_secure: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            access_token_minutes: 60,
            session_days: 7,
            cookie_name: "siaran_session".to_string(),
            cookie_secure: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Where clients are sent when the session is missing or invalid
    pub login_redirect_url: String,
    pub allow_public_signup: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_redirect_url: "/auth/login".to_string(),
            allow_public_signup: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            name: "Administrator".to_string(),
            username: "admin".to_string(),
            email: "admin@tvri.local".to_string(),
            password: "admin123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Kepala (approving authority) printed on the signature block
    pub supervisor_name: String,
    pub supervisor_nip: String,
    pub station_name: String,
    pub filename_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            supervisor_name: "Dr. John Doe, M.Si.".to_string(),
            supervisor_nip: "19651231 199203 1 001".to_string(),
            station_name: "TVRI".to_string(),
            filename_prefix: "laporan-td-penyiaran".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    /// Staff that can be assigned to a shift. Empty disables the check.
    pub staff_roster: Vec<String>,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            staff_roster: ["Bagus", "Alan", "Hafiz", "Dedi", "Sari", "Budi"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&raw)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Override selected values from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = non_empty("JWT_SECRET") {
            self.security.jwt_secret = secret;
        }
        if let Some(name) = non_empty("KEPALA_NAME") {
            self.export.supervisor_name = name;
        }
        if let Some(nip) = non_empty("KEPALA_NIP") {
            self.export.supervisor_nip = nip;
        }
        if let Some(url) = non_empty("LOGIN_REDIRECT_URL") {
            self.auth.login_redirect_url = url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.api_port, 8080);
        assert_eq!(cfg.security.cookie_name, "siaran_session");
        assert_eq!(cfg.export.filename_prefix, "laporan-td-penyiaran");
        assert_eq!(cfg.reports.staff_roster.len(), 6);
        assert!(!cfg.auth.allow_public_signup);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            api_port = 9090

            [export]
            supervisor_name = "Ir. Siti Aminah"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.api_port, 9090);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert_eq!(cfg.export.supervisor_name, "Ir. Siti Aminah");
        assert_eq!(cfg.export.station_name, "TVRI");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = AppConfig::from_toml("[server\napi_port = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = [
            ("KEPALA_NAME", "Drs. Budi Santoso"),
            ("KEPALA_NIP", "19700101 199001 1 002"),
            ("JWT_SECRET", "s3cret"),
            ("LOGIN_REDIRECT_URL", "  "),
        ]
        .into_iter()
        .collect();

        let mut cfg = AppConfig::default();
        cfg.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.export.supervisor_name, "Drs. Budi Santoso");
        assert_eq!(cfg.export.supervisor_nip, "19700101 199001 1 002");
        assert_eq!(cfg.security.jwt_secret, "s3cret");
        // blank values are ignored
        assert_eq!(cfg.auth.login_redirect_url, "/auth/login");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AppConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
