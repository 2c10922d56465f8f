//! Configuration for Gameday.
//!
//! Raw TOML lives in [`GamedayConfig`], where every table and field is
//! optional. [`GamedayConfig::resolve`] applies environment overrides and
//! defaults and produces a [`Settings`] with no optional fields left except
//! the local template path.
//!
//! ```toml
//! [server]
//! base_url = "http://localhost:4000"
//! timeout_secs = 10
//!
//! [auth]
//! password = "..."
//!
//! [store]
//! path = "/home/me/.gameday/store.json"
//!
//! [checklist]
//! template_path = "checklists.json"
//! roster = ["Sinclaire Hoyt", "Tech 1"]
//!
//! [app]
//! role = "MANAGER"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use gameday_types::{Role, TechRoster};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000";
pub const DEFAULT_PASSWORD: &str = "rockets-temp-password";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_URL: &str = "GAMEDAY_API_URL";
pub const ENV_PASSWORD: &str = "GAMEDAY_APP_PASSWORD";
pub const ENV_STORE_PATH: &str = "GAMEDAY_STORE_PATH";
pub const ENV_ROLE: &str = "GAMEDAY_ROLE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GamedayConfig {
    pub server: Option<ServerConfig>,
    pub auth: Option<AuthConfig>,
    pub store: Option<StoreConfig>,
    pub checklist: Option<ChecklistConfig>,
    pub app: Option<AppConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServerConfig {
    /// Base URL serving `/checklists` and `/current-game`.
    pub base_url: Option<String>,
    /// Whole-request timeout for each fetch.
    pub timeout_secs: Option<u64>,
}

#[derive(Default, Deserialize)]
pub struct AuthConfig {
    pub password: Option<String>,
}

// Manual Debug impl to keep the shared secret out of logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "password",
                &if self.password.is_some() {
                    "[REDACTED]"
                } else {
                    "None"
                },
            )
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChecklistConfig {
    /// Read the checklist template from this JSON file instead of the server.
    pub template_path: Option<PathBuf>,
    /// Technicians offered for assignment. The `(unassigned)` option is implicit.
    pub roster: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Default viewer role: ADMIN, MANAGER or TECH.
    pub role: Option<String>,
}

/// Fully resolved configuration.
#[derive(Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub timeout: Duration,
    pub password: String,
    pub store_path: PathBuf,
    pub template_path: Option<PathBuf>,
    pub roster: TechRoster,
    pub role: Role,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .field("password", &"[REDACTED]")
            .field("store_path", &self.store_path)
            .field("template_path", &self.template_path)
            .field("roster", &self.roster)
            .field("role", &self.role)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        GamedayConfig::default().resolve_with(|_| None)
    }
}

impl GamedayConfig {
    /// Load `~/.gameday/config.toml`. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    /// Like [`GamedayConfig::load`], but an unreadable or invalid file yields
    /// the defaults. The failure is logged once by `load_from`.
    #[must_use]
    pub fn load_or_default() -> Self {
        match config_path() {
            Some(path) => Self::load_or_default_from(&path),
            None => Self::default(),
        }
    }

    #[must_use]
    pub fn load_or_default_from(path: &Path) -> Self {
        Self::load_from(path).ok().flatten().unwrap_or_default()
    }

    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Resolve against the process environment.
    #[must_use]
    pub fn resolve(self) -> Settings {
        self.resolve_with(|name| env::var(name).ok())
    }

    /// Resolve with an explicit environment lookup. Environment values win over
    /// the file; blank values are ignored.
    #[must_use]
    pub fn resolve_with(self, env_lookup: impl Fn(&str) -> Option<String>) -> Settings {
        let lookup = |name: &str| env_lookup(name).filter(|value| !value.trim().is_empty());

        let server = self.server.unwrap_or_default();
        let checklist = self.checklist.unwrap_or_default();

        let api_base_url = lookup(ENV_API_URL)
            .or(server.base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        let timeout = Duration::from_secs(
            server
                .timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        );

        let password = lookup(ENV_PASSWORD)
            .or(self.auth.and_then(|auth| auth.password))
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

        let store_path = lookup(ENV_STORE_PATH)
            .map(PathBuf::from)
            .or(self.store.and_then(|store| store.path))
            .unwrap_or_else(default_store_path);

        let roster = checklist
            .roster
            .map(TechRoster::new)
            .unwrap_or_default();

        let role_raw = lookup(ENV_ROLE).or(self.app.and_then(|app| app.role));
        let role = match role_raw {
            Some(raw) => Role::parse(&raw).unwrap_or_else(|e| {
                tracing::warn!("Unknown role in config: {e}");
                Role::default()
            }),
            None => Role::default(),
        };

        Settings {
            api_base_url,
            timeout,
            password,
            store_path,
            template_path: checklist.template_path,
            roster,
            role,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".gameday").join("config.toml"))
}

/// `~/.gameday/store.json`, or `./.gameday/store.json` without a home directory.
pub fn default_store_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".gameday"))
        .unwrap_or_else(|| PathBuf::from(".gameday"))
        .join("store.json")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use gameday_types::UNASSIGNED;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn parse(toml_src: &str) -> GamedayConfig {
        toml::from_str(toml_src).expect("valid toml")
    }

    #[test]
    fn empty_config_resolves_to_defaults() {
        let settings = GamedayConfig::default().resolve_with(no_env);
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(settings.password, DEFAULT_PASSWORD);
        assert_eq!(settings.role, Role::Manager);
        assert_eq!(settings.roster, TechRoster::default());
        assert!(settings.template_path.is_none());
        assert!(settings.store_path.ends_with("store.json"));
    }

    #[test]
    fn file_values_are_used() {
        let config = parse(
            r#"
            [server]
            base_url = "https://checklists.example.com/"
            timeout_secs = 3

            [auth]
            password = "hunter2"

            [store]
            path = "/tmp/gameday-store.json"

            [checklist]
            template_path = "checklists.json"
            roster = ["Tech A", "Tech B"]

            [app]
            role = "tech"
            "#,
        );

        let settings = config.resolve_with(no_env);
        assert_eq!(settings.api_base_url, "https://checklists.example.com");
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.password, "hunter2");
        assert_eq!(settings.store_path, PathBuf::from("/tmp/gameday-store.json"));
        assert_eq!(
            settings.template_path,
            Some(PathBuf::from("checklists.json"))
        );
        assert_eq!(settings.roster.options(), &[UNASSIGNED, "Tech A", "Tech B"]);
        assert_eq!(settings.role, Role::Tech);
    }

    #[test]
    fn environment_overrides_file() {
        let config = parse(
            r#"
            [server]
            base_url = "http://file"
            [auth]
            password = "from-file"
            [app]
            role = "TECH"
            "#,
        );
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "http://env:4000"),
            (ENV_PASSWORD, "from-env"),
            (ENV_STORE_PATH, "/tmp/env-store.json"),
            (ENV_ROLE, "admin"),
        ]
        .into_iter()
        .collect();

        let settings = config.resolve_with(|name| env.get(name).map(ToString::to_string));
        assert_eq!(settings.api_base_url, "http://env:4000");
        assert_eq!(settings.password, "from-env");
        assert_eq!(settings.store_path, PathBuf::from("/tmp/env-store.json"));
        assert_eq!(settings.role, Role::Admin);
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let config = parse("[auth]\npassword = \"from-file\"\n");
        let settings = config.resolve_with(|name| {
            (name == ENV_PASSWORD).then(|| "   ".to_string())
        });
        assert_eq!(settings.password, "from-file");
    }

    #[test]
    fn unknown_role_falls_back_to_default() {
        let settings = parse("[app]\nrole = \"owner\"\n").resolve_with(no_env);
        assert_eq!(settings.role, Role::Manager);
    }

    #[test]
    fn zero_timeout_uses_default() {
        let settings = parse("[server]\ntimeout_secs = 0\n").resolve_with(no_env);
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn load_from_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = GamedayConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nbase_url = ").unwrap();

        let config = GamedayConfig::load_or_default_from(&path);
        let settings = config.resolve_with(|_| None);
        assert_eq!(settings.api_base_url, Settings::default().api_base_url);
        assert_eq!(settings.role, Settings::default().role);
    }

    #[test]
    fn load_or_default_keeps_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nbase_url = \"http://gameday.local\"\n").unwrap();

        let settings = GamedayConfig::load_or_default_from(&path).resolve_with(|_| None);
        assert_eq!(settings.api_base_url, "http://gameday.local");
    }

    #[test]
    fn load_from_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nbase_url = ").unwrap();

        let err = GamedayConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), &path);
    }

    #[test]
    fn settings_debug_redacts_password() {
        let settings = GamedayConfig::default().resolve_with(no_env);
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains(DEFAULT_PASSWORD));
        assert!(rendered.contains("[REDACTED]"));
    }
}
