use crate::catalog::{default_rooms, Catalog, CatalogError, RoomConfig};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

const DEFAULT_TICK_RATE_MS: u64 = 250;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid room catalog")]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How long the TUI waits for input before redrawing.
    pub tick_rate_ms: u64,
    /// Directory for `choreboard.log`. No file logging when unset.
    pub log_dir: Option<PathBuf>,
    /// Replaces the built-in household when present.
    pub rooms: Option<Vec<RoomConfig>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            log_dir: None,
            rooms: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        let rooms = self.rooms.clone().unwrap_or_else(default_rooms);
        Ok(Catalog::new(rooms)?)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_path_uses_defaults() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tick_rate(), Duration::from_millis(250));
        assert_eq!(config.catalog().unwrap(), Catalog::default());
    }

    #[test]
    fn custom_rooms_replace_default_catalog() {
        let file = write_config(
            r#"
tick_rate_ms = 100
log_dir = "/tmp/choreboard"

[[rooms]]
name = "garage"
tasks = ["Sweep", "Recycle"]

[[rooms]]
name = "porch"
"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/choreboard")));

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.rooms().len(), 2);
        assert_eq!(catalog.tasks("garage"), ["Sweep", "Recycle"]);
        assert!(catalog.tasks("porch").is_empty());
    }

    #[test]
    fn example_config_parses() {
        let config: Config = toml::from_str(include_str!("../choreboard.example.toml")).unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.rooms().len(), 2);
        assert_eq!(catalog.total_tasks(), 7);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn invalid_catalog_is_a_config_error() {
        let file = write_config(
            r#"
[[rooms]]
name = "hall"
tasks = ["Mop", "Mop"]
"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert!(matches!(
            config.catalog(),
            Err(ConfigError::Catalog(CatalogError::DuplicateTask { .. }))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("tick_rate = 5\n");
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn unreadable_path_reports_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
