// Configuración del watcher
use crate::error::WatcherError;
use crate::session::DEFAULT_RECENT_LIMIT;
use config::{Config, Environment, File};
use neo6_screen_lib::ScreenDimensions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Parámetros del watcher. Se leen de `config/default.toml` y se pueden
/// sobrescribir con variables `TN3270_WATCHER_*`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WatcherConfig {
    pub log_level: String,
    /// Dimensiones por defecto de las instantáneas que no las declaran
    pub rows: usize,
    pub columns: usize,
    /// Tamaño máximo de la lista de datasets recientes
    pub recent_limit: usize,
    /// Directorio de instantáneas de pantalla
    pub screens_dir: String,
}

impl WatcherConfig {
    pub fn load(path: &str) -> Result<Self, WatcherError> {
        let settings = Config::builder()
            .set_default("log_level", "info")?
            .set_default("rows", 24_i64)?
            .set_default("columns", 80_i64)?
            .set_default("recent_limit", DEFAULT_RECENT_LIMIT as i64)?
            .set_default("screens_dir", "config/screens")?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("TN3270_WATCHER"))
            .build()?;
        let config: WatcherConfig = settings.try_deserialize()?;
        Ok(config)
    }

    /// Configuración por defecto; si el fichero no se puede leer se usan los
    /// valores internos
    pub fn from_default() -> Self {
        match Self::load(DEFAULT_CONFIG_PATH) {
            Ok(config) => config,
            Err(err) => {
                warn!("No se pudo cargar {}: {}", DEFAULT_CONFIG_PATH, err);
                Self::default()
            }
        }
    }

    pub fn dimensions(&self) -> ScreenDimensions {
        ScreenDimensions::new(self.rows, self.columns)
    }

    /// Ruta de una instantánea. Un nombre sin directorio ni extensión se
    /// busca en `screens_dir` como `<nombre>.yaml`.
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        let bare = path
            .parent()
            .map_or(true, |parent| parent.as_os_str().is_empty())
            && path.extension().is_none();
        if bare {
            Path::new(&self.screens_dir).join(format!("{}.yaml", name))
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            rows: 24,
            columns: 80,
            recent_limit: DEFAULT_RECENT_LIMIT,
            screens_dir: "config/screens".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = WatcherConfig::load("config/does-not-exist").unwrap();
        assert_eq!(config.rows, 24);
        assert_eq!(config.columns, 80);
        assert_eq!(config.recent_limit, DEFAULT_RECENT_LIMIT);
        assert_eq!(config.dimensions(), ScreenDimensions::default());
    }

    #[test]
    fn test_load_default_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default");
        let config = WatcherConfig::load(path).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.recent_limit, 20);
        assert_eq!(config.screens_dir, "config/screens");
    }

    #[test]
    fn test_bare_snapshot_names_use_screens_dir() {
        let config = WatcherConfig::default();
        assert_eq!(
            config.snapshot_path("primary_menu"),
            PathBuf::from("config/screens/primary_menu.yaml")
        );
        assert_eq!(config.snapshot_path("capture.yaml"), PathBuf::from("capture.yaml"));
        assert_eq!(
            config.snapshot_path("/tmp/screens/edit"),
            PathBuf::from("/tmp/screens/edit")
        );
        assert_eq!(config.snapshot_path("./edit"), PathBuf::from("./edit"));
    }
}
