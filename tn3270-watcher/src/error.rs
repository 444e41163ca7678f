// Errores del watcher de pantallas
use std::error::Error;
use std::fmt;

/// Errores que el watcher propaga al llamador.
///
/// La clasificación de una pantalla nunca falla: las pantallas desconocidas o
/// mal formadas se resuelven como "no reconocida". Sólo la conversión de tipos
/// de pantalla y la carga de configuración o instantáneas devuelven error.
#[derive(Debug)]
pub enum WatcherError {
    UnsupportedScreenType(u8),
    Config(String),
    Snapshot(String),
    Io(std::io::Error),
}

impl fmt::Display for WatcherError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WatcherError::UnsupportedScreenType(screen_type) => {
                write!(f, "Tipo de pantalla no soportado: {}", screen_type)
            }
            WatcherError::Config(msg) => write!(f, "Error de configuración: {}", msg),
            WatcherError::Snapshot(msg) => write!(f, "Instantánea de pantalla inválida: {}", msg),
            WatcherError::Io(err) => write!(f, "Error de E/S: {}", err),
        }
    }
}

impl Error for WatcherError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WatcherError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WatcherError {
    fn from(err: std::io::Error) -> Self {
        WatcherError::Io(err)
    }
}

impl From<config::ConfigError> for WatcherError {
    fn from(err: config::ConfigError) -> Self {
        WatcherError::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for WatcherError {
    fn from(err: serde_yaml::Error) -> Self {
        WatcherError::Snapshot(err.to_string())
    }
}
