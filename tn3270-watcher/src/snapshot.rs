// Instantáneas de pantalla en YAML
//
// Cada fichero describe una pantalla capturada: dimensiones opcionales y una
// lista de campos por fila y columna. Se usan como fixtures de prueba y como
// entrada de la herramienta `screen_check`.
use crate::error::WatcherError;
use crate::field_manager::FieldManager;
use neo6_screen_lib::{Field, ScreenDimensions};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotField {
    pub row: usize,
    pub col: usize,
    /// Por defecto, la longitud del texto
    #[serde(default)]
    pub length: Option<usize>,
    #[serde(default = "default_protected")]
    pub protected: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub text: String,
}

fn default_protected() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreenSnapshot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub columns: Option<usize>,
    pub fields: Vec<SnapshotField>,
}

impl ScreenSnapshot {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WatcherError> {
        let path = path.as_ref();
        debug!("Cargando instantánea {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, WatcherError> {
        let snapshot: ScreenSnapshot = serde_yaml::from_str(content)?;
        Ok(snapshot)
    }

    /// Dimensiones de la instantánea, o las indicadas si no las declara
    pub fn dimensions(&self, fallback: ScreenDimensions) -> ScreenDimensions {
        ScreenDimensions::new(
            self.rows.unwrap_or(fallback.rows),
            self.columns.unwrap_or(fallback.columns),
        )
    }

    pub fn into_field_manager(self, fallback: ScreenDimensions) -> Result<FieldManager, WatcherError> {
        let dimensions = self.dimensions(fallback);
        let mut fields = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            if field.row >= dimensions.rows || field.col >= dimensions.columns {
                return Err(WatcherError::Snapshot(format!(
                    "campo fuera de la pantalla en ({},{})",
                    field.row, field.col
                )));
            }
            let length = field.length.unwrap_or_else(|| field.text.chars().count());
            let offset = field.row * dimensions.columns + field.col;
            fields.push(Field::new(offset, length, field.protected, field.hidden, &field.text));
        }

        FieldManager::from_fields(dimensions, fields)
            .map_err(|err| WatcherError::Snapshot(err.to_string()))
    }
}
