// Estado que persiste entre pantallas de una misma sesión
use crate::dataset::DatasetStore;
use crate::screen_details::ScreenDetails;
use std::collections::VecDeque;
use tracing::debug;

/// Límite por defecto de la lista de datasets recientes
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Datasets editados o visualizados, sin duplicados y en orden de llegada.
/// Al superar el límite se descarta el más antiguo.
#[derive(Debug, Clone)]
pub struct RecentDatasets {
    names: VecDeque<String>,
    limit: usize,
}

impl RecentDatasets {
    pub fn new(limit: usize) -> Self {
        Self {
            names: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Añade un nombre si no estaba ya. Devuelve `true` si se añadió.
    pub fn push(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push_back(name.to_string());
        if self.names.len() > self.limit {
            if let Some(evicted) = self.names.pop_front() {
                debug!("Dataset reciente descartado: {}", evicted);
            }
        }
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

impl Default for RecentDatasets {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}

/// Sesión de observación: una por terminal. Se pasa explícitamente al
/// watcher en cada pantalla.
#[derive(Debug, Default)]
pub struct WatcherSession {
    pub(crate) userid: String,
    pub(crate) prefix: String,
    pub(crate) recent: RecentDatasets,
    pub(crate) datasets: DatasetStore,
    pub(crate) last: ScreenDetails,
}

impl WatcherSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recent_limit(limit: usize) -> Self {
        Self {
            recent: RecentDatasets::new(limit),
            ..Self::default()
        }
    }

    /// Userid descubierto en el menú principal (vacío hasta entonces)
    pub fn userid(&self) -> &str {
        &self.userid
    }

    /// Prefijo TSO descubierto en el menú principal (vacío hasta entonces)
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn recent_datasets(&self) -> &RecentDatasets {
        &self.recent
    }

    pub fn datasets(&self) -> &DatasetStore {
        &self.datasets
    }

    /// Clasificación de la última pantalla observada
    pub fn last_classification(&self) -> &ScreenDetails {
        &self.last
    }
}
