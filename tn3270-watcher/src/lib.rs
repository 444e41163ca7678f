//! Observador de pantallas ISPF para sesiones TN3270.
//!
//! Recibe la instantánea de campos de cada pantalla completa enviada por el
//! host, reconoce el panel ISPF que muestra (línea de comandos, lista de
//! datasets, lista de miembros, dataset en edición...) y mantiene por sesión
//! el userid, el prefijo TSO, los datasets vistos y los editados recientemente.

pub mod config;
pub mod dataset;
pub mod error;
pub mod extractor;
pub mod field_manager;
pub mod ispf_constants;
pub mod layouts;
pub mod logging;
pub mod patterns;
pub mod screen_details;
pub mod screen_watcher;
pub mod session;
pub mod snapshot;

pub use config::WatcherConfig;
pub use dataset::{Dataset, DatasetAttributes, DatasetStore};
pub use error::WatcherError;
pub use field_manager::{FieldError, FieldManager, FieldStats, ScreenBuilder};
pub use layouts::{DatasetListLayout, MemberDetail};
pub use logging::init_logging;
pub use screen_details::{DslistLocation, PanelMatch, ScreenDetails};
pub use screen_watcher::{
    DatasetListMatch, MemberListMatch, PrimaryMenuMatch, PromptMatch, ScreenWatcher,
};
pub use session::{RecentDatasets, WatcherSession};
pub use snapshot::ScreenSnapshot;

pub use neo6_screen_lib::{Field, FieldProvider, ScreenDimensions};
