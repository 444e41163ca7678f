//! Modelo de campos compartido por los consumidores de pantallas 3270.
//!
//! El motor de protocolo decodifica el stream y construye los campos; este
//! crate sólo define la instantánea de campos y la superficie de consulta que
//! necesitan los clasificadores de pantallas.

pub mod field;
pub mod provider;

pub use field::{Field, ScreenDimensions};
pub use provider::FieldProvider;
