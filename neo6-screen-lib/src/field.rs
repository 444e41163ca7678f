// Campo de pantalla 3270 tal como lo entrega el gestor de campos
use serde::{Deserialize, Serialize};

/// Dimensiones de la pantalla de la sesión actual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenDimensions {
    pub rows: usize,
    pub columns: usize,
}

impl ScreenDimensions {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Número total de celdas del buffer
    pub fn size(&self) -> usize {
        self.rows * self.columns
    }
}

impl Default for ScreenDimensions {
    fn default() -> Self {
        // Modelo 2: 24x80
        Self { rows: 24, columns: 80 }
    }
}

/// Representación serializada de un campo (texto sin normalizar)
#[derive(Debug, Deserialize)]
struct FieldRecord {
    offset: usize,
    length: usize,
    #[serde(default = "default_protected")]
    protected: bool,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    text: String,
}

fn default_protected() -> bool {
    true
}

impl From<FieldRecord> for Field {
    fn from(record: FieldRecord) -> Self {
        Field::new(record.offset, record.length, record.protected, record.hidden, &record.text)
    }
}

/// Instantánea inmutable de un campo de la pantalla.
///
/// `offset` es la dirección de buffer de la primera celda de datos (la celda
/// siguiente al byte de atributo). El texto siempre tiene exactamente
/// `length` caracteres: se rellena con blancos o se trunca al construirlo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FieldRecord")]
pub struct Field {
    pub offset: usize,
    pub length: usize,
    pub protected: bool,
    pub hidden: bool,
    text: String,
}

impl Field {
    pub fn new(offset: usize, length: usize, protected: bool, hidden: bool, text: &str) -> Self {
        let mut text: String = text.chars().take(length).collect();
        let missing = length - text.chars().count();
        text.extend(std::iter::repeat(' ').take(missing));

        Self {
            offset,
            length,
            protected,
            hidden,
            text,
        }
    }

    /// Campo protegido y visible, el caso habitual para literales de panel
    pub fn label(offset: usize, text: &str) -> Self {
        Self::new(offset, text.chars().count(), true, false, text)
    }

    /// Texto completo del campo, con el relleno incluido
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    pub fn text_trim_equals(&self, literal: &str) -> bool {
        self.text.trim() == literal
    }

    pub fn first_location(&self) -> usize {
        self.offset
    }

    /// Última celda ocupada por el campo (igual a la primera si está vacío)
    pub fn last_location(&self) -> usize {
        self.offset + self.length.saturating_sub(1)
    }

    pub fn display_length(&self) -> usize {
        self.length
    }

    pub fn is_protected(&self) -> bool {
        self.protected
    }

    pub fn is_unprotected(&self) -> bool {
        !self.protected
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    pub fn row(&self, columns: usize) -> usize {
        self.offset / columns
    }

    pub fn column(&self, columns: usize) -> usize {
        self.offset % columns
    }
}
