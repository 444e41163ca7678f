// Gestor de campos de la pantalla actual
use neo6_screen_lib::{Field, FieldProvider, ScreenDimensions};
use std::error::Error;
use std::fmt;
use tracing::{debug, trace};

/// Errores relacionados con la gestión de campos
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    FieldOverlap(usize, usize),
    OutOfBounds(usize, usize),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldError::FieldOverlap(field1, field2) => {
                write!(f, "Solapamiento de campos en offsets {} y {}", field1, field2)
            }
            FieldError::OutOfBounds(offset, length) => {
                write!(f, "Campo fuera de la pantalla: offset {} longitud {}", offset, length)
            }
        }
    }
}

impl Error for FieldError {}

/// Instantánea de los campos de una pantalla, ordenada por dirección de
/// buffer. Cada pantalla nueva reemplaza por completo a la anterior.
#[derive(Debug, Clone)]
pub struct FieldManager {
    dimensions: ScreenDimensions,
    fields: Vec<Field>,
}

impl FieldManager {
    pub fn new(dimensions: ScreenDimensions) -> Self {
        debug!("Entering FieldManager::new");
        Self {
            dimensions,
            fields: Vec::new(),
        }
    }

    /// Construye el gestor validando todos los campos
    pub fn from_fields(dimensions: ScreenDimensions, fields: Vec<Field>) -> Result<Self, FieldError> {
        debug!("Entering FieldManager::from_fields");
        let mut manager = Self::new(dimensions);
        for field in fields {
            manager.add_field(field)?;
        }
        Ok(manager)
    }

    /// Añade un campo manteniendo el orden por offset
    pub fn add_field(&mut self, field: Field) -> Result<(), FieldError> {
        if field.first_location() + field.display_length() > self.dimensions.size() {
            return Err(FieldError::OutOfBounds(field.first_location(), field.display_length()));
        }

        // Verificar solapamientos con campos existentes
        for existing in &self.fields {
            if overlaps(&field, existing) {
                return Err(FieldError::FieldOverlap(
                    field.first_location(),
                    existing.first_location(),
                ));
            }
        }

        let position = self
            .fields
            .partition_point(|existing| existing.first_location() <= field.first_location());
        trace!("Campo en offset {} (posición {})", field.first_location(), position);
        self.fields.insert(position, field);
        Ok(())
    }

    /// Sustituye todos los campos por los de una pantalla nueva
    pub fn replace_fields(&mut self, fields: Vec<Field>) -> Result<(), FieldError> {
        debug!("Entering FieldManager::replace_fields");
        let replacement = Self::from_fields(self.dimensions, fields)?;
        self.fields = replacement.fields;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Busca el campo que ocupa una posición específica
    pub fn find_field_at_position(&self, row: usize, col: usize) -> Option<&Field> {
        let location = row * self.dimensions.columns + col;
        self.fields.iter().find(|field| {
            field.display_length() > 0
                && location >= field.first_location()
                && location <= field.last_location()
        })
    }

    /// Obtiene estadísticas de los campos
    pub fn get_field_stats(&self) -> FieldStats {
        let total_fields = self.fields.len();
        let protected_fields = self.fields.iter().filter(|f| f.is_protected()).count();
        let hidden_fields = self.fields.iter().filter(|f| f.is_hidden()).count();

        FieldStats {
            total_fields,
            protected_fields,
            hidden_fields,
            input_fields: total_fields - protected_fields,
        }
    }

    /// Exporta la configuración de campos para depuración
    pub fn debug_export(&self) -> String {
        let columns = self.dimensions.columns;
        let mut output = String::new();
        output.push_str("=== CONFIGURACIÓN DE CAMPOS ===\n");

        for (index, field) in self.fields.iter().enumerate() {
            output.push_str(&format!(
                "Campo: {} | Pos: ({},{}) | Longitud: {} | Texto: '{}' | Protegido: {} | Oculto: {}\n",
                index,
                field.row(columns),
                field.column(columns),
                field.display_length(),
                field.text(),
                field.is_protected(),
                field.is_hidden()
            ));
        }

        output.push_str(&format!("\nEstadísticas: {:?}\n", self.get_field_stats()));
        output
    }
}

fn overlaps(a: &Field, b: &Field) -> bool {
    if a.display_length() == 0 || b.display_length() == 0 {
        return false;
    }
    a.first_location() <= b.last_location() && b.first_location() <= a.last_location()
}

impl FieldProvider for FieldManager {
    fn dimensions(&self) -> ScreenDimensions {
        self.dimensions
    }

    fn all_fields(&self) -> &[Field] {
        &self.fields
    }
}

impl Default for FieldManager {
    fn default() -> Self {
        Self::new(ScreenDimensions::default())
    }
}

/// Estadísticas de campos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStats {
    pub total_fields: usize,
    pub protected_fields: usize,
    pub hidden_fields: usize,
    pub input_fields: usize,
}

/// Construcción de pantallas por fila y columna, para instantáneas y pruebas.
///
/// Las posiciones se dan en la celda del texto; el byte de atributo ocupa la
/// celda anterior.
#[derive(Debug, Default)]
pub struct ScreenBuilder {
    dimensions: ScreenDimensions,
    fields: Vec<Field>,
}

impl ScreenBuilder {
    pub fn new(dimensions: ScreenDimensions) -> Self {
        Self {
            dimensions,
            fields: Vec::new(),
        }
    }

    /// Literal protegido y visible
    pub fn label(self, row: usize, col: usize, text: &str) -> Self {
        let length = text.chars().count();
        self.field(row, col, length, true, false, text)
    }

    /// Campo de entrada vacío
    pub fn input(self, row: usize, col: usize, length: usize) -> Self {
        self.field(row, col, length, false, false, "")
    }

    pub fn field(
        mut self,
        row: usize,
        col: usize,
        length: usize,
        protected: bool,
        hidden: bool,
        text: &str,
    ) -> Self {
        let offset = row * self.dimensions.columns + col;
        self.fields.push(Field::new(offset, length, protected, hidden, text));
        self
    }

    pub fn build(self) -> Result<FieldManager, FieldError> {
        FieldManager::from_fields(self.dimensions, self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_are_kept_in_buffer_order() {
        let manager = ScreenBuilder::new(ScreenDimensions::default())
            .label(3, 1, "Command ===>")
            .label(0, 1, "Menu")
            .input(3, 14, 48)
            .build()
            .unwrap();

        let offsets: Vec<usize> = manager.all_fields().iter().map(|f| f.first_location()).collect();
        assert_eq!(offsets, vec![1, 241, 254]);
    }

    #[test]
    fn test_overlap_is_rejected() {
        let result = ScreenBuilder::new(ScreenDimensions::default())
            .label(1, 1, "Command ===>")
            .input(1, 5, 10)
            .build();
        assert_eq!(result.unwrap_err(), FieldError::FieldOverlap(85, 81));
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut manager = FieldManager::new(ScreenDimensions::new(24, 80));
        let result = manager.add_field(Field::new(1900, 40, true, false, ""));
        assert_eq!(result.unwrap_err(), FieldError::OutOfBounds(1900, 40));
    }

    #[test]
    fn test_find_field_at_position() {
        let manager = ScreenBuilder::new(ScreenDimensions::default())
            .label(1, 1, "Command ===>")
            .input(1, 14, 66)
            .build()
            .unwrap();

        assert_eq!(manager.find_field_at_position(1, 5).unwrap().text(), "Command ===>");
        assert!(manager.find_field_at_position(1, 20).unwrap().is_unprotected());
        assert!(manager.find_field_at_position(1, 13).is_none());
    }

    #[test]
    fn test_field_stats_and_export() {
        let manager = ScreenBuilder::new(ScreenDimensions::default())
            .label(0, 1, "Menu")
            .input(1, 14, 66)
            .field(2, 14, 8, false, true, "SECRET")
            .build()
            .unwrap();

        let stats = manager.get_field_stats();
        assert_eq!(stats.total_fields, 3);
        assert_eq!(stats.protected_fields, 1);
        assert_eq!(stats.hidden_fields, 1);
        assert_eq!(stats.input_fields, 2);

        let export = manager.debug_export();
        assert!(export.starts_with("=== CONFIGURACIÓN DE CAMPOS ==="));
        assert!(export.contains("Pos: (0,1)"));
    }

    #[test]
    fn test_replace_fields() {
        let mut manager = ScreenBuilder::new(ScreenDimensions::default())
            .label(0, 1, "Menu")
            .build()
            .unwrap();
        manager
            .replace_fields(vec![Field::label(81, "EDIT"), Field::label(161, "Help")])
            .unwrap();
        assert_eq!(manager.len(), 2);
        assert!(manager.find_field_at_position(0, 1).is_none());
    }
}
