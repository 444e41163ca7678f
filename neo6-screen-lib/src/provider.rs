//! Superficie de consulta sobre la instantánea de campos de una pantalla.

use crate::field::{Field, ScreenDimensions};

/// Proveedor de campos de la pantalla actual.
///
/// Sólo `dimensions` y `all_fields` son obligatorios; el resto de consultas
/// se derivan de ellos. Los campos deben estar ordenados por dirección de
/// buffer.
pub trait FieldProvider {
    fn dimensions(&self) -> ScreenDimensions;

    fn all_fields(&self) -> &[Field];

    /// Campos cuya primera celda cae en las filas `[row, row + rows)`.
    /// Los campos de longitud cero no cuentan.
    fn fields_on_row(&self, row: usize, rows: usize) -> Vec<&Field> {
        let columns = self.dimensions().columns;
        let first_location = row * columns;
        let last_location = (row + rows) * columns;

        self.all_fields()
            .iter()
            .skip_while(|field| field.first_location() < first_location)
            .take_while(|field| field.first_location() < last_location)
            .filter(|field| field.display_length() > 0)
            .collect()
    }

    /// Compara el texto completo del campo `index` con `literal` y,
    /// opcionalmente, su posición con `offset`.
    fn field_text_equals(&self, index: usize, literal: &str, offset: Option<usize>) -> bool {
        match self.all_fields().get(index) {
            Some(field) => {
                field.text() == literal && offset.map_or(true, |o| field.first_location() == o)
            }
            None => false,
        }
    }

    fn field_text_trim_equals(&self, field: &Field, literal: &str) -> bool {
        field.text_trim_equals(literal)
    }

    /// Opciones de la barra de acciones (fila 0)
    fn menu_labels(&self) -> Vec<String> {
        self.fields_on_row(0, 1)
            .into_iter()
            .filter(|field| field.is_protected() && field.is_visible() && field.display_length() > 1)
            .map(|field| field.trimmed_text().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }
}
