//! Extracción de atributos a partir de los campos de detalle.
//!
//! Los campos de detalle de DSLIST y de las listas de miembros son columnas
//! de ancho fijo. Cada trozo se corta por posición de carácter; un trozo vacío
//! o que queda fuera del texto no informa el atributo.

use crate::dataset::DatasetAttributes;
use crate::layouts::{DatasetListLayout, DetailKind, MemberDetail, TabSet};
use crate::patterns::is_dataset_name;
use neo6_screen_lib::Field;
use tracing::{debug, warn};

fn byte_offset(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map_or(text.len(), |(index, _)| index)
}

/// Columnas `[from, to)` del texto; sin `to` llega hasta el final
pub fn slice_columns(text: &str, from: usize, to: Option<usize>) -> &str {
    let start = byte_offset(text, from);
    let end = to.map_or(text.len(), |to| byte_offset(text, to));
    if start >= end { "" } else { &text[start..end] }
}

/// Valor textual recortado, ausente si queda vacío
fn text_value(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Entero de una columna. `?` y el blanco valen 0 (valor desconocido en
/// ISPF); cualquier otro texto no numérico se registra y también vale 0.
pub fn parse_integer(name: &str, value: &str) -> u32 {
    let value = value.trim();
    if value.is_empty() || value == "?" {
        debug!("Valor desconocido para {}: '{}'", name, value);
        return 0;
    }
    match value.parse::<u32>() {
        Ok(number) => number,
        Err(_) => {
            warn!("Valor numérico inválido para {}: '{}'", name, value);
            0
        }
    }
}

fn space(attributes: &mut DatasetAttributes, details: &str, tabs: [usize; 3]) {
    if details.trim().is_empty() {
        return;
    }
    let [t1, t2, t3] = tabs;
    let length = details.chars().count();

    if length >= t1 {
        attributes.tracks = Some(parse_integer("tracks", slice_columns(details, 0, Some(t1))));
    }
    if length >= t2 {
        attributes.percent_used = Some(parse_integer("%used", slice_columns(details, t1, Some(t2))));
    }
    if length >= t3 {
        attributes.extents = Some(parse_integer("extents", slice_columns(details, t2, Some(t3))));
    }
    if length > t3 {
        attributes.device = text_value(slice_columns(details, t3, None));
    }
}

fn disposition(attributes: &mut DatasetAttributes, details: &str, tabs: [usize; 3]) {
    if details.trim().is_empty() {
        return;
    }
    let [t1, t2, t3] = tabs;
    let length = details.chars().count();

    if length >= t1 {
        attributes.dsorg = text_value(slice_columns(details, 0, Some(t1)));
    }
    if length >= t2 {
        attributes.recfm = text_value(slice_columns(details, t1, Some(t2)));
    }
    if length >= t3 {
        attributes.lrecl = Some(parse_integer("lrecl", slice_columns(details, t2, Some(t3))));
    }
    if length > t3 {
        attributes.blksize = Some(parse_integer("blksize", slice_columns(details, t3, None)));
    }
}

fn dates(attributes: &mut DatasetAttributes, details: &str) {
    attributes.created = text_value(slice_columns(details, 0, Some(11)));
    attributes.expires = text_value(slice_columns(details, 11, Some(22)));
    attributes.referenced = text_value(slice_columns(details, 22, None));
}

fn catalog(attributes: &mut DatasetAttributes, details: &str) {
    let name = details.trim();
    if is_dataset_name(name) {
        attributes.catalog = Some(name.to_string());
    } else if !name.is_empty() {
        debug!("Catálogo ignorado, nombre inválido: '{}'", name);
    }
}

/// Atributos de una entrada de DSLIST según su vista
pub fn extract(layout: DatasetListLayout, row_fields: &[&Field]) -> DatasetAttributes {
    let mut attributes = DatasetAttributes::default();

    for rule in layout.descriptor().rules_for(row_fields.len()) {
        let details = row_fields[rule.field].text();
        match rule.kind {
            DetailKind::Space(tabs) => space(&mut attributes, details, tabs),
            DetailKind::Disposition(tabs) => disposition(&mut attributes, details, tabs),
            DetailKind::Volume => attributes.volume = text_value(details),
            DetailKind::Dates => dates(&mut attributes, details),
            DetailKind::Catalog => catalog(&mut attributes, details),
        }
    }

    attributes
}

/// Atributos de un miembro a partir de su campo de detalle
pub fn extract_member(detail: MemberDetail, tabs: &TabSet, details: &str) -> DatasetAttributes {
    let mut attributes = DatasetAttributes::default();
    if details.trim().is_empty() {
        return attributes;
    }

    match detail {
        MemberDetail::Statistics => {
            let [t0, t1, t2, t3] = tabs.statistics;
            let size = slice_columns(details, 0, Some(t0));
            if !size.trim().is_empty() {
                attributes.lines = Some(parse_integer("size", size));
            }
            attributes.created = text_value(slice_columns(details, t0, Some(t1)));
            attributes.referenced = text_value(slice_columns(details, t1, Some(t2)));
            attributes.user_id = text_value(slice_columns(details, t3, None));
        }
        MemberDetail::Ids => {
            let [t0, _, _, t3] = tabs.ids;
            let size = slice_columns(details, 0, Some(t0));
            if !size.trim().is_empty() {
                attributes.lines = Some(parse_integer("size", size));
            }
            attributes.user_id = text_value(slice_columns(details, t3, None));
        }
    }

    attributes
}
