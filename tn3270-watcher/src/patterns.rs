// Patrones de nombres de datasets y miembros z/OS
use regex::Regex;
use std::sync::LazyLock;

/// Un cualificador: 1-8 caracteres, el primero alfabético o nacional (@#$)
const SEGMENT: &str = r"[A-Z@#$][-A-Z0-9@#$]{0,7}";

static DATASET_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{SEGMENT}(\.{SEGMENT}){{0,21}}$")).unwrap());

static MEMBER_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{SEGMENT}$")).unwrap());

/// Nombre de dataset completo: de 1 a 22 cualificadores separados por puntos
pub fn is_dataset_name(name: &str) -> bool {
    DATASET_NAME_PATTERN.is_match(name)
}

/// Nombre de miembro de un PDS: un único cualificador
pub fn is_member_name(name: &str) -> bool {
    MEMBER_NAME_PATTERN.is_match(name)
}

/// Separa `PDS(MEMBER)` en sus dos partes. Sin sufijo entre paréntesis
/// devuelve el nombre completo y ningún miembro.
pub fn split_member(name: &str) -> (&str, Option<&str>) {
    match name.find('(') {
        Some(pos) if pos > 0 && name.ends_with(')') => {
            (&name[..pos], Some(&name[pos + 1..name.len() - 1]))
        }
        _ => (name, None),
    }
}

/// Nombre completo de un miembro: `PDS(MEMBER)`
pub fn member_key(pds_name: &str, member_name: &str) -> String {
    format!("{}({})", pds_name, member_name.trim())
}
