// Modelo de datasets y miembros vistos en las pantallas ISPF
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Interpreta una fecha tal como aparece en pantalla: `2020/01/31` en DSLIST,
/// `20/01/31` en las estadísticas de miembros y `2020.031` (juliana).
pub fn parse_ispf_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let format = match text.find(['/', '.']) {
        Some(4) if text[4..].starts_with('/') => "%Y/%m/%d",
        Some(4) => "%Y.%j",
        Some(2) => "%y/%m/%d",
        _ => return None,
    };
    NaiveDate::parse_from_str(text, format).ok()
}

/// Observación parcial de un dataset: sólo los atributos presentes en la
/// pantalla vienen informados.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_used: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extents: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dsorg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recfm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lrecl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blksize: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    /// Tamaño de un miembro en líneas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
    /// Usuario del último cambio de un miembro
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl DatasetAttributes {
    pub fn is_empty(&self) -> bool {
        *self == DatasetAttributes::default()
    }
}

/// Dataset o miembro (`PDS(MEMBER)`) identificado por su nombre completo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    name: String,
    #[serde(flatten)]
    attributes: DatasetAttributes,
}

impl Dataset {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: DatasetAttributes::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &DatasetAttributes {
        &self.attributes
    }

    /// Nombre del PDS y del miembro si el registro es un miembro
    pub fn member_name(&self) -> Option<&str> {
        crate::patterns::split_member(&self.name).1
    }

    /// Aplica una observación parcial: los atributos ausentes no se tocan
    pub fn apply(&mut self, observed: &DatasetAttributes) {
        trace!("Aplicando atributos a {}: {:?}", self.name, observed);
        let current = &mut self.attributes;

        fn merge<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if let Some(value) = value {
                *target = Some(value.clone());
            }
        }

        merge(&mut current.volume, &observed.volume);
        merge(&mut current.tracks, &observed.tracks);
        merge(&mut current.percent_used, &observed.percent_used);
        merge(&mut current.extents, &observed.extents);
        merge(&mut current.device, &observed.device);
        merge(&mut current.dsorg, &observed.dsorg);
        merge(&mut current.recfm, &observed.recfm);
        merge(&mut current.lrecl, &observed.lrecl);
        merge(&mut current.blksize, &observed.blksize);
        merge(&mut current.created, &observed.created);
        merge(&mut current.expires, &observed.expires);
        merge(&mut current.referenced, &observed.referenced);
        merge(&mut current.catalog, &observed.catalog);
        merge(&mut current.lines, &observed.lines);
        merge(&mut current.user_id, &observed.user_id);
    }

    pub fn set_volume(&mut self, volume: &str) {
        self.attributes.volume = Some(volume.to_string());
    }

    pub fn set_tracks(&mut self, tracks: u32) {
        self.attributes.tracks = Some(tracks);
    }

    pub fn set_percent_used(&mut self, percent: u32) {
        self.attributes.percent_used = Some(percent);
    }

    pub fn set_extents(&mut self, extents: u32) {
        self.attributes.extents = Some(extents);
    }

    pub fn set_device(&mut self, device: &str) {
        self.attributes.device = Some(device.to_string());
    }

    pub fn set_dsorg(&mut self, dsorg: &str) {
        self.attributes.dsorg = Some(dsorg.to_string());
    }

    pub fn set_recfm(&mut self, recfm: &str) {
        self.attributes.recfm = Some(recfm.to_string());
    }

    pub fn set_lrecl(&mut self, lrecl: u32) {
        self.attributes.lrecl = Some(lrecl);
    }

    pub fn set_blksize(&mut self, blksize: u32) {
        self.attributes.blksize = Some(blksize);
    }

    pub fn set_created(&mut self, created: &str) {
        self.attributes.created = Some(created.to_string());
    }

    pub fn set_expires(&mut self, expires: &str) {
        self.attributes.expires = Some(expires.to_string());
    }

    pub fn set_referenced(&mut self, referenced: &str) {
        self.attributes.referenced = Some(referenced.to_string());
    }

    pub fn set_catalog(&mut self, catalog: &str) {
        self.attributes.catalog = Some(catalog.to_string());
    }

    pub fn set_lines(&mut self, lines: u32) {
        self.attributes.lines = Some(lines);
    }

    pub fn set_user_id(&mut self, user_id: &str) {
        self.attributes.user_id = Some(user_id.to_string());
    }

    pub fn created_date(&self) -> Option<NaiveDate> {
        self.attributes.created.as_deref().and_then(parse_ispf_date)
    }

    pub fn expires_date(&self) -> Option<NaiveDate> {
        self.attributes.expires.as_deref().and_then(parse_ispf_date)
    }

    pub fn referenced_date(&self) -> Option<NaiveDate> {
        self.attributes.referenced.as_deref().and_then(parse_ispf_date)
    }
}

/// Tabla de datasets de la sesión, ordenada por nombre. Sólo crece.
#[derive(Debug, Default)]
pub struct DatasetStore {
    datasets: BTreeMap<String, Dataset>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devuelve el registro existente o crea uno vacío
    pub fn upsert(&mut self, name: &str) -> &mut Dataset {
        self.datasets.entry(name.to_string()).or_insert_with(|| {
            debug!("Nuevo dataset en la sesión: {}", name);
            Dataset::new(name)
        })
    }

    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.datasets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.datasets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.values()
    }

    /// Miembros conocidos de un PDS
    pub fn members_of<'a>(&'a self, pds_name: &'a str) -> impl Iterator<Item = &'a Dataset> + 'a {
        self.datasets.values().filter(move |dataset| {
            crate::patterns::split_member(dataset.name()).0 == pds_name && dataset.member_name().is_some()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_returns_same_record() {
        let mut store = DatasetStore::new();
        store.upsert("USER.TEST.DATA").set_volume("VOL001");
        store.upsert("USER.TEST.DATA").set_tracks(15);

        assert_eq!(store.len(), 1);
        let dataset = store.get("USER.TEST.DATA").unwrap();
        assert_eq!(dataset.attributes().volume.as_deref(), Some("VOL001"));
        assert_eq!(dataset.attributes().tracks, Some(15));
    }

    #[test]
    fn test_apply_never_blanks_missing_attributes() {
        let mut dataset = Dataset::new("SYS1.PARMLIB");
        dataset.set_volume("SYSRES");
        dataset.set_dsorg("PO");

        let observed = DatasetAttributes {
            dsorg: Some("PO-E".to_string()),
            lrecl: Some(80),
            ..Default::default()
        };
        dataset.apply(&observed);

        assert_eq!(dataset.attributes().volume.as_deref(), Some("SYSRES"));
        assert_eq!(dataset.attributes().dsorg.as_deref(), Some("PO-E"));
        assert_eq!(dataset.attributes().lrecl, Some(80));
        assert_eq!(dataset.name(), "SYS1.PARMLIB");
    }

    #[test]
    fn test_dates() {
        let mut dataset = Dataset::new("USER.SRC(PGM1)");
        dataset.set_created("2020/01/31");
        dataset.set_referenced("21/02/03");
        dataset.set_expires("***None***");

        assert_eq!(dataset.created_date(), NaiveDate::from_ymd_opt(2020, 1, 31));
        assert_eq!(dataset.referenced_date(), NaiveDate::from_ymd_opt(2021, 2, 3));
        assert_eq!(dataset.expires_date(), None);
        assert_eq!(dataset.member_name(), Some("PGM1"));
        assert_eq!(parse_ispf_date("2020.031"), NaiveDate::from_ymd_opt(2020, 1, 31));
    }

    #[test]
    fn test_members_of() {
        let mut store = DatasetStore::new();
        store.upsert("USER.SRC");
        store.upsert("USER.SRC(A)");
        store.upsert("USER.SRC(B)");
        store.upsert("USER.SRCX(C)");

        let names: Vec<&str> = store.members_of("USER.SRC").map(|d| d.name()).collect();
        assert_eq!(names, vec!["USER.SRC(A)", "USER.SRC(B)"]);
    }
}
