//! Descriptores declarativos de los paneles ISPF reconocidos.
//!
//! Cada variante de panel se describe con sus guardas (número de campos y
//! textos esperados), su paso entre filas y las columnas de corte de sus
//! campos de detalle. El clasificador recorre las tablas y se queda con el
//! primer descriptor cuya guarda se cumple.

use crate::error::WatcherError;
use neo6_screen_lib::{Field, FieldProvider};
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Vistas de la lista de datasets (DSLIST, opción 3.4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetListLayout {
    /// Tracks %Used XT Device
    Space,
    /// Dsorg Recfm Lrecl Blksz
    Attributes,
    /// Message Volume
    Volume,
    /// Vista total en tres líneas con catálogo
    TotalCatalog,
    /// Vista total en dos líneas
    Total,
}

impl DatasetListLayout {
    /// Número de tipo de pantalla usado en trazas e informes
    pub fn screen_type(self) -> u8 {
        match self {
            DatasetListLayout::Space => 1,
            DatasetListLayout::Attributes => 2,
            DatasetListLayout::Volume => 3,
            DatasetListLayout::TotalCatalog => 4,
            DatasetListLayout::Total => 5,
        }
    }

    pub fn descriptor(self) -> &'static DatasetListDescriptor {
        match self {
            DatasetListLayout::Space => &DATASET_LIST_LAYOUTS[0],
            DatasetListLayout::Attributes => &DATASET_LIST_LAYOUTS[1],
            DatasetListLayout::Volume => &DATASET_LIST_LAYOUTS[2],
            DatasetListLayout::TotalCatalog => &DATASET_LIST_LAYOUTS[3],
            DatasetListLayout::Total => &DATASET_LIST_LAYOUTS[4],
        }
    }
}

impl TryFrom<u8> for DatasetListLayout {
    type Error = WatcherError;

    fn try_from(screen_type: u8) -> Result<Self, Self::Error> {
        match screen_type {
            1 => Ok(DatasetListLayout::Space),
            2 => Ok(DatasetListLayout::Attributes),
            3 => Ok(DatasetListLayout::Volume),
            4 => Ok(DatasetListLayout::TotalCatalog),
            5 => Ok(DatasetListLayout::Total),
            other => Err(WatcherError::UnsupportedScreenType(other)),
        }
    }
}

impl fmt::Display for DatasetListLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DatasetListLayout::Space => "Space",
            DatasetListLayout::Attributes => "Attributes",
            DatasetListLayout::Volume => "Volume",
            DatasetListLayout::TotalCatalog => "Total (catalog)",
            DatasetListLayout::Total => "Total",
        };
        write!(f, "{} ({})", name, self.screen_type())
    }
}

/// Línea siguiente a la leyenda que distingue las vistas totales
#[derive(Debug, Clone, Copy)]
pub enum NextLine {
    Exact(&'static str),
    Prefix(&'static str),
}

/// Guarda sobre los campos de la leyenda (filas 5 y 6)
#[derive(Debug, Clone, Copy)]
pub enum LegendGuard {
    /// El segundo campo empieza por el texto indicado
    HeadingPrefix(&'static str),
    /// Cabeceras `Message` y `Volume`
    MessageVolume,
    /// `Message` y `Volume` seguidas de una única línea en la fila de datos
    MessageVolumeThen(NextLine),
}

/// Qué se extrae de un campo de detalle
#[derive(Debug, Clone, Copy)]
pub enum DetailKind {
    /// Tracks, %used, extents y device, cortados en tres columnas
    Space([usize; 3]),
    /// Dsorg, recfm, lrecl y blksize, cortados en tres columnas
    Disposition([usize; 3]),
    Volume,
    Dates,
    Catalog,
}

/// Regla de extracción: se aplica si la entrada tiene al menos `min_fields`
#[derive(Debug, Clone, Copy)]
pub struct ExtractRule {
    pub min_fields: usize,
    pub field: usize,
    pub kind: DetailKind,
}

#[derive(Debug)]
pub struct DatasetListDescriptor {
    pub layout: DatasetListLayout,
    /// Campos en las filas de la leyenda
    pub legend_fields: usize,
    pub guard: LegendGuard,
    /// Líneas que ocupa cada dataset
    pub lines_per_dataset: usize,
    /// Primera fila de datos
    pub first_line: usize,
    /// Si se indica, las reglas sólo se aplican con ese número exacto de campos
    pub exact_fields: Option<usize>,
    pub rules: &'static [ExtractRule],
}

/// Fila de la leyenda de DSLIST
pub const DSLIST_LEGEND_ROW: usize = 5;
pub const DSLIST_LEGEND_ROWS: usize = 2;
/// Fila del título de DSLIST
pub const DSLIST_TITLE_ROW: usize = 2;
pub const DSLIST_TITLE_ROWS: usize = 2;

const TOTAL_SPACE: DetailKind = DetailKind::Space([6, 10, 14]);
const TOTAL_DISPOSITION: DetailKind = DetailKind::Disposition([5, 10, 16]);

pub static DATASET_LIST_LAYOUTS: [DatasetListDescriptor; 5] = [
    DatasetListDescriptor {
        layout: DatasetListLayout::Space,
        legend_fields: 3,
        guard: LegendGuard::HeadingPrefix("Tracks"),
        lines_per_dataset: 1,
        first_line: 7,
        exact_fields: Some(2),
        rules: &[ExtractRule { min_fields: 2, field: 1, kind: DetailKind::Space([6, 11, 15]) }],
    },
    DatasetListDescriptor {
        layout: DatasetListLayout::Attributes,
        legend_fields: 3,
        guard: LegendGuard::HeadingPrefix("Dsorg"),
        lines_per_dataset: 1,
        first_line: 7,
        exact_fields: Some(2),
        rules: &[ExtractRule { min_fields: 2, field: 1, kind: DetailKind::Disposition([5, 11, 18]) }],
    },
    DatasetListDescriptor {
        layout: DatasetListLayout::Volume,
        legend_fields: 4,
        guard: LegendGuard::MessageVolume,
        lines_per_dataset: 1,
        first_line: 7,
        exact_fields: Some(3),
        rules: &[ExtractRule { min_fields: 3, field: 2, kind: DetailKind::Volume }],
    },
    DatasetListDescriptor {
        layout: DatasetListLayout::TotalCatalog,
        legend_fields: 6,
        guard: LegendGuard::MessageVolumeThen(NextLine::Exact("Catalog")),
        lines_per_dataset: 3,
        first_line: 9,
        exact_fields: Some(7),
        rules: &[
            ExtractRule { min_fields: 7, field: 2, kind: DetailKind::Volume },
            ExtractRule { min_fields: 7, field: 3, kind: TOTAL_SPACE },
            ExtractRule { min_fields: 7, field: 4, kind: TOTAL_DISPOSITION },
            ExtractRule { min_fields: 7, field: 5, kind: DetailKind::Dates },
            ExtractRule { min_fields: 7, field: 6, kind: DetailKind::Catalog },
        ],
    },
    DatasetListDescriptor {
        layout: DatasetListLayout::Total,
        legend_fields: 6,
        guard: LegendGuard::MessageVolumeThen(NextLine::Prefix("--")),
        lines_per_dataset: 2,
        first_line: 8,
        exact_fields: None,
        rules: &[
            ExtractRule { min_fields: 3, field: 2, kind: DetailKind::Volume },
            ExtractRule { min_fields: 6, field: 3, kind: TOTAL_SPACE },
            ExtractRule { min_fields: 6, field: 4, kind: TOTAL_DISPOSITION },
            ExtractRule { min_fields: 6, field: 5, kind: DetailKind::Dates },
        ],
    },
];

/// Fila que sigue a la leyenda en las vistas totales
const TOTAL_NEXT_ROW: usize = 7;

impl DatasetListDescriptor {
    /// Comprueba la guarda sobre los campos de la leyenda. Las vistas totales
    /// necesitan además mirar la fila siguiente.
    pub fn matches(&self, legend: &[&Field], screen: &dyn FieldProvider) -> bool {
        if legend.len() != self.legend_fields {
            return false;
        }

        match self.guard {
            LegendGuard::HeadingPrefix(prefix) => legend[1].trimmed_text().starts_with(prefix),
            LegendGuard::MessageVolume => is_message_volume(legend),
            LegendGuard::MessageVolumeThen(next) => {
                if !is_message_volume(legend) {
                    return false;
                }
                let next_row = screen.fields_on_row(TOTAL_NEXT_ROW, 1);
                if next_row.len() != 1 {
                    return false;
                }
                let line = next_row[0].trimmed_text();
                match next {
                    NextLine::Exact(text) => line == text,
                    NextLine::Prefix(prefix) => line.starts_with(prefix),
                }
            }
        }
    }

    /// Reglas aplicables a una entrada con `fields` campos
    pub fn rules_for(&self, fields: usize) -> impl Iterator<Item = &ExtractRule> {
        let allowed = self.exact_fields.map_or(true, |exact| exact == fields);
        self.rules
            .iter()
            .filter(move |rule| allowed && fields >= rule.min_fields)
    }
}

fn is_message_volume(legend: &[&Field]) -> bool {
    legend[1].text_trim_equals("Message") && legend[2].text_trim_equals("Volume")
}

/// Columnas de corte del campo de detalle de un miembro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSet {
    /// Size Created Changed ID
    pub statistics: [usize; 4],
    /// Size Init Mod VV.MM ID
    pub ids: [usize; 4],
}

pub const LIBRARY_TABS: TabSet = TabSet {
    statistics: [12, 25, 38, 47],
    ids: [12, 21, 31, 43],
};

pub const DSLIST_TABS: TabSet = TabSet {
    statistics: [9, 21, 33, 42],
    ids: [9, 17, 25, 36],
};

/// Disposición de las columnas de detalle de una lista de miembros
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberDetail {
    Statistics,
    Ids,
}

/// Resultado de evaluar las cabeceras de la fila 4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingMatch {
    Detail(MemberDetail),
    /// Lista válida pero sin columnas de detalle reconocibles
    Unknown,
    /// No es una lista de miembros
    Rejected,
}

#[derive(Debug, Clone, Copy)]
pub enum HeadingRule {
    /// Sólo por número de cabeceras: 7 o 10 estadísticas, 13 identificadores
    ByCount,
    /// Número de cabeceras y texto de la cabecera 5 (`Created` / `Init`)
    ByHeadingText,
}

impl HeadingRule {
    pub fn evaluate(self, headings: &[&Field]) -> HeadingMatch {
        match self {
            HeadingRule::ByCount => match headings.len() {
                7 | 10 => HeadingMatch::Detail(MemberDetail::Statistics),
                13 => HeadingMatch::Detail(MemberDetail::Ids),
                other => {
                    warn!("Número de cabeceras inesperado: {}", other);
                    HeadingMatch::Unknown
                }
            },
            HeadingRule::ByHeadingText => {
                if headings.len() == 10 && headings[5].text_trim_equals("Created") {
                    HeadingMatch::Detail(MemberDetail::Statistics)
                } else if headings.len() == 13 && headings[5].text_trim_equals("Init") {
                    HeadingMatch::Detail(MemberDetail::Ids)
                } else {
                    HeadingMatch::Rejected
                }
            }
        }
    }
}

/// Lista de miembros identificada por su barra de acciones
#[derive(Debug)]
pub struct MemberListDescriptor {
    pub menus: &'static [&'static str],
    pub mode_field: usize,
    pub mode_offset: usize,
    pub name_field: usize,
    pub name_offset: usize,
    pub modes: &'static [(&'static str, TabSet)],
    pub headings: HeadingRule,
}

impl MemberListDescriptor {
    pub fn menus_match(&self, menus: &[String]) -> bool {
        menus.len() == self.menus.len() && menus.iter().zip(self.menus).all(|(a, b)| a == b)
    }

    pub fn tabs_for(&self, mode: &str) -> Option<TabSet> {
        self.modes
            .iter()
            .find(|(name, _)| *name == mode)
            .map(|(_, tabs)| *tabs)
    }
}

pub static MEMBER_LIST_LAYOUTS: [MemberListDescriptor; 2] = [
    // Utilidad de librerías (3.1) y selección de miembros desde DSLIST
    MemberListDescriptor {
        menus: &crate::ispf_constants::PDS_MENUS,
        mode_field: 8,
        mode_offset: 161,
        name_field: 9,
        name_offset: 179,
        modes: &[
            ("LIBRARY", LIBRARY_TABS),
            ("EDIT", DSLIST_TABS),
            ("BROWSE", DSLIST_TABS),
            ("VIEW", DSLIST_TABS),
            ("DSLIST", DSLIST_TABS),
        ],
        headings: HeadingRule::ByCount,
    },
    // Opciones 1 y 2 (con o sin modo browse)
    MemberListDescriptor {
        menus: &crate::ispf_constants::MEMBER_MENUS,
        mode_field: 7,
        mode_offset: 161,
        name_field: 8,
        name_offset: 170,
        modes: &[
            ("EDIT", LIBRARY_TABS),
            ("BROWSE", LIBRARY_TABS),
            ("VIEW", LIBRARY_TABS),
        ],
        headings: HeadingRule::ByHeadingText,
    },
];

/// Posiciones del menú principal de ISPF donde se leen userid y prefijo
#[derive(Debug)]
pub struct PrimaryMenuLayout {
    pub heading_field: usize,
    pub userid_label_field: usize,
    pub userid_label_offset: usize,
    pub userid_offset: usize,
    pub prefix_label_field: usize,
    pub prefix_label_offset: usize,
    pub prefix_offset: usize,
}

pub const PRIMARY_MENU: PrimaryMenuLayout = PrimaryMenuLayout {
    heading_field: 10,
    userid_label_field: 23,
    userid_label_offset: 457,
    userid_offset: 470,
    prefix_label_field: 72,
    prefix_label_offset: 1017,
    prefix_offset: 1030,
};

/// Posiciones de la ISPF Command Shell
pub const SHELL_HEADING_FIELD: usize = 10;
pub const SHELL_WORKSTATION_FIELDS: [usize; 2] = [13, 14];
pub const SHELL_COMMAND_DISTANCE: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_type_round_trip_through_table() {
        for descriptor in DATASET_LIST_LAYOUTS.iter() {
            let layout = DatasetListLayout::try_from(descriptor.layout.screen_type()).unwrap();
            assert_eq!(layout, descriptor.layout);
            assert!(std::ptr::eq(layout.descriptor(), descriptor));
        }
    }

    #[test]
    fn test_unknown_screen_type_is_an_error() {
        match DatasetListLayout::try_from(6_u8) {
            Err(WatcherError::UnsupportedScreenType(6)) => {}
            other => panic!("Expected UnsupportedScreenType, got {:?}", other),
        }
        assert!(DatasetListLayout::try_from(0_u8).is_err());
    }

    #[test]
    fn test_optional_view_filter() {
        let view = Some(5_u8).map(DatasetListLayout::try_from).transpose().unwrap();
        assert_eq!(view, Some(DatasetListLayout::Total));
        assert_eq!(view.map(|layout| layout.to_string()).as_deref(), Some("Total (5)"));

        let none: Option<u8> = None;
        assert_eq!(none.map(DatasetListLayout::try_from).transpose().unwrap(), None);

        let error = Some(9_u8).map(DatasetListLayout::try_from).transpose().unwrap_err();
        assert!(matches!(error, WatcherError::UnsupportedScreenType(9)));
    }

    #[test]
    fn test_rules_for_exact_and_minimum_counts() {
        let total_catalog = DatasetListLayout::TotalCatalog.descriptor();
        assert_eq!(total_catalog.rules_for(7).count(), 5);
        assert_eq!(total_catalog.rules_for(6).count(), 0);

        let total = DatasetListLayout::Total.descriptor();
        assert_eq!(total.rules_for(3).count(), 1);
        assert_eq!(total.rules_for(6).count(), 4);
        assert_eq!(total.rules_for(2).count(), 0);
    }

    #[test]
    fn test_heading_rules() {
        let headings: Vec<Field> = (0..10)
            .map(|i| {
                let text = if i == 5 { "Created" } else { "Head" };
                Field::label(321 + i * 8, text)
            })
            .collect();
        let refs: Vec<&Field> = headings.iter().collect();

        assert_eq!(
            HeadingRule::ByHeadingText.evaluate(&refs),
            HeadingMatch::Detail(MemberDetail::Statistics)
        );
        assert_eq!(
            HeadingRule::ByCount.evaluate(&refs),
            HeadingMatch::Detail(MemberDetail::Statistics)
        );
        assert_eq!(HeadingRule::ByHeadingText.evaluate(&refs[..9]), HeadingMatch::Rejected);
        assert_eq!(HeadingRule::ByCount.evaluate(&refs[..9]), HeadingMatch::Unknown);
    }

    #[test]
    fn test_member_tabs_by_mode() {
        let library = &MEMBER_LIST_LAYOUTS[0];
        assert_eq!(library.tabs_for("LIBRARY"), Some(LIBRARY_TABS));
        assert_eq!(library.tabs_for("DSLIST"), Some(DSLIST_TABS));
        assert_eq!(library.tabs_for("COPY"), None);

        let member = &MEMBER_LIST_LAYOUTS[1];
        assert_eq!(member.tabs_for("VIEW"), Some(LIBRARY_TABS));
        assert_eq!(member.tabs_for("DSLIST"), None);
    }
}
