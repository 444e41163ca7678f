// Resultado de la clasificación de una pantalla
use crate::layouts::{DatasetListLayout, MemberDetail};
use crate::ispf_constants::{MATCHING, ON_VOLUME};
use neo6_screen_lib::Field;
use serde::Serialize;
use std::fmt;

/// Origen de la lista de datasets indicado en el título de DSLIST
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DslistLocation {
    /// `on volume VOL001`
    OnVolume(String),
    /// `Matching USER.*`
    Matching(String),
    /// Cualquier otro título, por ejemplo `Matched in list REFLIST`
    Unrecognized(String),
}

impl DslistLocation {
    /// Interpreta el texto del título entre `DSLIST - Data Sets ` y `Row `
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Some(volume) = text.strip_prefix(ON_VOLUME) {
            DslistLocation::OnVolume(volume.trim().to_string())
        } else if let Some(pattern) = text.strip_prefix(MATCHING) {
            DslistLocation::Matching(pattern.trim().to_string())
        } else {
            DslistLocation::Unrecognized(text.to_string())
        }
    }
}

/// Panel reconocido en la última pantalla
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum PanelMatch {
    #[default]
    Unrecognized,
    SplitScreen,
    TsoShell,
    CommandPrompt,
    DatasetList {
        layout: DatasetListLayout,
        location: DslistLocation,
    },
    MemberList {
        mode: String,
        pds: String,
        detail: Option<MemberDetail>,
    },
    SingleDataset {
        name: String,
    },
}

/// Información extraída de la pantalla actual.
///
/// Todo se recalcula en cada pantalla salvo `userid`, `prefix` y
/// `recent_datasets`, que se copian del estado de la sesión.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScreenDetails {
    pub panel: PanelMatch,
    pub is_split_screen: bool,
    pub is_tso_shell: bool,
    pub is_command_screen: bool,
    pub is_dataset_list: bool,
    pub is_member_list: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_field: Option<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_line: Option<usize>,
    pub current_pds: String,
    pub single_dataset: String,
    pub datasets_matching: String,
    pub datasets_on_volume: String,
    /// Datasets o miembros extraídos de esta pantalla, en orden de aparición
    pub screen_datasets: Vec<String>,
    pub recent_datasets: Vec<String>,
    pub userid: String,
    pub prefix: String,
}

impl fmt::Display for ScreenDetails {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Detalles de pantalla:")?;
        writeln!(f, "  Pantalla partida ......: {}", self.is_split_screen)?;
        writeln!(f, "  ISPF Command Shell ....: {}", self.is_tso_shell)?;
        writeln!(f, "  Línea de comandos .....: {}", self.is_command_screen)?;
        match (&self.command_field, self.prompt_line) {
            (Some(field), Some(line)) => writeln!(
                f,
                "  Campo de comandos .....: offset {} longitud {} (fila {})",
                field.first_location(),
                field.display_length(),
                line
            )?,
            (Some(field), None) => writeln!(
                f,
                "  Campo de comandos .....: offset {} longitud {}",
                field.first_location(),
                field.display_length()
            )?,
            _ => {}
        }
        writeln!(f, "  Lista de datasets .....: {}", self.is_dataset_list)?;
        if !self.datasets_matching.is_empty() {
            writeln!(f, "    Patrón ..............: {}", self.datasets_matching)?;
        }
        if !self.datasets_on_volume.is_empty() {
            writeln!(f, "    Volumen .............: {}", self.datasets_on_volume)?;
        }
        writeln!(f, "  Lista de miembros .....: {}", self.is_member_list)?;
        if !self.current_pds.is_empty() {
            writeln!(f, "    PDS .................: {}", self.current_pds)?;
        }
        if !self.single_dataset.is_empty() {
            writeln!(f, "  Dataset ...............: {}", self.single_dataset)?;
        }
        if !self.screen_datasets.is_empty() {
            writeln!(f, "  En pantalla ...........: {}", self.screen_datasets.join(", "))?;
        }
        if !self.recent_datasets.is_empty() {
            writeln!(f, "  Recientes .............: {}", self.recent_datasets.join(", "))?;
        }
        writeln!(f, "  Userid ................: {}", self.userid)?;
        write!(f, "  Prefijo TSO ...........: {}", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_parsing() {
        assert_eq!(
            DslistLocation::parse("Matching USER.*  "),
            DslistLocation::Matching("USER.*".to_string())
        );
        assert_eq!(
            DslistLocation::parse("on volume VOL001 "),
            DslistLocation::OnVolume("VOL001".to_string())
        );
        assert_eq!(
            DslistLocation::parse("Matched in list REFLIST"),
            DslistLocation::Unrecognized("Matched in list REFLIST".to_string())
        );
    }

    #[test]
    fn test_default_is_unrecognized() {
        let details = ScreenDetails::default();
        assert_eq!(details.panel, PanelMatch::Unrecognized);
        assert!(!details.is_command_screen);
        assert!(details.command_field.is_none());
        assert!(details.prompt_line.is_none());
    }

    #[test]
    fn test_display_report() {
        let details = ScreenDetails {
            is_command_screen: true,
            command_field: Some(Field::new(94, 66, false, false, "")),
            prompt_line: Some(1),
            userid: "IBMUSER".to_string(),
            ..Default::default()
        };
        let report = details.to_string();
        assert!(report.contains("offset 94 longitud 66 (fila 1)"));
        assert!(report.contains("Userid ................: IBMUSER"));
    }

    #[test]
    fn test_serializes_panel_tag() {
        let details = ScreenDetails {
            panel: PanelMatch::SingleDataset { name: "USER.SRC(PGM1)".to_string() },
            ..Default::default()
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["panel"]["panel"], "single_dataset");
        assert_eq!(json["panel"]["name"], "USER.SRC(PGM1)");
    }
}
