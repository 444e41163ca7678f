//! Clasificador de pantallas ISPF.
//!
//! Cada vez que el host envía una pantalla completa, el watcher la clasifica
//! en cascada: pantalla partida, ISPF Command Shell, línea de comandos y,
//! sobre esta última, menú principal, lista de datasets, lista de miembros o
//! dataset en edición. Las etapas son funciones puras sobre el proveedor de
//! campos; sólo `check` escribe en la sesión.

use crate::extractor::{extract, extract_member, slice_columns};
use crate::ispf_constants::*;
use crate::layouts::{
    DATASET_LIST_LAYOUTS, DSLIST_LEGEND_ROW, DSLIST_LEGEND_ROWS, DSLIST_TITLE_ROW,
    DSLIST_TITLE_ROWS, DatasetListLayout, HeadingMatch, MEMBER_LIST_LAYOUTS, MemberDetail,
    PRIMARY_MENU, SHELL_COMMAND_DISTANCE, SHELL_HEADING_FIELD, SHELL_WORKSTATION_FIELDS,
};
use crate::dataset::DatasetAttributes;
use crate::patterns::{is_dataset_name, is_member_name, member_key, split_member};
use crate::screen_details::{DslistLocation, PanelMatch, ScreenDetails};
use crate::session::WatcherSession;
use neo6_screen_lib::{Field, FieldProvider};
use tracing::{debug, info, trace, warn};

/// Línea de comandos encontrada en las filas 1 a 3
#[derive(Debug, Clone, PartialEq)]
pub struct PromptMatch {
    pub field: Field,
    pub line: usize,
}

/// Lista de datasets reconocida con sus entradas
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetListMatch {
    pub layout: DatasetListLayout,
    pub location: DslistLocation,
    pub entries: Vec<(String, DatasetAttributes)>,
}

/// Lista de miembros reconocida con sus entradas
#[derive(Debug, Clone, PartialEq)]
pub struct MemberListMatch {
    pub mode: String,
    pub pds: String,
    pub detail: Option<MemberDetail>,
    /// Miembros con su nombre completo `PDS(MEMBER)`
    pub members: Vec<(String, DatasetAttributes)>,
}

/// Userid y prefijo leídos del menú principal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryMenuMatch {
    pub userid: Option<String>,
    pub prefix: Option<String>,
}

#[derive(Debug, Default)]
pub struct ScreenWatcher;

impl ScreenWatcher {
    pub fn new() -> Self {
        debug!("Entering ScreenWatcher::new");
        ScreenWatcher
    }

    /// Clasifica la pantalla actual y actualiza la sesión.
    ///
    /// Devuelve la clasificación, que queda también como
    /// `last_classification` de la sesión.
    pub fn check<'s>(
        &self,
        screen: &dyn FieldProvider,
        session: &'s mut WatcherSession,
    ) -> &'s ScreenDetails {
        debug!("Entering ScreenWatcher::check");
        let mut details = self.classify(screen, session);

        details.userid = session.userid.clone();
        details.prefix = session.prefix.clone();
        details.recent_datasets = session.recent.to_vec();
        trace!("Clasificación: {:?}", details.panel);

        session.last = details;
        &session.last
    }

    fn classify(&self, screen: &dyn FieldProvider, session: &mut WatcherSession) -> ScreenDetails {
        let mut details = ScreenDetails::default();
        let fields = screen.all_fields();

        if fields.len() < MIN_SCREEN_FIELDS {
            debug!("Pantalla con {} campos, no se clasifica", fields.len());
            return details;
        }

        let columns = screen.dimensions().columns;
        if Self::is_split_screen(fields, columns) {
            details.is_split_screen = true;
            details.panel = PanelMatch::SplitScreen;
            return details;
        }

        if let Some(field) = self.check_tso_shell(screen) {
            details.is_tso_shell = true;
            details.is_command_screen = true;
            details.command_field = Some(field);
            details.panel = PanelMatch::TsoShell;
            return details;
        }

        let Some(prompt) = self.check_prompt(screen) else {
            return details;
        };
        details.is_command_screen = true;
        details.command_field = Some(prompt.field);
        details.prompt_line = Some(prompt.line);
        details.panel = PanelMatch::CommandPrompt;

        if session.prefix.is_empty() {
            if let Some(menu) = self.check_primary_menu(screen) {
                if let Some(userid) = menu.userid {
                    session.userid = userid;
                }
                if let Some(prefix) = menu.prefix {
                    info!("Prefijo TSO descubierto: {}", prefix);
                    session.prefix = prefix;
                }
            }
        }

        if let Some(list) = self.check_dataset_list(screen) {
            details.is_dataset_list = true;
            match &list.location {
                DslistLocation::OnVolume(volume) => details.datasets_on_volume = volume.clone(),
                DslistLocation::Matching(pattern) => details.datasets_matching = pattern.clone(),
                DslistLocation::Unrecognized(_) => {}
            }
            for (name, attributes) in &list.entries {
                session.datasets.upsert(name).apply(attributes);
                details.screen_datasets.push(name.clone());
            }
            details.panel = PanelMatch::DatasetList {
                layout: list.layout,
                location: list.location,
            };
        } else if let Some(list) = self.check_member_list(screen) {
            details.is_member_list = true;
            details.current_pds = list.pds.clone();
            for (name, attributes) in &list.members {
                session.datasets.upsert(name).apply(attributes);
                details.screen_datasets.push(name.clone());
            }
            details.panel = PanelMatch::MemberList {
                mode: list.mode,
                pds: list.pds,
                detail: list.detail,
            };
        } else if let Some(name) = self.check_single_dataset(screen) {
            if session.recent.push(&name) {
                debug!("Nuevo dataset reciente: {}", name);
            }
            details.single_dataset = name.clone();
            details.screen_datasets.push(name.clone());
            details.panel = PanelMatch::SingleDataset { name };
        }

        details
    }

    /// Regla de puntos protegida en la columna 1. No depende del orden de
    /// los campos.
    pub fn is_split_screen(fields: &[Field], columns: usize) -> bool {
        fields.iter().any(|field| {
            field.is_protected()
                && field.display_length() == SPLIT_LINE_LENGTH
                && field.column(columns) == 1
                && field.text() == SPLIT_LINE
        })
    }

    /// ISPF Command Shell (opción 6): devuelve el campo de comandos de 234
    /// posiciones
    pub fn check_tso_shell(&self, screen: &dyn FieldProvider) -> Option<Field> {
        debug!("Entering ScreenWatcher::check_tso_shell");
        let fields = screen.all_fields();
        if fields.len() < MIN_SHELL_FIELDS {
            return None;
        }
        if !screen.field_text_equals(SHELL_HEADING_FIELD, ISPF_SHELL, None) {
            return None;
        }

        let workstation = SHELL_WORKSTATION_FIELDS
            .iter()
            .copied()
            .find(|index| screen.field_text_equals(*index, WORKSTATION_TEXT, None))?;

        let menus = screen.menu_labels();
        if !menus.iter().map(String::as_str).eq(TSO_MENUS) {
            return None;
        }

        let field = fields.get(workstation + SHELL_COMMAND_DISTANCE)?;
        if field.display_length() != SHELL_COMMAND_LENGTH {
            return None;
        }
        Some(field.clone())
    }

    /// `Command ===>` u `Option ===>` en la columna 1 seguido de un campo de
    /// entrada visible de 66 o 48 posiciones
    pub fn check_prompt(&self, screen: &dyn FieldProvider) -> Option<PromptMatch> {
        debug!("Entering ScreenWatcher::check_prompt");
        let columns = screen.dimensions().columns;
        let row_fields = screen.fields_on_row(PROMPT_FIRST_ROW, PROMPT_ROWS);

        for (index, field) in row_fields.iter().enumerate() {
            let text = field.text();
            if field.column(columns) != 1 || (text != COMMAND_PROMPT && text != OPTION_PROMPT) {
                continue;
            }
            let Some(next) = row_fields.get(index + 1) else {
                continue;
            };
            if COMMAND_FIELD_LENGTHS.contains(&next.display_length())
                && next.is_unprotected()
                && next.is_visible()
            {
                return Some(PromptMatch {
                    field: (*next).clone(),
                    line: field.row(columns),
                });
            }
        }
        None
    }

    /// Userid y prefijo TSO del menú principal de ISPF o z/OS
    pub fn check_primary_menu(&self, screen: &dyn FieldProvider) -> Option<PrimaryMenuMatch> {
        debug!("Entering ScreenWatcher::check_primary_menu");
        let fields = screen.all_fields();
        if fields.len() < MIN_PREFIX_FIELDS {
            return None;
        }

        let layout = &PRIMARY_MENU;
        let heading = fields[layout.heading_field].text();
        if heading != ISPF_SCREEN && heading != ZOS_SCREEN {
            return None;
        }

        let mut menu = PrimaryMenuMatch::default();
        if !screen.field_text_equals(
            layout.userid_label_field,
            USER_ID_LABEL,
            Some(layout.userid_label_offset),
        ) {
            return Some(menu);
        }
        let userid = &fields[layout.userid_label_field + 1];
        if userid.first_location() != layout.userid_offset {
            return Some(menu);
        }
        menu.userid = Some(userid.trimmed_text().to_string());

        if !screen.field_text_equals(
            layout.prefix_label_field,
            TSO_PREFIX_LABEL,
            Some(layout.prefix_label_offset),
        ) {
            return Some(menu);
        }
        let prefix = &fields[layout.prefix_label_field + 1];
        if prefix.first_location() == layout.prefix_offset {
            menu.prefix = Some(prefix.trimmed_text().to_string());
        }
        Some(menu)
    }

    /// Lista de datasets de la opción 3.4 en cualquiera de sus vistas
    pub fn check_dataset_list(&self, screen: &dyn FieldProvider) -> Option<DatasetListMatch> {
        debug!("Entering ScreenWatcher::check_dataset_list");
        if screen.all_fields().len() < MIN_DSLIST_FIELDS {
            return None;
        }

        let title_fields = screen.fields_on_row(DSLIST_TITLE_ROW, DSLIST_TITLE_ROWS);
        let title = title_fields.first()?.text();
        let rest = title.strip_prefix(DSLIST_TITLE)?;
        let location_text = match rest.find("Row ") {
            Some(pos) => &rest[..pos],
            None => rest,
        };
        let location = DslistLocation::parse(location_text);
        if let DslistLocation::Unrecognized(text) = &location {
            warn!("Ubicación de DSLIST no reconocida: '{}'", text);
            return None;
        }

        let legend = screen.fields_on_row(DSLIST_LEGEND_ROW, DSLIST_LEGEND_ROWS);
        if legend.len() < 3 || !legend[0].text().starts_with(DSLIST_LEGEND) {
            return None;
        }

        let Some(descriptor) = DATASET_LIST_LAYOUTS
            .iter()
            .find(|descriptor| descriptor.matches(&legend, screen))
        else {
            if DATASET_LIST_LAYOUTS
                .iter()
                .all(|descriptor| descriptor.legend_fields != legend.len())
            {
                warn!("Número de campos de leyenda inesperado: {}", legend.len());
            } else {
                warn!("Vista de DSLIST no reconocida");
            }
            return None;
        };
        debug!("Vista de DSLIST: {}", descriptor.layout);

        let rows = screen.dimensions().rows;
        let lines = descriptor.lines_per_dataset;
        let mut entries = Vec::new();
        let mut next_line = descriptor.first_line;

        while next_line < rows {
            let row_fields = screen.fields_on_row(next_line, lines);
            if row_fields.len() <= 1 {
                break;
            }
            let line = row_fields[0].text();
            if line.chars().count() < DSNAME_COLUMN + 1 {
                break;
            }
            let name = slice_columns(line, DSNAME_COLUMN, None).trim();
            trace!("Fila {}: {} campos, nombre '{}'", next_line, row_fields.len(), name);
            if name.len() > MAX_DSNAME_LENGTH {
                warn!("Nombre de dataset demasiado largo: '{}'", name);
                break;
            }

            if is_dataset_name(name) {
                entries.push((name.to_string(), extract(descriptor.layout, &row_fields)));
            } else if name != EXCLUDE_LINE {
                warn!("Nombre de dataset inválido: '{}'", name);
            }

            next_line += lines;
            if lines > 1 {
                next_line += 1;
            }
        }

        Some(DatasetListMatch {
            layout: descriptor.layout,
            location,
            entries,
        })
    }

    /// Lista de miembros de un PDS, identificada por su barra de acciones
    pub fn check_member_list(&self, screen: &dyn FieldProvider) -> Option<MemberListMatch> {
        debug!("Entering ScreenWatcher::check_member_list");
        let fields = screen.all_fields();
        if fields.len() < MIN_MEMBER_LIST_FIELDS {
            return None;
        }

        let menus = screen.menu_labels();
        let descriptor = MEMBER_LIST_LAYOUTS
            .iter()
            .find(|descriptor| descriptor.menus_match(&menus))?;

        let mode_field = fields.get(descriptor.mode_field)?;
        if mode_field.first_location() != descriptor.mode_offset {
            return None;
        }
        let mode = mode_field.trimmed_text();
        let Some(tabs) = descriptor.tabs_for(mode) else {
            warn!("Modo de lista de miembros inesperado: '{}'", mode);
            return None;
        };

        let name_field = fields.get(descriptor.name_field)?;
        if name_field.first_location() != descriptor.name_offset {
            return None;
        }
        let pds = name_field.trimmed_text().to_string();

        let headings = screen.fields_on_row(MEMBER_HEADINGS_ROW, 1);
        let detail = match descriptor.headings.evaluate(&headings) {
            HeadingMatch::Detail(detail) => Some(detail),
            HeadingMatch::Unknown => None,
            HeadingMatch::Rejected => {
                debug!("Cabeceras de lista de miembros no reconocidas");
                return None;
            }
        };

        let mut members = Vec::new();
        for row in MEMBER_FIRST_ROW..screen.dimensions().rows {
            let row_fields = screen.fields_on_row(row, 1);
            if row_fields.len() != MEMBER_ROW_FIELDS || row_fields[1].text() == END_OF_LIST {
                break;
            }
            let member = row_fields[1].trimmed_text();
            trace!("Fila {}: miembro '{}'", row, member);
            if !is_member_name(member) {
                warn!("Nombre de miembro inválido: '{}'", member);
                break;
            }
            let attributes = detail
                .map(|detail| extract_member(detail, &tabs, row_fields[3].text()))
                .unwrap_or_default();
            members.push((member_key(&pds, member), attributes));
        }

        Some(MemberListMatch {
            mode: mode.to_string(),
            pds,
            detail,
            members,
        })
    }

    /// Dataset o miembro abierto en EDIT, VIEW o BROWSE
    pub fn check_single_dataset(&self, screen: &dyn FieldProvider) -> Option<String> {
        debug!("Entering ScreenWatcher::check_single_dataset");
        if screen.all_fields().len() < MIN_SINGLE_DATASET_FIELDS {
            return None;
        }

        let columns = screen.dimensions().columns;
        let row_fields = screen.fields_on_row(0, 3);

        for (index, field) in row_fields.iter().enumerate() {
            let length = field.display_length();
            if field.column(columns) != 1 || (length != 9 && length != 10) {
                continue;
            }
            let (Some(name_field), Some(marker)) =
                (row_fields.get(index + 1), row_fields.get(index + 2))
            else {
                continue;
            };
            if !SINGLE_DATASET_MODES.contains(&field.trimmed_text())
                || !SINGLE_DATASET_MARKERS.contains(&marker.trimmed_text())
            {
                continue;
            }

            let text = name_field.trimmed_text();
            let name = text.split_once(' ').map_or(text, |(name, _)| name);
            let (dataset, member) = split_member(name);
            if !is_dataset_name(dataset) {
                debug!("Nombre de dataset en edición inválido: '{}'", name);
                continue;
            }
            return Some(match member {
                Some(member) if !member.is_empty() => member_key(dataset, member),
                _ => dataset.to_string(),
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_line(offset: usize) -> Field {
        Field::label(offset, SPLIT_LINE)
    }

    #[test]
    fn test_split_screen_ignores_field_order() {
        let mut fields = vec![
            Field::label(1, "Menu"),
            Field::label(81, "EDIT"),
            split_line(961),
            Field::label(1041, "Command ===>"),
        ];
        assert!(ScreenWatcher::is_split_screen(&fields, 80));
        fields.reverse();
        assert!(ScreenWatcher::is_split_screen(&fields, 80));
        fields.rotate_left(1);
        assert!(ScreenWatcher::is_split_screen(&fields, 80));
    }

    #[test]
    fn test_split_line_must_be_protected_at_column_one() {
        let fields = vec![Field::new(961, 79, false, false, SPLIT_LINE)];
        assert!(!ScreenWatcher::is_split_screen(&fields, 80));

        let fields = vec![Field::label(962, SPLIT_LINE)];
        assert!(!ScreenWatcher::is_split_screen(&fields, 80));
    }
}
