// Literales de los paneles ISPF reconocidos por el watcher.
// Use these named constants instead of hardcoded text throughout the classifier.

// Pantalla partida (SPLIT): regla de puntos de 79 posiciones en la columna 1
pub const SPLIT_LINE: &str = ".  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .";
pub const SPLIT_LINE_LENGTH: usize = 79;

// Línea de comandos
pub const COMMAND_PROMPT: &str = "Command ===>";
pub const OPTION_PROMPT: &str = "Option ===>";
pub const COMMAND_FIELD_LENGTHS: [usize; 2] = [66, 48];
pub const PROMPT_FIRST_ROW: usize = 1;
pub const PROMPT_ROWS: usize = 3;

// Menú principal (descubrimiento de userid y prefijo)
pub const ISPF_SCREEN: &str = "ISPF Primary Option Menu";
pub const ZOS_SCREEN: &str = "z/OS Primary Option Menu";
pub const USER_ID_LABEL: &str = " User ID . :";
pub const TSO_PREFIX_LABEL: &str = " TSO prefix:";

// ISPF Command Shell (opción 6)
pub const ISPF_SHELL: &str = "ISPF Command Shell";
pub const WORKSTATION_TEXT: &str = "Enter TSO or Workstation commands below:";
pub const SHELL_COMMAND_LENGTH: usize = 234;

// Barras de acciones
pub const TSO_MENUS: [&str; 6] = ["Menu", "List", "Mode", "Functions", "Utilities", "Help"];
pub const PDS_MENUS: [&str; 5] = ["Menu", "Functions", "Confirm", "Utilities", "Help"];
pub const MEMBER_MENUS: [&str; 4] = ["Menu", "Functions", "Utilities", "Help"];

// DSLIST (opción 3.4)
pub const DSLIST_TITLE: &str = "DSLIST - Data Sets ";
pub const DSLIST_LEGEND: &str = "Command - Enter";
pub const ON_VOLUME: &str = "on volume ";
pub const MATCHING: &str = "Matching ";
pub const EXCLUDE_LINE: &str = "-  -  -  -  -  -  -  -  -  -  -  -";
pub const DSNAME_COLUMN: usize = 9;
pub const MAX_DSNAME_LENGTH: usize = 44;

// Listas de miembros
pub const END_OF_LIST: &str = "**End** ";
pub const MEMBER_HEADINGS_ROW: usize = 4;
pub const MEMBER_FIRST_ROW: usize = 5;
pub const MEMBER_ROW_FIELDS: usize = 4;

// Edición / visualización de un único dataset
pub const SINGLE_DATASET_MODES: [&str; 3] = ["EDIT", "VIEW", "BROWSE"];
pub const SINGLE_DATASET_MARKERS: [&str; 2] = ["Columns", "Line"];

// Número mínimo de campos por tipo de pantalla
pub const MIN_SCREEN_FIELDS: usize = 3;
pub const MIN_SHELL_FIELDS: usize = 19;
pub const MIN_PREFIX_FIELDS: usize = 74;
pub const MIN_DSLIST_FIELDS: usize = 21;
pub const MIN_MEMBER_LIST_FIELDS: usize = 14;
pub const MIN_SINGLE_DATASET_FIELDS: usize = 13;
