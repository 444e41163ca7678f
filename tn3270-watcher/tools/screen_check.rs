// Clasifica una secuencia de instantáneas de pantalla en una misma sesión
use clap::Parser;
use tn3270_watcher::{
    init_logging, DatasetListLayout, FieldProvider, PanelMatch, ScreenSnapshot, ScreenWatcher,
    WatcherConfig, WatcherSession,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "screen_check")]
#[command(about = "Classify captured ISPF screens and show the extracted details")]
struct Args {
    /// YAML snapshots, processed in order within one session. Bare names are
    /// looked up in the configured screens directory
    #[arg(required = true)]
    snapshots: Vec<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Only report dataset lists shown in this DSLIST view (1-5)
    #[arg(long, value_name = "VIEW")]
    dslist_view: Option<u8>,

    /// Print each classification as JSON
    #[arg(long)]
    json: bool,

    /// Dump the field table of each screen
    #[arg(long)]
    fields: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = WatcherConfig::load(&args.config)?;
    let level = args.log_level.as_deref().unwrap_or(&config.log_level);
    init_logging(level);
    info!(level = %level, "Inicializando screen_check");

    let view = args.dslist_view.map(DatasetListLayout::try_from).transpose()?;
    let watcher = ScreenWatcher::new();
    let mut session = WatcherSession::with_recent_limit(config.recent_limit);

    for name in &args.snapshots {
        let path = config.snapshot_path(name);
        let snapshot = ScreenSnapshot::load(&path)?;
        let screen = snapshot.into_field_manager(config.dimensions())?;
        info!("Pantalla {}: {} campos", path.display(), screen.all_fields().len());

        let details = watcher.check(&screen, &mut session);
        if let Some(view) = view {
            let shown = matches!(
                details.panel,
                PanelMatch::DatasetList { layout, .. } if layout == view
            );
            if !shown {
                continue;
            }
        }

        if args.fields {
            println!("{}", screen.debug_export());
        }
        if args.json {
            println!("{}", serde_json::to_string_pretty(details)?);
        } else {
            println!("== {}", path.display());
            println!("{}", details);
        }
    }

    if args.json {
        let datasets: Vec<_> = session.datasets().iter().collect();
        println!("{}", serde_json::to_string_pretty(&datasets)?);
    } else {
        println!("\nDatasets de la sesión: {}", session.datasets().len());
        for dataset in session.datasets().iter() {
            println!("  {}", serde_json::to_string(dataset)?);
        }
    }

    Ok(())
}
