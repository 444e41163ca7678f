// Clasificación de las instantáneas capturadas en config/screens
use std::path::PathBuf;
use tn3270_watcher::{
    DatasetListLayout, DslistLocation, FieldManager, PanelMatch, ScreenDimensions,
    ScreenSnapshot, ScreenWatcher, WatcherConfig, WatcherSession,
};

fn screen_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config/screens")
        .join(format!("{}.yaml", name))
}

fn load_screen(name: &str) -> FieldManager {
    ScreenSnapshot::load(screen_path(name))
        .unwrap()
        .into_field_manager(ScreenDimensions::default())
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_menu_discovers_userid_and_prefix() {
        let watcher = ScreenWatcher::new();
        let mut session = WatcherSession::new();

        let details = watcher.check(&load_screen("primary_menu"), &mut session);
        assert!(details.is_command_screen);
        assert_eq!(details.prompt_line, Some(3));
        assert_eq!(details.userid, "IBMUSER");
        assert_eq!(details.prefix, "IBMUSER");
        assert_eq!(session.userid(), "IBMUSER");
        assert_eq!(session.prefix(), "IBMUSER");
        println!("✓ Userid y prefijo descubiertos en el menú principal");
    }

    #[test]
    fn test_prefix_is_not_rediscovered() {
        let watcher = ScreenWatcher::new();
        let mut session = WatcherSession::new();
        watcher.check(&load_screen("primary_menu"), &mut session);

        let content = std::fs::read_to_string(screen_path("primary_menu")).unwrap();
        let changed = content.replace(
            "{ row: 12, col: 70, text: \"IBMUSER\"",
            "{ row: 12, col: 70, text: \"OTHER\"",
        );
        assert_ne!(content, changed);
        let screen = ScreenSnapshot::parse(&changed)
            .unwrap()
            .into_field_manager(ScreenDimensions::default())
            .unwrap();

        let details = watcher.check(&screen, &mut session);
        assert_eq!(details.prefix, "IBMUSER");
        assert_eq!(session.prefix(), "IBMUSER");
        println!("✓ El prefijo no se vuelve a leer una vez conocido");
    }

    #[test]
    fn test_tso_shell() {
        let watcher = ScreenWatcher::new();
        let mut session = WatcherSession::new();

        let details = watcher.check(&load_screen("tso_shell"), &mut session);
        assert!(details.is_tso_shell);
        assert!(details.is_command_screen);
        assert_eq!(details.panel, PanelMatch::TsoShell);
        assert_eq!(details.command_field.as_ref().unwrap().display_length(), 234);
        assert_eq!(details.prompt_line, None);
        println!("✓ ISPF Command Shell");
    }

    #[test]
    fn test_dslist_space_snapshot() {
        let watcher = ScreenWatcher::new();
        let mut session = WatcherSession::new();

        let details = watcher.check(&load_screen("dslist_space"), &mut session);
        assert!(details.is_dataset_list);
        assert_eq!(details.datasets_matching, "IBMUSER");
        assert_eq!(
            details.screen_datasets,
            vec!["IBMUSER.JCL", "IBMUSER.LOAD", "IBMUSER.MIGRATED", "IBMUSER.SRC"]
        );

        let load = session.datasets().get("IBMUSER.LOAD").unwrap();
        assert_eq!(load.attributes().tracks, Some(30));
        assert_eq!(load.attributes().percent_used, Some(80));
        assert_eq!(load.attributes().extents, Some(2));

        let migrated = session.datasets().get("IBMUSER.MIGRATED").unwrap();
        assert_eq!(migrated.attributes().tracks, Some(0));
        assert_eq!(migrated.attributes().device, None);
        println!("✓ DSLIST vista Space desde instantánea");
    }

    #[test]
    fn test_dslist_total_catalog_snapshot() {
        let watcher = ScreenWatcher::new();
        let mut session = WatcherSession::new();

        let details = watcher.check(&load_screen("dslist_total"), &mut session);
        assert_eq!(
            details.panel,
            PanelMatch::DatasetList {
                layout: DatasetListLayout::TotalCatalog,
                location: DslistLocation::OnVolume("VOL001".to_string()),
            }
        );
        assert_eq!(details.datasets_on_volume, "VOL001");
        assert_eq!(details.screen_datasets, vec!["IBMUSER.JCL", "IBMUSER.DATA"]);

        let jcl = session.datasets().get("IBMUSER.JCL").unwrap().attributes().clone();
        assert_eq!(jcl.volume.as_deref(), Some("VOL001"));
        assert_eq!(jcl.tracks, Some(15));
        assert_eq!(jcl.dsorg.as_deref(), Some("PO"));
        assert_eq!(jcl.recfm.as_deref(), Some("FB"));
        assert_eq!(jcl.lrecl, Some(80));
        assert_eq!(jcl.blksize, Some(27920));
        assert_eq!(jcl.created.as_deref(), Some("2020/01/15"));
        assert_eq!(jcl.referenced.as_deref(), Some("2021/03/04"));
        assert_eq!(jcl.catalog.as_deref(), Some("CATALOG.MASTER"));

        let data = session.datasets().get("IBMUSER.DATA").unwrap();
        assert_eq!(data.attributes().dsorg.as_deref(), Some("PS"));
        assert_eq!(data.attributes().percent_used, Some(100));
        println!("✓ DSLIST vista Total con catálogo");
    }

    #[test]
    fn test_member_list_snapshot() {
        let watcher = ScreenWatcher::new();
        let mut session = WatcherSession::new();

        let details = watcher.check(&load_screen("member_list"), &mut session);
        assert!(details.is_member_list);
        assert_eq!(details.current_pds, "IBMUSER.SRC");
        assert_eq!(details.screen_datasets.len(), 3);

        let members: Vec<&str> = session
            .datasets()
            .members_of("IBMUSER.SRC")
            .map(|member| member.name())
            .collect();
        assert_eq!(
            members,
            vec!["IBMUSER.SRC(COPYBK)", "IBMUSER.SRC(PGM1)", "IBMUSER.SRC(PGM2)"]
        );

        let pgm2 = session.datasets().get("IBMUSER.SRC(PGM2)").unwrap();
        assert_eq!(pgm2.attributes().lines, Some(120));
        assert_eq!(pgm2.attributes().user_id.as_deref(), Some("DEVUSER"));
        assert_eq!(
            pgm2.referenced_date(),
            chrono::NaiveDate::from_ymd_opt(2021, 7, 14)
        );
        println!("✓ Lista de miembros desde instantánea");
    }

    #[test]
    fn test_edit_member_snapshot() {
        let watcher = ScreenWatcher::new();
        let mut session = WatcherSession::new();

        let details = watcher.check(&load_screen("edit_member"), &mut session);
        assert_eq!(details.single_dataset, "IBMUSER.SRC(PGM1)");
        assert_eq!(details.recent_datasets, vec!["IBMUSER.SRC(PGM1)"]);
        assert!(session.datasets().is_empty());
        println!("✓ EDIT de un miembro desde instantánea");
    }

    #[test]
    fn test_split_screen_snapshot() {
        let watcher = ScreenWatcher::new();
        let mut session = WatcherSession::new();

        let details = watcher.check(&load_screen("split_screen"), &mut session);
        assert!(details.is_split_screen);
        assert!(!details.is_command_screen);
        assert!(details.single_dataset.is_empty());
        assert!(session.recent_datasets().is_empty());
        println!("✓ Pantalla partida desde instantánea");
    }

    #[test]
    fn test_session_over_several_screens() {
        let watcher = ScreenWatcher::new();
        let mut session = WatcherSession::new();

        for name in ["primary_menu", "dslist_space", "member_list", "edit_member"] {
            watcher.check(&load_screen(name), &mut session);
        }

        let last = session.last_classification();
        assert_eq!(last.userid, "IBMUSER");
        assert_eq!(last.prefix, "IBMUSER");
        assert_eq!(last.single_dataset, "IBMUSER.SRC(PGM1)");
        assert_eq!(session.datasets().len(), 7);
        assert!(session.datasets().contains("IBMUSER.JCL"));
        assert!(session.datasets().contains("IBMUSER.SRC(PGM1)"));
        println!("✓ Sesión completa");
    }

    #[test]
    fn test_bare_names_resolve_in_screens_dir() {
        let config = WatcherConfig {
            screens_dir: format!("{}/config/screens", env!("CARGO_MANIFEST_DIR")),
            ..WatcherConfig::default()
        };
        let path = config.snapshot_path("edit_member");
        assert_eq!(path, screen_path("edit_member"));

        let screen = ScreenSnapshot::load(&path)
            .unwrap()
            .into_field_manager(config.dimensions())
            .unwrap();
        let watcher = ScreenWatcher::new();
        let mut session = WatcherSession::new();
        assert_eq!(
            watcher.check(&screen, &mut session).single_dataset,
            "IBMUSER.SRC(PGM1)"
        );
        println!("✓ Nombres de instantánea resueltos en screens_dir");
    }
}
