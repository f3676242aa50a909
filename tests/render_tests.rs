//! Screen rendering through the test backend

mod common;

use silverline::MenuInput::{Confirm, MoveDown, MoveUp, Other};
use silverline::{App, ScriptedSurface, ShellConfig, Surface};
use tempfile::tempdir;

fn find_row(rows: &[String], needle: &str) -> Option<usize> {
    rows.iter().position(|r| r.contains(needle))
}

#[test]
fn test_main_menu_layout() {
    let mut app = App::new(ScriptedSurface::new([MoveUp, Confirm]), ShellConfig::default());
    app.run().unwrap();
    let rows = app.surface().snapshot(90, 30).unwrap();

    // panel border on row 1, title on row 2, entries from row 4
    assert_eq!(find_row(&rows, "Main Menu"), Some(2));
    assert_eq!(find_row(&rows, "Utility"), Some(4));
    assert_eq!(find_row(&rows, ">Exit"), Some(8));
    assert!(rows[2].find("Main Menu").unwrap() < 30);

    let status = find_row(&rows, "WELCOME TO SILVERLINE").unwrap();
    assert_eq!(status, 26);
}

#[test]
fn test_utility_menu_in_middle_column() {
    // script ends while the sub-menu is waiting for input
    let mut app = App::new(ScriptedSurface::new([Confirm, MoveDown]), ShellConfig::default());
    assert!(app.run().is_err());
    let rows = app.surface().snapshot(90, 30).unwrap();

    let title_row = find_row(&rows, "Utility Menu").unwrap();
    assert!(rows[title_row].find("Utility Menu").unwrap() > 30);
    assert!(find_row(&rows, ">Install").is_some());
}

#[test]
fn test_progress_panel_shows_done() {
    let dir = tempdir().unwrap();
    let body = common::payload(4_096);
    let (url, server) = common::serve_once("200 OK", body, true);
    let config = ShellConfig {
        download_url: url,
        download_path: dir.path().join("avg.tar.gz"),
        extract_path: dir.path().join("avg.tar"),
        use_system_proxy: false,
        ..ShellConfig::default()
    };

    // Utility → Download, then Exit
    let mut app = App::new(ScriptedSurface::new([Confirm, Confirm, MoveUp, Confirm]), config);
    app.run().unwrap();
    server.join().unwrap();
    let rows = app.surface().snapshot(90, 30).unwrap();

    assert_eq!(find_row(&rows, "100% Complete"), Some(22));
    assert_eq!(find_row(&rows, "Done!"), Some(24));
    assert!(!rows[23].contains('-'));
    assert_eq!(find_row(&rows, "Download complete"), Some(26));
}

#[test]
fn test_status_stays_visible_after_download() {
    let dir = tempdir().unwrap();
    let data = common::payload(8_192);
    let (url, server) = common::serve_once("200 OK", common::gzip(&data), true);
    let config = ShellConfig {
        download_url: url,
        download_path: dir.path().join("avg.tar.gz"),
        extract_path: dir.path().join("avg.tar"),
        use_system_proxy: false,
        ..ShellConfig::default()
    };

    // Utility → Download, Utility → Install, an unmapped key, then Exit
    let mut app = App::new(
        ScriptedSurface::new([
            Confirm, Confirm, Confirm, MoveDown, Confirm, Other, MoveUp, Confirm,
        ]),
        config,
    );
    app.run().unwrap();
    server.join().unwrap();
    let rows = app.surface().snapshot(80, 24).unwrap();

    // status text row sits directly below the meter's bottom border
    assert_eq!(find_row(&rows, "Invalid character"), Some(20));
    assert_eq!(find_row(&rows, "100% Complete"), Some(16));
    assert_eq!(find_row(&rows, "Done!"), Some(18));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let mut surface = ScriptedSurface::default();
    let menu = silverline::MAIN_MENU.menu().unwrap();
    surface
        .draw_menu(silverline::MenuSlot::Primary, &menu)
        .unwrap();
    for (w, h) in [(1, 1), (10, 3), (20, 12), (45, 6)] {
        let rows = surface.snapshot(w, h).unwrap();
        assert_eq!(rows.len(), h as usize);
    }
}
