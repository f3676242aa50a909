//! Controller scenarios driven by a scripted input queue
//!
//! Each test feeds key presses to [`App::run`] through a [`ScriptedSurface`]
//! and checks what the console would have shown.

mod common;

use std::fs;

use silverline::MenuInput::{Confirm, MoveDown, MoveUp, Other};
use silverline::{App, MenuInput, MenuSlot, ScriptedSurface, ShellConfig, ShellError, StatusLevel};
use tempfile::{TempDir, tempdir};

fn config_in(dir: &TempDir) -> ShellConfig {
    ShellConfig {
        download_path: dir.path().join("avg.tar.gz"),
        extract_path: dir.path().join("avg.tar"),
        use_system_proxy: false,
        ..ShellConfig::default()
    }
}

fn run(config: ShellConfig, inputs: Vec<MenuInput>) -> ScriptedSurface {
    let mut app = App::new(ScriptedSurface::new(inputs), config);
    app.run().expect("console run");
    app.into_surface()
}

/// Main menu → Utility, then Utility entries, then Exit from the main menu
fn utility_script(utility: &[MenuInput]) -> Vec<MenuInput> {
    let mut script = vec![Confirm];
    script.extend_from_slice(utility);
    script.extend([MoveUp, Confirm]);
    script
}

#[test]
fn test_back_up_is_a_noop_then_exit() {
    let dir = tempdir().unwrap();
    let surface = run(
        config_in(&dir),
        vec![MoveDown, MoveDown, Confirm, MoveUp, Confirm],
    );

    assert_eq!(surface.remaining_inputs(), 0);
    assert!(surface.closed_menus().is_empty());
    assert!(surface.model().menu(MenuSlot::Secondary).is_none());
    assert!(
        surface
            .statuses()
            .iter()
            .any(|s| s.level == StatusLevel::Warning && s.text.contains("Back Up"))
    );
    // highlight resets to the first entry every time the main menu is shown
    let primary: Vec<usize> = surface
        .menu_draws()
        .iter()
        .filter(|d| d.slot == MenuSlot::Primary)
        .map(|d| d.highlighted)
        .collect();
    assert_eq!(primary, [1, 2, 3, 3, 1, 5, 5]);
}

#[test]
fn test_invalid_key_reports_and_keeps_highlight() {
    let dir = tempdir().unwrap();
    let surface = run(config_in(&dir), vec![MoveDown, Other, MoveUp, MoveUp, Confirm]);

    assert!(
        surface
            .statuses()
            .iter()
            .any(|s| s.level == StatusLevel::Error && s.text == "Invalid character")
    );
    let last = surface.menu_draws().last().unwrap();
    assert_eq!((last.title.as_str(), last.highlighted), ("Main Menu", 5));
}

#[test]
fn test_utility_return_closes_sub_menu() {
    let dir = tempdir().unwrap();
    let surface = run(config_in(&dir), utility_script(&[MoveUp, Confirm]));

    assert_eq!(surface.closed_menus(), &[MenuSlot::Secondary]);
    assert!(surface.model().menu(MenuSlot::Secondary).is_none());
    assert!(surface.model().menu(MenuSlot::Primary).is_some());
}

#[test]
fn test_install_inflates_downloaded_archive() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir);
    let data = common::payload(300_000);
    fs::write(&config.download_path, common::gzip(&data)).unwrap();

    let surface = run(config.clone(), utility_script(&[MoveDown, Confirm]));

    assert_eq!(fs::read(&config.extract_path).unwrap(), data);
    let statuses: Vec<&str> = surface.statuses().iter().map(|s| s.text.as_str()).collect();
    assert!(statuses.contains(&"Decompressing..."));
    assert!(statuses.iter().any(|s| s.starts_with("Install complete: 300000 bytes")));
    // Install closes the sub-menu and hands back to the main menu
    assert_eq!(surface.closed_menus(), &[MenuSlot::Secondary]);
    assert_eq!(surface.remaining_inputs(), 0);
}

#[test]
fn test_install_without_archive_reports_open_error() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir);

    let surface = run(config.clone(), utility_script(&[MoveDown, Confirm]));

    let error = surface
        .statuses()
        .iter()
        .find(|s| s.level == StatusLevel::Error)
        .expect("error status");
    assert!(error.text.starts_with("File open error"), "{}", error.text);
    assert!(!config.extract_path.exists());
}

#[test]
fn test_install_corrupt_archive_reports_invalid_data() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir);
    fs::write(&config.download_path, b"definitely not deflate data").unwrap();

    let surface = run(config.clone(), utility_script(&[MoveDown, Confirm]));

    let error = surface
        .statuses()
        .iter()
        .find(|s| s.level == StatusLevel::Error)
        .expect("error status");
    assert!(error.text.starts_with("Invalid archive"), "{}", error.text);
    assert!(!config.extract_path.exists());
}

#[test]
fn test_download_then_install() {
    let dir = tempdir().unwrap();
    let data = common::payload(200_000);
    let archive = common::gzip(&data);
    let (url, server) = common::serve_once("200 OK", archive.clone(), true);
    let config = ShellConfig {
        download_url: url,
        ..config_in(&dir)
    };

    // Utility → Download, Utility → Install, Exit
    let surface = run(
        config.clone(),
        vec![Confirm, Confirm, Confirm, MoveDown, Confirm, MoveUp, Confirm],
    );
    server.join().unwrap();
    assert_eq!(surface.remaining_inputs(), 0);
    assert_eq!(surface.closed_menus(), &[MenuSlot::Secondary, MenuSlot::Secondary]);

    assert_eq!(fs::read(&config.download_path).unwrap(), archive);
    assert_eq!(fs::read(&config.extract_path).unwrap(), data);

    let frames = surface.progress_frames();
    assert!(!frames.is_empty());
    assert_eq!(frames.iter().filter(|f| f.done).count(), 1);
    assert_eq!(frames.last().unwrap().percent, Some(100));
    assert!(surface.model().progress_done);
    assert!(surface.statuses().iter().all(|s| s.level != StatusLevel::Error));
}

#[test]
fn test_download_http_error_reports_status_code() {
    let dir = tempdir().unwrap();
    let (url, server) = common::serve_once("404 Not Found", b"missing".to_vec(), true);
    let config = ShellConfig {
        download_url: url,
        ..config_in(&dir)
    };

    let surface = run(config.clone(), utility_script(&[Confirm]));
    server.join().unwrap();

    let error = surface
        .statuses()
        .iter()
        .find(|s| s.level == StatusLevel::Error)
        .expect("error status");
    assert_eq!(error.text, "Error code: 404");
    assert!(!config.download_path.exists());
    assert!(surface.progress_frames().is_empty());
}

#[test]
fn test_download_returns_to_main_menu() {
    let dir = tempdir().unwrap();
    let (url, server) = common::serve_once("200 OK", common::payload(1_024), true);
    let config = ShellConfig {
        download_url: url,
        ..config_in(&dir)
    };

    let surface = run(config, utility_script(&[Confirm]));
    server.join().unwrap();

    assert_eq!(surface.remaining_inputs(), 0);
    assert_eq!(surface.closed_menus(), &[MenuSlot::Secondary]);
    // the draw after the download is a fresh main menu, not the sub-menu
    let after: Vec<(&str, usize)> = surface
        .menu_draws()
        .iter()
        .skip_while(|d| d.title != "Utility Menu")
        .skip_while(|d| d.title == "Utility Menu")
        .map(|d| (d.title.as_str(), d.highlighted))
        .collect();
    assert_eq!(after.first(), Some(&("Main Menu", 1)));
}

#[test]
fn test_script_running_out_surfaces_terminal_error() {
    let dir = tempdir().unwrap();
    let mut app = App::new(ScriptedSurface::new([Confirm, MoveDown]), config_in(&dir));
    assert!(matches!(app.run(), Err(ShellError::Terminal(_))));
}
