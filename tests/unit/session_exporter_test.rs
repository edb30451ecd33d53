//! Unit tests for the Session Exporter.
//!
//! Mode filtering, internal-page exclusion, window numbering and summaries.

use tabstash::host::memory::MemoryHost;
use tabstash::managers::session_exporter::{SessionExporter, SessionExporterTrait};
use tabstash::types::browser::{BrowserTab, BrowserWindow, WindowState};
use tabstash::types::errors::ExportError;
use tabstash::types::settings::Dialect;

fn window(id: i64, incognito: bool, urls: &[&str]) -> BrowserWindow {
    BrowserWindow {
        id,
        left: Some(0),
        top: Some(0),
        width: Some(800),
        height: Some(600),
        state: WindowState::Normal,
        focused: false,
        incognito,
        tabs: urls
            .iter()
            .enumerate()
            .map(|(i, url)| BrowserTab {
                id: id * 100 + i as i64,
                window_id: id,
                url: url.to_string(),
                title: String::new(),
                pinned: false,
                active: i == 0,
            })
            .collect(),
    }
}

#[test]
fn test_export_keeps_only_current_mode() {
    let windows = vec![
        window(1, false, &["https://a.com"]),
        window(2, true, &["https://secret.com"]),
        window(3, false, &["https://b.com", "https://c.com"]),
    ];

    let outcome = SessionExporter::default()
        .export_windows(false, &windows, Dialect::Marker)
        .unwrap();

    assert_eq!(outcome.window_count, 2);
    assert_eq!(outcome.tab_count, 3);
    assert!(!outcome.text.contains("secret"));
    assert_eq!(outcome.summary(), "Saved 2 regular window(s) with 3 tab(s)");
}

#[test]
fn test_private_export_summary() {
    let windows = vec![
        window(1, false, &["https://a.com"]),
        window(2, true, &["https://secret.com"]),
    ];

    let outcome = SessionExporter::default()
        .export_windows(true, &windows, Dialect::Marker)
        .unwrap();

    assert!(outcome.text.contains("https://secret.com"));
    assert!(!outcome.text.contains("https://a.com"));
    assert_eq!(outcome.summary(), "Saved 1 private window(s) with 1 tab(s)");
}

#[test]
fn test_internal_pages_are_dropped() {
    let windows = vec![window(
        1,
        false,
        &["chrome://settings", "https://a.com", "chrome-extension://abc/popup.html"],
    )];

    let outcome = SessionExporter::default()
        .export_windows(false, &windows, Dialect::Marker)
        .unwrap();

    assert_eq!(outcome.tab_count, 1);
    assert!(!outcome.text.contains("chrome"));
}

#[test]
fn test_windows_left_empty_are_skipped_and_numbering_stays_dense() {
    let windows = vec![
        window(1, false, &["https://a.com"]),
        window(2, false, &["chrome://newtab"]),
        window(3, false, &["https://b.com"]),
    ];

    let outcome = SessionExporter::default()
        .export_windows(false, &windows, Dialect::Marker)
        .unwrap();

    assert_eq!(outcome.window_count, 2);
    assert!(outcome.text.contains("/* Window 1 |"));
    assert!(outcome.text.contains("/* Window 2 |"));
    assert!(!outcome.text.contains("/* Window 3 |"));
    assert!(outcome.text.contains("https://b.com"));
}

#[test]
fn test_custom_exclusions() {
    let windows = vec![window(1, false, &["about:blank", "chrome://settings", "https://a.com"])];
    let exporter = SessionExporter::new(vec!["about:".to_string()]);

    let selected = exporter.select_windows(false, &windows);
    let urls: Vec<&str> = selected[0].tabs.iter().map(|t| t.url.as_str()).collect();
    assert_eq!(urls, vec!["chrome://settings", "https://a.com"]);
}

#[test]
fn test_nothing_to_export() {
    let outcome = SessionExporter::default()
        .export_windows(false, &[window(1, true, &["https://a.com"])], Dialect::Marker)
        .unwrap();

    assert_eq!(outcome.text, "");
    assert_eq!(outcome.summary(), "Saved 0 regular window(s) with 0 tab(s)");
}

#[test]
fn test_record_export() {
    let outcome = SessionExporter::default()
        .export_windows(false, &[window(1, false, &["https://a.com"])], Dialect::Record)
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&outcome.text).unwrap();
    assert_eq!(value["windows"].as_array().unwrap().len(), 1);
    assert_eq!(outcome.dialect, Dialect::Record);
}

#[test]
fn test_capture_uses_current_window_mode() {
    let mut host = MemoryHost::from_windows(vec![
        window(1, true, &["https://private.com"]),
        window(2, false, &["https://public.com"]),
    ]);

    let outcome = SessionExporter::default()
        .capture(&mut host, Dialect::Marker)
        .unwrap();

    assert!(outcome.incognito);
    assert_eq!(
        outcome.text,
        "/* Window 1 |left:0|top:0|width:800|height:600|state:normal| */\nhttps://private.com [active]"
    );
}

#[test]
fn test_capture_without_current_window_fails() {
    let mut host = MemoryHost::from_windows(Vec::new());
    let err = SessionExporter::default()
        .capture(&mut host, Dialect::Marker)
        .unwrap_err();
    assert!(matches!(err, ExportError::Host(_)));
}
