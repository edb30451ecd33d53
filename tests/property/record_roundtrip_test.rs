//! Property-based tests for the record dialect.
//!
//! A `SessionRecord` survives JSON serialization unchanged, and decoding an
//! encoded record keeps every window's tabs and focus flag.

use proptest::prelude::*;
use tabstash::services::session_format::{RecordFormat, SessionFormat};
use tabstash::types::browser::{BrowserTab, BrowserWindow, WindowState};
use tabstash::types::record::{SessionRecord, TabRecord, WindowRecord, RECORD_VERSION};

fn arb_state() -> impl Strategy<Value = WindowState> {
    prop_oneof![
        Just(WindowState::Normal),
        Just(WindowState::Minimized),
        Just(WindowState::Maximized),
        Just(WindowState::Fullscreen),
        Just(WindowState::LockedFullscreen),
    ]
}

fn arb_tab_record() -> impl Strategy<Value = TabRecord> {
    ("\\PC{1,40}", any::<bool>(), any::<bool>())
        .prop_map(|(url, pinned, active)| TabRecord { url, pinned, active })
}

fn arb_window_record() -> impl Strategy<Value = WindowRecord> {
    (
        proptest::option::of(any::<i32>()),
        proptest::option::of(any::<i32>()),
        proptest::option::of(any::<i32>()),
        proptest::option::of(any::<i32>()),
        arb_state(),
        any::<bool>(),
        proptest::collection::vec(arb_tab_record(), 0..5),
    )
        .prop_map(|(left, top, width, height, state, focused, tabs)| WindowRecord {
            left,
            top,
            width,
            height,
            state,
            focused,
            tabs,
        })
}

proptest! {
    #[test]
    fn prop_record_json_roundtrip(windows in proptest::collection::vec(arb_window_record(), 0..5)) {
        let record = SessionRecord { version: RECORD_VERSION, windows };
        let json = serde_json::to_string(&record).unwrap();
        let back: SessionRecord = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, record);
    }

    #[test]
    fn prop_record_decode_keeps_tabs_and_focus(
        windows in proptest::collection::vec(arb_window_record(), 0..5)
    ) {
        let live: Vec<BrowserWindow> = windows
            .iter()
            .enumerate()
            .map(|(i, w)| BrowserWindow {
                id: i as i64,
                left: w.left,
                top: w.top,
                width: w.width,
                height: w.height,
                state: w.state,
                focused: w.focused,
                incognito: false,
                tabs: w
                    .tabs
                    .iter()
                    .map(|t| BrowserTab {
                        id: 0,
                        window_id: i as i64,
                        url: t.url.clone(),
                        title: String::new(),
                        pinned: t.pinned,
                        active: t.active,
                    })
                    .collect(),
            })
            .collect();

        let text = RecordFormat.encode(&live).unwrap();
        let groups = RecordFormat.decode(&text).unwrap();

        let kept: Vec<&WindowRecord> = windows.iter().filter(|w| !w.tabs.is_empty()).collect();
        prop_assert_eq!(groups.len(), kept.len());
        for (group, window) in groups.iter().zip(kept) {
            let focused = window.focused.to_string();
            prop_assert_eq!(group.property("focused"), Some(focused.as_str()));
            let urls: Vec<&str> = group.entries.iter().map(|e| e.url.as_str()).collect();
            let expected: Vec<&str> = window.tabs.iter().map(|t| t.url.as_str()).collect();
            prop_assert_eq!(urls, expected);
        }
    }
}
