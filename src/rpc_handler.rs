//! RPC method handler for the tabstash JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested. `handle_method`
//! dispatches a method name and its params to the app's workflows.

use std::sync::Mutex;

use serde_json::{json, Value};
use tracing::debug;

use crate::app::App;
use crate::host::memory::MemoryHost;
use crate::host::BrowserHost;
use crate::managers::session_exporter::SessionExporterTrait;
use crate::managers::session_restorer::SessionRestorerTrait;
use crate::managers::snapshot_manager::SnapshotManagerTrait;
use crate::services::session_format::format_for;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::browser::BrowserWindow;
use crate::types::settings::Dialect;

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn dialect_param(params: &Value) -> Result<Option<Dialect>, String> {
    params
        .get("dialect")
        .and_then(|v| v.as_str())
        .map(str::parse::<Dialect>)
        .transpose()
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    debug!(method, "rpc call");
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Session text ───
        "session.parse" => {
            let text = str_param(params, "text")?;
            let requested = dialect_param(params)?;
            let dialect = app.lock().map_err(|e| e.to_string())?.dialect(requested);
            let groups = format_for(dialect).decode(text).map_err(|e| e.to_string())?;
            Ok(json!({"dialect": dialect, "groups": groups}))
        }
        "session.export" => {
            let windows_val = params.get("windows").cloned().ok_or("missing windows")?;
            let windows: Vec<BrowserWindow> =
                serde_json::from_value(windows_val).map_err(|e| format!("invalid windows: {}", e))?;
            let incognito = match params.get("incognito").and_then(|v| v.as_bool()) {
                Some(flag) => flag,
                None => {
                    let current_id = params.get("current_window_id").and_then(|v| v.as_i64());
                    windows
                        .iter()
                        .find(|w| Some(w.id) == current_id)
                        .or_else(|| windows.first())
                        .is_some_and(|w| w.incognito)
                }
            };
            let requested = dialect_param(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let outcome = a
                .exporter()
                .export_windows(incognito, &windows, a.dialect(requested))
                .map_err(|e| e.to_string())?;
            Ok(json!({
                "text": outcome.text,
                "dialect": outcome.dialect,
                "window_count": outcome.window_count,
                "tab_count": outcome.tab_count,
                "summary": outcome.summary(),
            }))
        }
        "session.preview" => {
            let text = str_param(params, "text")?;
            let requested = dialect_param(params)?;
            let incognito = params.get("incognito").and_then(|v| v.as_bool()).unwrap_or(false);
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut host = MemoryHost::with_mode(incognito);
            let outcome = a
                .restorer
                .restore(&mut host, text, a.dialect(requested))
                .map_err(|e| e.to_string())?;
            let windows = host.all_windows().map_err(|e| e.to_string())?;
            Ok(json!({"summary": outcome.summary(), "outcome": outcome, "windows": windows}))
        }

        // ─── Snapshots ───
        "snapshot.save" => {
            let text = str_param(params, "text")?;
            let label = params.get("label").and_then(|v| v.as_str()).unwrap_or("");
            let requested = dialect_param(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let snapshot = a
                .snapshot_manager
                .save(label, a.dialect(requested), text)
                .map_err(|e| e.to_string())?;
            serde_json::to_value(snapshot).map_err(|e| e.to_string())
        }
        "snapshot.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let snapshots = a.snapshot_manager.list().map_err(|e| e.to_string())?;
            let items: Vec<Value> = snapshots
                .iter()
                .map(|s| {
                    json!({
                        "id": s.id,
                        "label": s.label,
                        "dialect": s.dialect,
                        "window_count": s.window_count,
                        "tab_count": s.tab_count,
                        "created_at": s.created_at,
                    })
                })
                .collect();
            Ok(json!({"items": items}))
        }
        "snapshot.get" => {
            let id = str_param(params, "id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let snapshot = a.snapshot_manager.get(id).map_err(|e| e.to_string())?;
            serde_json::to_value(snapshot).map_err(|e| e.to_string())
        }
        "snapshot.latest" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let snapshot = a.snapshot_manager.latest().map_err(|e| e.to_string())?;
            serde_json::to_value(snapshot).map_err(|e| e.to_string())
        }
        "snapshot.delete" => {
            let id = str_param(params, "id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            a.snapshot_manager.delete(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
