//! tabstash RPC Server — JSON-RPC over stdin/stdout for a browser extension bridge.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"session.parse", "params":{"text":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use tabstash::app::App;
use tabstash::logging::init_logging;
use tabstash::rpc_handler::handle_method;

fn write_line(out: &mut impl Write, value: &Value) -> io::Result<()> {
    writeln!(out, "{}", value)?;
    out.flush()
}

fn run() -> anyhow::Result<()> {
    // TABSTASH_DATA_DIR pins the database next to the extension host; otherwise settings decide.
    let db_path = std::env::var_os("TABSTASH_DATA_DIR").map(|dir| PathBuf::from(dir).join("tabstash.db"));
    let settings_path = std::env::var_os("TABSTASH_CONFIG").map(PathBuf::from);
    let app = Mutex::new(App::new(settings_path, db_path).context("failed to initialize tabstash")?);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_line(&mut out, &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}))?;
    info!("rpc server ready");

    for line in io::stdin().lock().lines() {
        let line = line.context("reading request")?;
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "unparseable request");
                write_line(&mut out, &json!({"id": null, "error": format!("parse error: {}", e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        write_line(&mut out, &response)?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}

fn main() {
    init_logging(std::env::var("TABSTASH_VERBOSE").map_or(0, |v| v.parse().unwrap_or(1)));

    if let Err(err) = run() {
        error!(error = %format!("{:#}", err), "rpc server failed");
        std::process::exit(1);
    }
}
