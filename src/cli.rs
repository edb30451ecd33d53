use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

use crate::app::App;
use crate::host::memory::MemoryHost;
use crate::host::BrowserHost;
use crate::managers::session_exporter::{SessionExporter, SessionExporterTrait};
use crate::managers::session_restorer::{SessionRestorer, SessionRestorerTrait};
use crate::managers::snapshot_manager::SnapshotManagerTrait;
use crate::services::session_format::format_for;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::browser::BrowserWindow;
use crate::types::settings::Dialect;

#[derive(Parser, Debug)]
#[command(name = "tabstash")]
#[command(about = "Save browser windows and tabs as editable text, and restore them")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Settings file to use instead of the platform default
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Snapshot database to use instead of the configured one
    #[arg(long, global = true, value_name = "FILE")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse session text and print the window groups as JSON
    Parse {
        /// Input file; stdin when absent or `-`
        file: Option<PathBuf>,
        /// Text dialect (marker or record); defaults to the configured one
        #[arg(short, long)]
        dialect: Option<Dialect>,
    },
    /// Restore session text into a simulated browser and print the result
    Preview {
        file: Option<PathBuf>,
        #[arg(short, long)]
        dialect: Option<Dialect>,
        /// Restore as if acting from a private window
        #[arg(long)]
        private: bool,
    },
    /// Write session text for a JSON list of browser windows
    Export {
        /// JSON array of windows as reported by the browser; stdin when absent
        windows: Option<PathBuf>,
        #[arg(short, long)]
        dialect: Option<Dialect>,
        /// Export private windows instead of regular ones
        #[arg(long)]
        private: bool,
    },
    /// Manage saved snapshots
    #[command(subcommand)]
    Snapshot(SnapshotCommand),
    /// Inspect or change settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum SnapshotCommand {
    /// Store session text
    Save {
        file: Option<PathBuf>,
        #[arg(short, long, default_value = "")]
        label: String,
        #[arg(short, long)]
        dialect: Option<Dialect>,
    },
    /// List snapshots, newest first
    List,
    /// Print a snapshot's text
    Show { id: String },
    /// Print the newest snapshot's text
    Latest,
    /// Remove a snapshot
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the settings file location
    Path,
    /// Print the effective settings
    Show,
    /// Set a value by dot-notation key, e.g. `general.dialect record`
    Set {
        key: String,
        /// JSON value; plain words are taken as strings
        value: String,
    },
}

/// Reads a file, or stdin for `None` and `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parses a `config set` value: JSON when it parses, a plain string otherwise.
pub fn parse_config_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Config(cmd) => run_config(cli.config, cmd),
        Command::Parse { file, dialect } => {
            let text = read_input(file.as_deref())?;
            let dialect = dialect.unwrap_or(load_settings(cli.config)?.get_settings().general.dialect);
            let groups = format_for(dialect).decode(&text)?;
            print_json(&groups)
        }
        Command::Preview {
            file,
            dialect,
            private,
        } => {
            let text = read_input(file.as_deref())?;
            let engine = load_settings(cli.config)?;
            let dialect = dialect.unwrap_or(engine.get_settings().general.dialect);

            let mut host = MemoryHost::with_mode(private);
            let outcome = SessionRestorer::new().restore(&mut host, &text, dialect)?;
            info!("{}", outcome.summary());
            print_json(&json!({"summary": outcome.summary(), "windows": host.all_windows()?}))
        }
        Command::Export {
            windows,
            dialect,
            private,
        } => {
            let raw = read_input(windows.as_deref())?;
            let windows: Vec<BrowserWindow> =
                serde_json::from_str(&raw).context("parsing browser windows")?;
            let engine = load_settings(cli.config)?;
            let dialect = dialect.unwrap_or(engine.get_settings().general.dialect);
            let exporter =
                SessionExporter::new(engine.get_settings().export.excluded_url_prefixes.clone());

            let outcome = exporter.export_windows(private, &windows, dialect)?;
            eprintln!("{}", outcome.summary());
            println!("{}", outcome.text);
            Ok(())
        }
        Command::Snapshot(cmd) => {
            let app = App::new(cli.config, cli.db)?;
            run_snapshot(&app, cmd)
        }
    }
}

fn load_settings(path: Option<PathBuf>) -> Result<SettingsEngine> {
    let mut engine = SettingsEngine::new(path);
    engine.load()?;
    Ok(engine)
}

fn run_snapshot(app: &App, cmd: SnapshotCommand) -> Result<()> {
    let store = &app.snapshot_manager;
    match cmd {
        SnapshotCommand::Save {
            file,
            label,
            dialect,
        } => {
            let text = read_input(file.as_deref())?;
            let snapshot = store.save(&label, app.dialect(dialect), &text)?;
            println!("{}", snapshot.id);
            eprintln!(
                "Saved snapshot with {} window(s) and {} tab(s)",
                snapshot.window_count, snapshot.tab_count
            );
        }
        SnapshotCommand::List => {
            for s in store.list()? {
                println!(
                    "{}\t{}\t{}\t{}w/{}t\t{}",
                    s.id, s.created_at, s.dialect, s.window_count, s.tab_count, s.label
                );
            }
        }
        SnapshotCommand::Show { id } => println!("{}", store.get(&id)?.content),
        SnapshotCommand::Latest => match store.latest()? {
            Some(s) => println!("{}", s.content),
            None => eprintln!("No snapshots saved"),
        },
        SnapshotCommand::Delete { id } => store.delete(&id)?,
    }
    Ok(())
}

fn run_config(path: Option<PathBuf>, cmd: ConfigCommand) -> Result<()> {
    let mut engine = load_settings(path)?;
    match cmd {
        ConfigCommand::Path => println!("{}", engine.get_config_path().display()),
        ConfigCommand::Show => print_json(engine.get_settings())?,
        ConfigCommand::Set { key, value } => engine.set_value(&key, parse_config_value(&value))?,
    }
    Ok(())
}
