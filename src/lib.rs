//! tabstash: save browser windows and tabs as editable text, and restore them.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod cli;
pub mod database;
pub mod host;
pub mod logging;
pub mod managers;
pub mod rpc_handler;
pub mod services;
pub mod types;
