//! tabstash database layer.
//!
//! SQLite connection management and schema migrations for saved snapshots.
//!
//! ```no_run
//! use tabstash::database::Database;
//!
//! let db = Database::open("tabstash.db").expect("failed to open database");
//! let in_memory = Database::open_in_memory().expect("failed to open in-memory database");
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
