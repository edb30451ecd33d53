// tabstash state managers
// Managers run the stateful workflows: saving windows, restoring them, and keeping snapshots.

pub mod session_exporter;
pub mod session_restorer;
pub mod snapshot_manager;
