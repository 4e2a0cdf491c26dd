pub mod cli;
pub mod common;
pub mod runner;
pub mod wrapper;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtilityError {
    /// The wrapped executable exited with a non-zero code. The display text is
    /// the full stderr stream captured from the child process.
    #[error("{0}")]
    ExternalTool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, UtilityError>;

// Re-export key types for convenience
pub use common::ConnectionInfo;
pub use runner::{ProcessExecutor, ProcessRunner, RunOutput, SystemExecutor};
pub use wrapper::{
    DumpOptions, FileFormat, PgCtrl, PgDump, PgRestore, RestoreOptions, ServerReadiness,
    ServiceStartType, ShutdownMode,
};
