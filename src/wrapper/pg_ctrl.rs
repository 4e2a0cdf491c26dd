use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::runner::{ProcessExecutor, ProcessRunner};
use crate::Result;

const PG_CTRL: &str = "pg_ctrl";

/// How the server is asked to shut down (`-m`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ShutdownMode {
    /// Wait for all clients to disconnect.
    #[default]
    Smart,
    /// Disconnect clients immediately, clean shutdown.
    Fast,
    /// Abort without a clean shutdown; recovery runs on next start.
    Immediate,
}

impl ShutdownMode {
    fn as_flag(&self) -> &'static str {
        match self {
            ShutdownMode::Smart => "s",
            ShutdownMode::Fast => "f",
            ShutdownMode::Immediate => "i",
        }
    }
}

/// Start type for a registered Windows service (`-S`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ServiceStartType {
    #[default]
    Auto,
    Demand,
}

impl ServiceStartType {
    fn as_flag(&self) -> &'static str {
        match self {
            ServiceStartType::Auto => "a",
            ServiceStartType::Demand => "d",
        }
    }
}

/// Exit-code space of the status subcommand.
///
/// Known gap: [`PgCtrl::status`] collapses every non-zero exit into a generic
/// failure instead of surfacing these four outcomes; the mapping is kept here
/// for callers that inspect exit codes themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerReadiness {
    /// Accepting connections normally.
    Ready,
    /// Rejecting connections, for example during startup.
    Rejecting,
    /// No response to the connection attempt.
    NoResponse,
    /// No attempt was made, for example due to invalid parameters.
    NoAttempt,
}

impl ServerReadiness {
    pub fn from_exit_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ServerReadiness::Ready),
            1 => Some(ServerReadiness::Rejecting),
            2 => Some(ServerReadiness::NoResponse),
            3 => Some(ServerReadiness::NoAttempt),
            _ => None,
        }
    }
}

/// Wrapper for the cluster-control utility.
///
/// Every method maps to one subcommand invocation; semantics, idempotency and
/// error text all belong to the wrapped tool.
pub struct PgCtrl {
    runner: ProcessRunner,
}

impl PgCtrl {
    /// Create a wrapper for the pg_ctrl binary found in `executable_dir`.
    pub fn new(executable_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner: ProcessRunner::new(executable_dir, PG_CTRL),
        }
    }

    pub fn with_executor(
        executable_dir: impl Into<PathBuf>,
        executor: Box<dyn ProcessExecutor + Send + Sync>,
    ) -> Self {
        Self {
            runner: ProcessRunner::with_executor(executable_dir, PG_CTRL, executor),
        }
    }

    /// Create a new database cluster in `data_directory` (invokes initdb).
    /// `initdb_flags` are passed through verbatim via `-o`.
    pub fn initialize(&self, data_directory: &str, initdb_flags: Option<&str>) -> Result<()> {
        let mut arguments = format!(" init -D {data_directory}");
        if let Some(flags) = initdb_flags {
            arguments.push_str(&format!(" -o '{flags}'"));
        }
        self.runner.execute(&arguments, None)
    }

    /// Start the server instance, optionally appending its log to `log_file`.
    pub fn start(&self, data_directory: &str, log_file: Option<&str>) -> Result<()> {
        let mut arguments = format!(" start -D {data_directory}");
        if let Some(file) = log_file {
            arguments.push_str(&format!(" -l '{file}'"));
        }
        self.runner.execute(&arguments, None)
    }

    /// Shut down the server running in `data_directory`.
    pub fn stop(&self, data_directory: &str, mode: ShutdownMode) -> Result<()> {
        let arguments = format!(" stop -D {data_directory} -m {}", mode.as_flag());
        self.runner.execute(&arguments, None)
    }

    /// Stop and start the server in one invocation.
    pub fn restart(&self, data_directory: &str, mode: ShutdownMode) -> Result<()> {
        let arguments = format!(" restart -D {data_directory} -m {}", mode.as_flag());
        self.runner.execute(&arguments, None)
    }

    /// Signal the server to reread its configuration files.
    pub fn reload(&self, data_directory: &str) -> Result<()> {
        self.runner
            .execute(&format!(" reload -D {data_directory}"), None)
    }

    /// Check whether a server is running in `data_directory`. Succeeds only
    /// when the tool exits 0 (see [`ServerReadiness`]).
    pub fn status(&self, data_directory: &str) -> Result<()> {
        self.runner
            .execute(&format!(" status -D {data_directory}"), None)
    }

    /// Command a standby server to exit recovery and begin read-write
    /// operations.
    pub fn promote(&self, data_directory: &str) -> Result<()> {
        self.runner
            .execute(&format!(" promote -D {data_directory}"), None)
    }

    /// Send a signal to the given server process.
    pub fn kill(&self, process_id: u32) -> Result<()> {
        self.runner.execute(&format!(" kill {process_id}"), None)
    }

    /// Register the server as a Windows system service.
    pub fn register(
        &self,
        service_name: &str,
        user_name: &str,
        password: &str,
        data_directory: &str,
        start_type: ServiceStartType,
    ) -> Result<()> {
        let arguments = format!(
            " register -N {service_name} -U {user_name} -P {password} -D {data_directory} -S {}",
            start_type.as_flag()
        );
        self.runner.execute(&arguments, None)
    }

    /// Remove a previously registered Windows system service.
    pub fn unregister(&self, service_name: &str) -> Result<()> {
        self.runner
            .execute(&format!(" unregister -N {service_name}"), None)
    }
}
