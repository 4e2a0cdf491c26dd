use log::{debug, error};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::{Result, UtilityError};

/// Environment variable the PostgreSQL utilities read the password from.
pub const PASSWORD_ENV: &str = "PGPASSWORD";

/// Outcome of one child-process run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    /// Full stderr stream of the child, lossily decoded.
    pub stderr: String,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability to run an external executable to completion.
///
/// The real implementation is [`SystemExecutor`]; tests substitute their own
/// so the wrappers can be exercised without the PostgreSQL binaries installed.
pub trait ProcessExecutor {
    fn run(
        &self,
        working_dir: &Path,
        executable: &Path,
        args: &[String],
        env: &[(String, String)],
    ) -> std::io::Result<RunOutput>;
}

/// Spawns the executable as an OS child process and blocks until it exits.
pub struct SystemExecutor;

impl ProcessExecutor for SystemExecutor {
    fn run(
        &self,
        working_dir: &Path,
        executable: &Path,
        args: &[String],
        env: &[(String, String)],
    ) -> std::io::Result<RunOutput> {
        let mut cmd = Command::new(executable);
        if !working_dir.as_os_str().is_empty() {
            cmd.current_dir(working_dir);
        }
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        for (key, value) in env {
            cmd.env(key, value);
        }

        let mut child = cmd.spawn()?;

        // Drain stderr to EOF before waiting, otherwise a chatty child can
        // fill the pipe buffer and deadlock against our wait.
        let mut stderr_bytes = Vec::new();
        if let Some(mut pipe) = child.stderr.take() {
            pipe.read_to_end(&mut stderr_bytes)?;
        }
        let status = child.wait()?;

        Ok(RunOutput {
            code: status.code(),
            stderr: String::from_utf8_lossy(&stderr_bytes).to_string(),
        })
    }
}

/// Runs one of the PostgreSQL command-line utilities and maps its exit status
/// onto a [`Result`].
///
/// Blocks the calling thread until the child exits; no timeout is enforced.
pub struct ProcessRunner {
    executable_dir: PathBuf,
    executable_name: String,
    executor: Box<dyn ProcessExecutor + Send + Sync>,
}

impl ProcessRunner {
    pub fn new(executable_dir: impl Into<PathBuf>, executable_name: impl Into<String>) -> Self {
        Self::with_executor(executable_dir, executable_name, Box::new(SystemExecutor))
    }

    pub fn with_executor(
        executable_dir: impl Into<PathBuf>,
        executable_name: impl Into<String>,
        executor: Box<dyn ProcessExecutor + Send + Sync>,
    ) -> Self {
        Self {
            executable_dir: executable_dir.into(),
            executable_name: executable_name.into(),
            executor,
        }
    }

    /// Path of the wrapped executable. With an empty directory this is the
    /// bare name, which the OS resolves through PATH.
    pub fn executable(&self) -> PathBuf {
        self.executable_dir.join(&self.executable_name)
    }

    /// Run the executable with a rendered argument string.
    ///
    /// If `password` is given it is injected into the child environment as
    /// `PGPASSWORD`; it never appears in the argument vector. A non-zero exit
    /// (or signal death) yields [`UtilityError::ExternalTool`] carrying the
    /// captured stderr text.
    pub fn execute(&self, arguments: &str, password: Option<&str>) -> Result<()> {
        let args = split_arguments(arguments);
        let env: Vec<(String, String)> = password
            .map(|p| vec![(PASSWORD_ENV.to_string(), p.to_string())])
            .unwrap_or_default();

        let executable = self.executable();
        debug!("running {executable:?} with arguments {args:?}");

        let output = self
            .executor
            .run(&self.executable_dir, &executable, &args, &env)?;

        if !output.success() {
            error!("{} failed: {}", self.executable_name, output.stderr);
            return Err(UtilityError::ExternalTool(output.stderr));
        }

        debug!("{} completed successfully", self.executable_name);
        Ok(())
    }
}

/// Split a rendered argument string into discrete arguments.
///
/// The argument builders produce a single shell-style string (values that may
/// contain spaces are quoted); `std::process::Command` wants discrete args, so
/// whitespace separates tokens and single or double quotes group and are
/// stripped.
pub fn split_arguments(arguments: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in arguments.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        args.push(current);
    }
    args
}
