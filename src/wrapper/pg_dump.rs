use log::info;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::common::ConnectionInfo;
use crate::runner::{ProcessExecutor, ProcessRunner};
use crate::Result;

const PG_DUMP: &str = "pg_dump";

/// Archive format produced by pg_dump (`-F`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum FileFormat {
    /// Plain-text SQL script.
    Plain,
    /// Custom-format archive, compressed by default, input for pg_restore.
    Custom,
    /// Directory-format archive, one file per table.
    Directory,
    /// Tar-format archive; does not support compression.
    Tar,
}

impl FileFormat {
    fn as_flag(&self) -> &'static str {
        match self {
            FileFormat::Plain => "p",
            FileFormat::Custom => "c",
            FileFormat::Directory => "d",
            FileFormat::Tar => "t",
        }
    }

    /// Compression level pg_dump applies when none is given explicitly.
    /// Directory and tar archives take no `-Z` flag at all.
    fn default_compression(&self) -> Option<u8> {
        match self {
            FileFormat::Plain => Some(0),
            FileFormat::Custom => Some(5),
            FileFormat::Directory | FileFormat::Tar => None,
        }
    }
}

/// Options for the pg_dump utility.
///
/// Field defaults mirror the tool's own: large objects included, UTF8
/// encoding, custom archive format at moderate compression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpOptions {
    /// Include large objects in the dump (`-b`).
    pub blobs: bool,
    /// Dump object identifiers as part of table data (`-o`).
    pub oids: bool,
    /// Character-set encoding of the dump (`-E`).
    pub encoding: String,
    /// Output file, or target directory for the directory format (`-f`).
    pub output: String,
    /// Dump only schemas matching these patterns, in order (`-n`).
    pub only_schemas: Vec<String>,
    /// Skip schemas matching these patterns, in order (`-N`).
    pub exclude_schemas: Vec<String>,
    format: FileFormat,
    compress: Option<u8>,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            blobs: true,
            oids: false,
            encoding: "UTF8".to_string(),
            output: String::new(),
            only_schemas: Vec::new(),
            exclude_schemas: Vec::new(),
            format: FileFormat::Custom,
            compress: None,
        }
    }
}

impl DumpOptions {
    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Select the archive format (`-F`). Clears any explicit compression
    /// level, so plain falls back to 0 and custom to 5.
    pub fn set_format(&mut self, format: FileFormat) {
        self.format = format;
        self.compress = None;
    }

    /// Set an explicit compression level (`-Z`, 0..=9). Only rendered for the
    /// plain and custom formats.
    pub fn set_compression(&mut self, level: u8) {
        self.compress = Some(level);
    }

    /// Compression level that will be rendered, if any.
    pub fn compression(&self) -> Option<u8> {
        match self.format.default_compression() {
            Some(default) => Some(self.compress.unwrap_or(default)),
            None => None,
        }
    }

    /// Render the pg_dump command-line argument string.
    ///
    /// Flag order is fixed; identical options always render the identical
    /// string. Schema patterns are not validated here, pg_dump reports bad
    /// ones itself.
    pub fn arguments(&self) -> String {
        let mut arguments = String::new();

        if self.blobs {
            arguments.push_str(" -b");
        }

        arguments.push_str(&format!(" -E {}", self.encoding));
        arguments.push_str(&format!(" -f \"{}\"", self.output));
        arguments.push_str(&format!(" -F {}", self.format.as_flag()));

        if let Some(level) = self.compression() {
            arguments.push_str(&format!(" -Z {level}"));
        }

        for schema in &self.only_schemas {
            arguments.push_str(&format!(" -n {schema}"));
        }
        for schema in &self.exclude_schemas {
            arguments.push_str(&format!(" -N {schema}"));
        }

        if self.oids {
            arguments.push_str(" -o");
        }

        arguments
    }
}

/// Wrapper for the pg_dump utility.
pub struct PgDump {
    runner: ProcessRunner,
    connection: Option<ConnectionInfo>,
}

impl PgDump {
    /// Create a wrapper for the pg_dump binary found in `executable_dir`.
    pub fn new(executable_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner: ProcessRunner::new(executable_dir, PG_DUMP),
            connection: None,
        }
    }

    /// Create a wrapper carrying connection parameters; the password, if any,
    /// reaches pg_dump through the child environment.
    pub fn with_connection(executable_dir: impl Into<PathBuf>, connection: ConnectionInfo) -> Self {
        Self {
            runner: ProcessRunner::new(executable_dir, PG_DUMP),
            connection: Some(connection),
        }
    }

    pub fn with_executor(
        executable_dir: impl Into<PathBuf>,
        executor: Box<dyn ProcessExecutor + Send + Sync>,
    ) -> Self {
        Self {
            runner: ProcessRunner::with_executor(executable_dir, PG_DUMP, executor),
            connection: None,
        }
    }

    /// Run pg_dump with the given options, blocking until it exits.
    pub fn run(&self, options: &DumpOptions) -> Result<()> {
        let password = self
            .connection
            .as_ref()
            .and_then(|c| c.password.as_deref());
        self.runner.execute(&options.arguments(), password)?;
        info!("pg_dump completed successfully");
        Ok(())
    }
}
