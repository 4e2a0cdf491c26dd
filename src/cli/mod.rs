pub mod commands;

use std::path::PathBuf;

use crate::wrapper::{FileFormat, ServiceStartType, ShutdownMode};

/// Connection flags shared by the dump and restore subcommands.
#[derive(clap::Args, Debug)]
pub struct ConnectionArgs {
    /// PostgreSQL host
    #[clap(long, default_value = "localhost")]
    pub host: String,

    /// PostgreSQL port
    #[clap(long, default_value = "5432")]
    pub port: u16,

    /// PostgreSQL database
    #[clap(long, default_value = "postgres")]
    pub database: String,

    /// PostgreSQL user
    #[clap(long, default_value = "postgres")]
    pub username: String,

    /// PostgreSQL password, passed to the utility via its environment
    #[clap(long)]
    pub password: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
pub enum UtilityCommands {
    /// Export a database to an archive with pg_dump
    Dump(DumpArgs),

    /// Import a previously produced archive with pg_restore
    Restore(RestoreArgs),

    /// Control a database cluster with pg_ctrl
    #[clap(subcommand)]
    Cluster(ClusterCommands),
}

#[derive(clap::Args, Debug)]
pub struct DumpArgs {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    /// Directory containing the pg_dump binary (searches PATH when omitted)
    #[clap(long, default_value = "")]
    pub bin_dir: PathBuf,

    /// Output file, or target directory for the directory format
    #[clap(long)]
    pub output: String,

    /// Archive format
    #[clap(long, value_enum, default_value = "custom")]
    pub format: FileFormat,

    /// Compression level 0-9 (defaults to 0 for plain, 5 for custom)
    #[clap(long)]
    pub compress: Option<u8>,

    /// Character-set encoding of the dump
    #[clap(long, default_value = "UTF8")]
    pub encoding: String,

    /// Leave large objects out of the dump
    #[clap(long)]
    pub no_blobs: bool,

    /// Dump object identifiers as part of table data
    #[clap(long)]
    pub oids: bool,

    /// Dump only schemas matching this pattern (repeatable)
    #[clap(long = "schema")]
    pub schemas: Vec<String>,

    /// Skip schemas matching this pattern (repeatable)
    #[clap(long = "exclude-schema")]
    pub exclude_schemas: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct RestoreArgs {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    /// Directory containing the pg_restore binary (searches PATH when omitted)
    #[clap(long, default_value = "")]
    pub bin_dir: PathBuf,

    /// Archive file or directory to restore
    #[clap(long)]
    pub input: String,

    /// Exit on the first error instead of continuing
    #[clap(long)]
    pub exit_on_error: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum ClusterCommands {
    /// Create a new database cluster
    Init {
        /// Cluster data directory
        #[clap(short = 'D', long)]
        data_dir: String,

        /// Extra flags passed through to initdb
        #[clap(long)]
        initdb_flags: Option<String>,

        /// Directory containing the pg_ctrl binary (searches PATH when omitted)
        #[clap(long, default_value = "")]
        bin_dir: PathBuf,
    },

    /// Start the server instance
    Start {
        #[clap(short = 'D', long)]
        data_dir: String,

        /// Append the server log to this file
        #[clap(short = 'l', long)]
        log_file: Option<String>,

        #[clap(long, default_value = "")]
        bin_dir: PathBuf,
    },

    /// Shut the server down
    Stop {
        #[clap(short = 'D', long)]
        data_dir: String,

        /// Shutdown mode
        #[clap(short = 'm', long, value_enum, default_value = "smart")]
        mode: ShutdownMode,

        #[clap(long, default_value = "")]
        bin_dir: PathBuf,
    },

    /// Stop and start the server
    Restart {
        #[clap(short = 'D', long)]
        data_dir: String,

        /// Shutdown mode
        #[clap(short = 'm', long, value_enum, default_value = "smart")]
        mode: ShutdownMode,

        #[clap(long, default_value = "")]
        bin_dir: PathBuf,
    },

    /// Make the server reread its configuration files
    Reload {
        #[clap(short = 'D', long)]
        data_dir: String,

        #[clap(long, default_value = "")]
        bin_dir: PathBuf,
    },

    /// Check whether a server is running in the data directory
    Status {
        #[clap(short = 'D', long)]
        data_dir: String,

        #[clap(long, default_value = "")]
        bin_dir: PathBuf,
    },

    /// Command a standby server to leave recovery
    Promote {
        #[clap(short = 'D', long)]
        data_dir: String,

        #[clap(long, default_value = "")]
        bin_dir: PathBuf,
    },

    /// Send a signal to a server process
    Kill {
        /// Target process id
        pid: u32,

        #[clap(long, default_value = "")]
        bin_dir: PathBuf,
    },

    /// Register the server as a Windows system service
    Register {
        #[clap(short = 'N', long)]
        service_name: String,

        #[clap(short = 'U', long)]
        service_user: String,

        #[clap(short = 'P', long)]
        service_password: String,

        #[clap(short = 'D', long)]
        data_dir: String,

        /// Service start type
        #[clap(short = 'S', long, value_enum, default_value = "auto")]
        start_type: ServiceStartType,

        #[clap(long, default_value = "")]
        bin_dir: PathBuf,
    },

    /// Remove a registered Windows system service
    Unregister {
        #[clap(short = 'N', long)]
        service_name: String,

        #[clap(long, default_value = "")]
        bin_dir: PathBuf,
    },
}
