use anyhow::Result;
use log::info;

use crate::cli::{ClusterCommands, ConnectionArgs, DumpArgs, RestoreArgs};
use crate::common::ConnectionInfo;
use crate::wrapper::{DumpOptions, PgCtrl, PgDump, PgRestore, RestoreOptions};

fn connection_info(args: ConnectionArgs) -> ConnectionInfo {
    ConnectionInfo::new(
        args.host,
        args.port,
        args.database,
        args.username,
        args.password,
    )
}

pub fn dump(args: DumpArgs) -> Result<()> {
    let mut options = DumpOptions::default();
    options.blobs = !args.no_blobs;
    options.oids = args.oids;
    options.encoding = args.encoding;
    options.output = args.output;
    options.only_schemas = args.schemas;
    options.exclude_schemas = args.exclude_schemas;
    options.set_format(args.format);
    if let Some(level) = args.compress {
        options.set_compression(level);
    }

    info!("dumping to {}", options.output);
    let pg_dump = PgDump::with_connection(args.bin_dir, connection_info(args.connection));
    pg_dump.run(&options)?;
    Ok(())
}

pub fn restore(args: RestoreArgs) -> Result<()> {
    let options = RestoreOptions {
        input: args.input,
        exit_on_error: args.exit_on_error,
        only_schemas: Vec::new(),
    };

    info!("restoring from {}", options.input);
    let pg_restore = PgRestore::with_connection(args.bin_dir, connection_info(args.connection));
    pg_restore.run(&options)?;
    Ok(())
}

pub fn cluster(command: ClusterCommands) -> Result<()> {
    match command {
        ClusterCommands::Init {
            data_dir,
            initdb_flags,
            bin_dir,
        } => PgCtrl::new(bin_dir).initialize(&data_dir, initdb_flags.as_deref())?,
        ClusterCommands::Start {
            data_dir,
            log_file,
            bin_dir,
        } => PgCtrl::new(bin_dir).start(&data_dir, log_file.as_deref())?,
        ClusterCommands::Stop {
            data_dir,
            mode,
            bin_dir,
        } => PgCtrl::new(bin_dir).stop(&data_dir, mode)?,
        ClusterCommands::Restart {
            data_dir,
            mode,
            bin_dir,
        } => PgCtrl::new(bin_dir).restart(&data_dir, mode)?,
        ClusterCommands::Reload { data_dir, bin_dir } => PgCtrl::new(bin_dir).reload(&data_dir)?,
        ClusterCommands::Status { data_dir, bin_dir } => PgCtrl::new(bin_dir).status(&data_dir)?,
        ClusterCommands::Promote { data_dir, bin_dir } => {
            PgCtrl::new(bin_dir).promote(&data_dir)?
        }
        ClusterCommands::Kill { pid, bin_dir } => PgCtrl::new(bin_dir).kill(pid)?,
        ClusterCommands::Register {
            service_name,
            service_user,
            service_password,
            data_dir,
            start_type,
            bin_dir,
        } => PgCtrl::new(bin_dir).register(
            &service_name,
            &service_user,
            &service_password,
            &data_dir,
            start_type,
        )?,
        ClusterCommands::Unregister {
            service_name,
            bin_dir,
        } => PgCtrl::new(bin_dir).unregister(&service_name)?,
    }
    Ok(())
}
