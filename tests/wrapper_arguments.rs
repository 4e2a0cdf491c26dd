//! Argument-vector tests for the utility facades, using a recording executor
//! so no PostgreSQL binaries are needed.

use std::path::Path;
use std::sync::{Arc, Mutex};

use pg_utilities::{
    DumpOptions, PgCtrl, PgDump, PgRestore, ProcessExecutor, RestoreOptions, RunOutput,
    ServiceStartType, ShutdownMode,
};

#[derive(Debug, Clone)]
struct Call {
    executable: String,
    args: Vec<String>,
}

#[derive(Clone, Default)]
struct RecordingExecutor {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingExecutor {
    fn take_single_call(&self) -> Call {
        let mut calls = self.calls.lock().expect("calls lock");
        assert_eq!(calls.len(), 1, "expected exactly one invocation");
        calls.remove(0)
    }
}

impl ProcessExecutor for RecordingExecutor {
    fn run(
        &self,
        _working_dir: &Path,
        executable: &Path,
        args: &[String],
        _env: &[(String, String)],
    ) -> std::io::Result<RunOutput> {
        self.calls.lock().expect("calls lock").push(Call {
            executable: executable.display().to_string(),
            args: args.to_vec(),
        });
        Ok(RunOutput {
            code: Some(0),
            stderr: String::new(),
        })
    }
}

fn pg_ctrl_with_recorder() -> (PgCtrl, RecordingExecutor) {
    let recorder = RecordingExecutor::default();
    let ctrl = PgCtrl::with_executor("/opt/pg/bin", Box::new(recorder.clone()));
    (ctrl, recorder)
}

#[test]
fn executable_path_joins_directory_and_name() {
    let (ctrl, recorder) = pg_ctrl_with_recorder();
    ctrl.reload("/data").expect("recorded run succeeds");
    assert_eq!(recorder.take_single_call().executable, "/opt/pg/bin/pg_ctrl");
}

#[test]
fn initialize_without_flags() {
    let (ctrl, recorder) = pg_ctrl_with_recorder();
    ctrl.initialize("/data", None).expect("recorded run");
    assert_eq!(recorder.take_single_call().args, ["init", "-D", "/data"]);
}

#[test]
fn initialize_passes_initdb_flags_through_as_one_token() {
    let (ctrl, recorder) = pg_ctrl_with_recorder();
    ctrl.initialize("/data", Some("--locale=C --no-sync"))
        .expect("recorded run");
    assert_eq!(
        recorder.take_single_call().args,
        ["init", "-D", "/data", "-o", "--locale=C --no-sync"]
    );
}

#[test]
fn start_with_log_file() {
    let (ctrl, recorder) = pg_ctrl_with_recorder();
    ctrl.start("/data", Some("/log/server.log"))
        .expect("recorded run");
    assert_eq!(
        recorder.take_single_call().args,
        ["start", "-D", "/data", "-l", "/log/server.log"]
    );
}

#[test]
fn stop_renders_the_shutdown_mode() {
    let (ctrl, recorder) = pg_ctrl_with_recorder();
    ctrl.stop("/data", ShutdownMode::Fast).expect("recorded run");
    assert_eq!(
        recorder.take_single_call().args,
        ["stop", "-D", "/data", "-m", "f"]
    );
}

#[test]
fn restart_defaults_to_smart_mode() {
    let (ctrl, recorder) = pg_ctrl_with_recorder();
    ctrl.restart("/data", ShutdownMode::default())
        .expect("recorded run");
    assert_eq!(
        recorder.take_single_call().args,
        ["restart", "-D", "/data", "-m", "s"]
    );
}

#[test]
fn status_promote_and_reload_take_only_the_data_directory() {
    type Invoke = fn(&PgCtrl) -> pg_utilities::Result<()>;
    let cases: [(Invoke, &str); 3] = [
        (|c| c.status("/data"), "status"),
        (|c| c.promote("/data"), "promote"),
        (|c| c.reload("/data"), "reload"),
    ];
    for (invoke, subcommand) in cases {
        let (ctrl, recorder) = pg_ctrl_with_recorder();
        invoke(&ctrl).expect("recorded run");
        assert_eq!(
            recorder.take_single_call().args,
            [subcommand, "-D", "/data"]
        );
    }
}

#[test]
fn kill_takes_the_process_id() {
    let (ctrl, recorder) = pg_ctrl_with_recorder();
    ctrl.kill(4242).expect("recorded run");
    assert_eq!(recorder.take_single_call().args, ["kill", "4242"]);
}

#[test]
fn register_renders_service_flags_in_order() {
    let (ctrl, recorder) = pg_ctrl_with_recorder();
    ctrl.register("pgsvc", "svcuser", "svcpass", "/data", ServiceStartType::Demand)
        .expect("recorded run");
    assert_eq!(
        recorder.take_single_call().args,
        [
            "register", "-N", "pgsvc", "-U", "svcuser", "-P", "svcpass", "-D", "/data", "-S", "d"
        ]
    );
}

#[test]
fn unregister_takes_the_service_name() {
    let (ctrl, recorder) = pg_ctrl_with_recorder();
    ctrl.unregister("pgsvc").expect("recorded run");
    assert_eq!(recorder.take_single_call().args, ["unregister", "-N", "pgsvc"]);
}

#[test]
fn dump_facade_sends_the_rendered_options() {
    let recorder = RecordingExecutor::default();
    let pg_dump = PgDump::with_executor("/opt/pg/bin", Box::new(recorder.clone()));

    let mut options = DumpOptions::default();
    options.output = "/tmp/out.dump".to_string();
    pg_dump.run(&options).expect("recorded run");

    let call = recorder.take_single_call();
    assert_eq!(call.executable, "/opt/pg/bin/pg_dump");
    assert_eq!(
        call.args,
        ["-b", "-E", "UTF8", "-f", "/tmp/out.dump", "-F", "c", "-Z", "5"]
    );
}

#[test]
fn restore_facade_sends_the_positional_input() {
    let recorder = RecordingExecutor::default();
    let pg_restore = PgRestore::with_executor("/opt/pg/bin", Box::new(recorder.clone()));

    let options = RestoreOptions {
        input: "/backups/site.dump".to_string(),
        exit_on_error: true,
        only_schemas: vec!["ignored".to_string()],
    };
    pg_restore.run(&options).expect("recorded run");

    let call = recorder.take_single_call();
    assert_eq!(call.executable, "/opt/pg/bin/pg_restore");
    assert_eq!(call.args, ["/backups/site.dump", "-e"]);
}
