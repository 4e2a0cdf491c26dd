pub mod pg_ctrl;
pub mod pg_dump;
pub mod pg_restore;

// Re-export for convenience
pub use pg_ctrl::{PgCtrl, ServerReadiness, ServiceStartType, ShutdownMode};
pub use pg_dump::{DumpOptions, FileFormat, PgDump};
pub use pg_restore::{PgRestore, RestoreOptions};
