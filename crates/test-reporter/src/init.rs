use std::ffi::OsString;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

static INIT: OnceCell<Option<WorkerGuard>> = OnceCell::new();

/// Sink selection for the installed subscriber.
#[derive(Clone, Debug, Default)]
pub struct LogOptions {
    /// Mirror the level-tagged lines into this file (off by default).
    pub file: Option<PathBuf>,
}

/// Installs the global subscriber once; repeat calls are no-ops. The
/// filter comes from the environment, defaulting to `info`.
pub fn init_reporting() {
    init_reporting_with(LogOptions::default());
}

pub fn init_reporting_with(options: LogOptions) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = fmt::layer().with_ansi(false).with_target(false);
        let subscriber = Registry::default().with(filter).with(fmt_layer);
        match options.file {
            Some(path) => {
                let (writer, guard) = tracing_appender::non_blocking(file_appender(&path));
                let file_layer = fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(writer);
                let _ = tracing::subscriber::set_global_default(subscriber.with(file_layer));
                Some(guard)
            }
            None => {
                let _ = tracing::subscriber::set_global_default(subscriber);
                None
            }
        }
    });
}

fn file_appender(path: &Path) -> tracing_appender::rolling::RollingFileAppender {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("test-report.log"));
    let _ = std::fs::create_dir_all(dir);
    tracing_appender::rolling::never(dir, name)
}
