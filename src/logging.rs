//! Log sinks for the CLI.
//!
//! stdout carries the JSON snapshot, so nothing is logged there. A run logs
//! to stderr with `--verbose`, to a per-run file when `LEARNING_STORE_LOG`
//! is set, and not at all otherwise.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "LEARNING_STORE_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Off,
    Stderr,
    /// Base path; each run appends its own suffix.
    File(PathBuf),
}

impl LogSink {
    /// `--verbose` wins over the env var.
    pub fn resolve(verbose: bool) -> Self {
        if verbose {
            return LogSink::Stderr;
        }
        match std::env::var_os(LOG_ENV) {
            Some(path) if !path.is_empty() => LogSink::File(PathBuf::from(path)),
            _ => LogSink::Off,
        }
    }

    /// Crate events at `debug` on stderr, `info` in files; dependencies
    /// only at `warn`. `RUST_LOG` overrides both.
    fn default_directives(&self) -> &'static str {
        match self {
            LogSink::Stderr => "warn,learning_store=debug",
            LogSink::Off | LogSink::File(_) => "warn,learning_store=info",
        }
    }
}

/// `{base}.{command}.{utc timestamp}.{pid}`, so concurrent runs never share
/// a file and a directory listing sorts runs of one command together.
pub fn run_log_path(base: &Path, command: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!(
        ".{}.{}.{}",
        command,
        Utc::now().format("%Y%m%dT%H%M%SZ"),
        std::process::id()
    ));
    PathBuf::from(name)
}

/// Install the global subscriber for `sink`. `command` names the file of a
/// file sink.
pub fn init(sink: &LogSink, command: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(sink.default_directives()));

    match sink {
        LogSink::Off => {}
        LogSink::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .init();
        }
        LogSink::File(base) => {
            let path = run_log_path(base, command);
            let file = match std::fs::File::create(&path) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!("Warning: cannot create log file {}: {}", path.display(), e);
                    return;
                }
            };
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(file)
                        .with_ansi(false)
                        .with_target(true),
                )
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_selects_stderr() {
        assert_eq!(LogSink::resolve(true), LogSink::Stderr);
    }

    #[test]
    fn run_log_path_carries_command_and_pid() {
        let path = run_log_path(Path::new("/tmp/store.log"), "search");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("store.log.search."));
        assert!(name.ends_with(&format!(".{}", std::process::id())));
        assert_eq!(path.parent(), Some(Path::new("/tmp")));
    }

    #[test]
    fn stderr_logs_crate_at_debug() {
        assert_eq!(LogSink::Stderr.default_directives(), "warn,learning_store=debug");
        assert_eq!(
            LogSink::File(PathBuf::from("x")).default_directives(),
            "warn,learning_store=info"
        );
    }
}
