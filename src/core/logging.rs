//! Logging setup
//!
//! Library code logs through the `log` facade. The binary calls [`init`] once,
//! which installs a tracing registry with a JSON file layer (daily rolling)
//! and a compact stderr layer, and bridges `log` records into it. stdout is
//! never written by the logger; it carries lookup results only.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "ARCDEX_LOG";

/// Rolling file name prefix inside the log directory.
pub const LOG_FILE_PREFIX: &str = "arcdex.log";

const DEFAULT_STDERR_FILTER: &str = "warn";
const DEFAULT_FILE_FILTER: &str = "info";

/// Default log directory under the platform data dir.
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("arcdex").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize the logging system.
///
/// Returns a `WorkerGuard` that must be held until exit so buffered file
/// output is flushed.
pub fn init(log_dir: &Path) -> WorkerGuard {
    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("Failed to create log directory {}: {e}", log_dir.display());
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(filter_or(DEFAULT_FILE_FILTER));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .compact()
        .without_time()
        .with_target(false)
        .with_filter(filter_or(DEFAULT_STDERR_FILTER));

    if let Err(e) = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
    {
        eprintln!("Failed to install tracing subscriber: {e}");
    }

    // try_init already bridges `log` when tracing-subscriber's tracing-log
    // feature is on; a second install is harmless.
    if let Err(e) = tracing_log::LogTracer::init() {
        log::debug!("LogTracer not installed: {e}");
    }

    let dir = log_dir.to_path_buf();
    std::thread::spawn(move || compress_old_logs(&dir));

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );

    guard
}

/// Gzip every rolled log file except today's.
fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };

    for path in entries.flatten().map(|e| e.path()) {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_rolled_log(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn is_rolled_log(name: &str, today_suffix: &str) -> bool {
    name.strip_prefix(LOG_FILE_PREFIX)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|date| !date.is_empty() && date != today_suffix && !date.ends_with(".gz"))
}

fn compress_file(path: &Path) -> io::Result<()> {
    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path = path.with_file_name(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let mut reader = io::BufReader::new(fs::File::open(path)?);
    let mut encoder = GzEncoder::new(fs::File::create(&gz_path)?, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)
}
