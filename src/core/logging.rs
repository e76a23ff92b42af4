//! Logging setup.
//!
//! - JSON log file, rolled daily, in `{data_dir}/logs`
//! - optional human-readable stderr layer
//! - `log` crate macros redirected to `tracing`
//! - yesterday's files gzipped in the background

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "jarbis.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn prepare_log_dir(data_dir: &Path) -> PathBuf {
    let log_dir = data_dir.join("logs");
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }
    log_dir
}

/// Initialize logging with a file layer and a stderr layer.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// application so buffered logs are flushed on shutdown.
pub fn init(data_dir: &Path) -> WorkerGuard {
    init_layers(data_dir, true)
}

/// Initialize logging for TUI mode.
///
/// Identical to [`init()`] but omits the stderr layer so nothing is written
/// over the alternate screen. All logs go to the file only.
pub fn init_tui(data_dir: &Path) -> WorkerGuard {
    init_layers(data_dir, false)
}

fn init_layers(data_dir: &Path, with_stderr: bool) -> WorkerGuard {
    let log_dir = prepare_log_dir(data_dir);

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter());

    let stderr_layer = with_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .compact()
            .with_filter(env_filter())
    });

    // try_init also installs the `log` -> `tracing` bridge.
    if let Err(e) = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
    {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let log_dir_clone = log_dir.clone();
    std::thread::spawn(move || {
        compress_old_logs(&log_dir_clone);
    });

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );

    guard
}

/// Whether `name` is a rolled log file from a previous day, not yet compressed.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.starts_with(&format!("{}.", LOG_FILE_PREFIX))
        && !name.ends_with(today_suffix)
        && !name.ends_with(".gz")
}

/// Compress old log files in the background
fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::debug!("Compressed old log {}", path.display()),
            Err(e) => log::warn!("Failed to compress {}: {}", path.display(), e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let mut gz_name = path.as_os_str().to_owned();
    gz_name.push(".gz");

    let mut input = fs::File::open(path)?;
    let output = fs::File::create(PathBuf::from(gz_name))?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)
}
