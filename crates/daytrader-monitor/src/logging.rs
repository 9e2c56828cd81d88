//! Logging setup.

use std::io;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

/// Keeps the background log writer alive; drop it last.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Setup logging with the given level.
///
/// `RUST_LOG` takes precedence over `level`. Console output goes to stderr so
/// it never mixes with command output; `console = false` silences it while a
/// full-screen UI owns the terminal. With `file`, every event is also appended
/// to that file without ANSI colors.
pub fn setup_logging(
    level: &str,
    json: bool,
    console: bool,
    file: Option<&Path>,
) -> io::Result<LogGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (writer, guard) = match file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(path)?);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(console.then(|| fmt::layer().json().with_writer(io::stderr)))
            .with(file_layer(writer))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(console.then(|| fmt::layer().pretty().with_writer(io::stderr)))
            .with(file_layer(writer))
            .init();
    }

    Ok(LogGuard { _file: guard })
}

fn file_appender(path: &Path) -> io::Result<RollingFileAppender> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("daytrader.log");

    std::fs::create_dir_all(dir)?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
        .map_err(io::Error::other)
}

fn file_layer<S>(writer: Option<NonBlocking>) -> Option<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    writer.map(|w| fmt::layer().with_ansi(false).with_writer(w))
}
