use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app_dirs::AppDirs;

const LOG_FILE_NAME: &str = "glide.log";

/// Filter directive for `-v` count, used when `RUST_LOG` is unset
pub fn default_directive(verbose: u8) -> String {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    format!("glide={level},warn")
}

/// Resolve where the log file goes: the explicit path, else the app state dir.
pub fn log_target(explicit: Option<&Path>) -> Option<(PathBuf, String)> {
    match explicit {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            let name = path.file_name()?.to_string_lossy().into_owned();
            Some((dir, name))
        }
        None => AppDirs::log_dir().map(|dir| (dir, LOG_FILE_NAME.to_string())),
    }
}

/// Install a file-backed subscriber. The terminal belongs to the UI, so
/// nothing is written to stdout.
///
/// The returned guard must be held until exit to flush buffered lines.
pub fn init(explicit: Option<&Path>, verbose: u8) -> Result<Option<WorkerGuard>> {
    let Some((dir, name)) = log_target(explicit) else {
        return Ok(None);
    };
    fs::create_dir_all(&dir).with_context(|| format!("creating log directory {}", dir.display()))?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let appender = tracing_appender::rolling::never(&dir, &name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .context("installing tracing subscriber")?;

    tracing::info!(path = %dir.join(&name).display(), "logging initialised");
    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_levels() {
        assert_eq!(default_directive(0), "glide=info,warn");
        assert_eq!(default_directive(1), "glide=debug,warn");
        assert_eq!(default_directive(5), "glide=trace,warn");
    }

    #[test]
    fn test_log_target_explicit_path() {
        let (dir, name) = log_target(Some(Path::new("/tmp/glide/run.log"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/glide"));
        assert_eq!(name, "run.log");
    }

    #[test]
    fn test_log_target_bare_file_name() {
        let (dir, name) = log_target(Some(Path::new("run.log"))).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "run.log");
    }
}
