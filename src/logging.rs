//! Logging bootstrap for the command-line shell
//!
//! Library code only emits `log` records as `event=... key=value` lines. The
//! binary decides where they go: stderr by default, or size-rotated files
//! under a log directory.
//!
//! Initialization happens at most once per process. A second call with the
//! same settings is a no-op; a call with different settings is rejected.

use anyhow::{Result, bail};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "habit-ledger";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: Option<PathBuf>,
    _logger: LoggerHandle,
}

/// Start the global logger
///
/// # Arguments
/// * `level` - One of trace, debug, info, warn, error
/// * `log_dir` - Directory for rotated log files; stderr when `None`
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<()> {
    let level = normalize_level(level)?;
    let log_dir = log_dir.map(Path::to_path_buf);

    if let Some(state) = LOGGING_STATE.get() {
        return check_matches(state, level, log_dir.as_deref());
    }

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState> {
        let logger = Logger::try_with_str(level)?;
        let logger = match &log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                logger
                    .log_to_file(
                        FileSpec::default()
                            .directory(dir.as_path())
                            .basename(LOG_FILE_BASENAME),
                    )
                    .rotate(
                        Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                        Naming::Numbers,
                        Cleanup::KeepLogFiles(MAX_LOG_FILES),
                    )
                    .write_mode(WriteMode::BufferAndFlush)
                    .append()
                    .format_for_files(flexi_logger::detailed_format)
                    .start()?
            }
            None => logger.log_to_stderr().start()?,
        };

        info!(
            "event=logging_init level={} target={} version={}",
            level,
            log_dir
                .as_deref()
                .map_or_else(|| "stderr".to_string(), |d| d.display().to_string()),
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            level,
            log_dir: log_dir.clone(),
            _logger: logger,
        })
    })?;

    check_matches(state, level, log_dir.as_deref())
}

/// Level used when none is given on the command line
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) { "info" } else { "warn" }
}

fn check_matches(state: &LoggingState, level: &str, log_dir: Option<&Path>) -> Result<()> {
    if state.log_dir.as_deref() != log_dir {
        bail!("logging already initialized with a different destination");
    }
    if state.level != level {
        bail!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level,
            level
        );
    }
    Ok(())
}

pub(crate) fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => bail!("unsupported log level `{other}`; expected trace|debug|info|warn|error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert_eq!(normalize_level("trace").unwrap(), "trace");
    }

    #[test]
    fn test_normalize_level_rejects_unknown() {
        assert!(normalize_level("verbose").is_err());
        assert!(normalize_level("").is_err());
    }

    #[test]
    fn test_default_level_is_known() {
        assert!(normalize_level(default_log_level()).is_ok());
    }
}
