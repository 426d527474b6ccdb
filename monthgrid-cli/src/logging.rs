//! Logger bootstrap for the CLI.
//!
//! Logs go to stderr unless the config names a directory, in which case they
//! go to size-rotated files there. `RUST_LOG` overrides the configured level.

use anyhow::{Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use monthgrid_core::config::MonthgridConfig;

const LOG_FILE_BASENAME: &str = "monthgrid";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

/// Start logging. Keep the returned handle alive for the life of the process.
pub fn init(config: &MonthgridConfig) -> Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str(&config.log_level)
        .with_context(|| format!("Invalid log level `{}`", config.log_level))?;

    let logger = match &config.log_dir {
        Some(dir) => logger
            .log_to_file(
                FileSpec::default()
                    .directory(dir)
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format),
        None => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::default_format),
    };

    let handle = logger.start().context("Could not start logger")?;

    info!(
        "event=app_start version={} edit_policy={:?}",
        env!("CARGO_PKG_VERSION"),
        config.edit_policy
    );

    Ok(handle)
}
