use flexi_logger::{
    opt_format, Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
};
use std::path::Path;

/// Starts the global logger. `RUST_LOG` overrides `spec`.
///
/// With a directory, logs go to rotated files there; otherwise to stderr.
/// Keep the returned handle alive for as long as logging is needed.
pub fn setup_logging(
    spec: &str,
    directory: Option<&Path>,
) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(spec)?;
    match directory {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .format(opt_format)
            .rotate(
                Criterion::Size(10 * 1024 * 1024), // 10 MB per file
                Naming::Numbers,
                Cleanup::KeepLogFiles(3),
            )
            .start(),
        None => logger.format(flexi_logger::colored_default_format).start(),
    }
}
