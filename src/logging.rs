use flexi_logger::{
    colored_default_format, opt_format, Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger,
    LoggerHandle, Naming,
};
use std::path::Path;

/// Starts the global logger from `RUST_LOG`, falling back to `default_spec`.
///
/// With a directory, logs go to size-rotated files there; otherwise to stderr.
/// Keep the handle alive for as long as logging is needed.
pub fn setup_logging(default_spec: &str, log_dir: Option<&Path>) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(default_spec)?;
    match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .format(opt_format)
            .rotate(
                Criterion::Size(10 * 1024 * 1024),
                Naming::Numbers,
                Cleanup::KeepLogFiles(3),
            )
            .start(),
        None => logger.format(colored_default_format).start(),
    }
}
