use thiserror::Error;

/// Describes errors in the configuration of the logger.
///
/// Errors that occur while a configured logger is writing are not represented
/// here: by contract a log call never fails its caller, so write-time problems
/// are reported best-effort to stderr instead.
#[derive(Error, Debug)]
pub enum LogError {
    /// The rotation threshold must be greater than zero.
    #[error("the maximum log file size must be greater than zero")]
    InvalidMaxSize,

    /// The log file cannot be opened for append,
    /// e.g. because the configured directory is not writable.
    #[error("the log file cannot be opened for writing")]
    Io(#[from] std::io::Error),

    /// A severity name could not be parsed.
    #[error("unknown severity name: {0:?}")]
    SeverityParse(String),

    /// Installing the handle as the `log` facade backend failed,
    /// because another global logger is already set.
    #[error("installing the log facade backend failed")]
    Facade(#[from] log::SetLoggerError),
}
