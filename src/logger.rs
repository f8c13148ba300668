use crate::destination::Destination;
use crate::error::LogError;
use crate::formats::{default_format, FormatFunction};
use crate::handle::LogHandle;
use crate::parameters::{FatalAction, RotatePolicy};
use crate::severity::{Severity, SEVERITY_COUNT};
use crate::writers::RotatingFileWriter;
use std::path::PathBuf;

/// The entry point for configuring a logger.
///
/// A simple setup with console and file output looks like this:
///
/// ```rust
/// use rotolog::{info, trace, Logger, Severity};
///
/// let logger = Logger::with(Severity::Info)
///     .log_to_file("log_files/doc/app.log")
///     .try_build()
///     .unwrap_or_else(|e| panic!("logger initialization failed with {}", e));
///
/// info!(logger, "listening on port {}", 8080); // stdout and the file
/// trace!(logger, "below the minimum");         // discarded
/// ```
///
/// `Logger` is a builder: pick the minimum severity with
/// [`with`](Self::with) or [`try_with_str`](Self::try_with_str), apply the
/// desired configuration methods, and finish with
/// [`try_build`](Self::try_build), or with [`start`](Self::start) if the
/// handle should also serve the `log` crate's macros.
pub struct Logger {
    min_severity: Severity,
    o_file_path: Option<PathBuf>,
    max_size: Option<u64>,
    backup_count: Option<usize>,
    rotate_policy: RotatePolicy,
    format: FormatFunction,
    fatal_action: FatalAction,
}

impl Logger {
    /// Creates a `Logger` with the given minimum severity.
    ///
    /// Records below the minimum are discarded; records at or above it go to
    /// their console stream (stdout for Trace/Info/Warn, stderr for Error and
    /// Fatal). Fatal is exempt from the minimum: it always shares Error's
    /// console stream, so a terminating condition stays observable even under
    /// `Severity::Fatal` as the minimum.
    #[must_use]
    pub fn with(min_severity: Severity) -> Self {
        Self {
            min_severity,
            o_file_path: None,
            max_size: None,
            backup_count: None,
            rotate_policy: RotatePolicy::default(),
            format: default_format,
            fatal_action: FatalAction::default(),
        }
    }

    /// Creates a `Logger` from a severity name such as `"info"` or `"warn"`.
    ///
    /// # Errors
    ///
    /// `LogError::SeverityParse` if the name is not a severity.
    pub fn try_with_str<S: AsRef<str>>(s: S) -> Result<Self, LogError> {
        Ok(Self::with(s.as_ref().parse()?))
    }

    /// Additionally routes every console-enabled severity to a rotating file
    /// at `path`; discarded severities do not reach the file either.
    ///
    /// All severities share one writer. An empty path leaves file output
    /// disabled.
    pub fn log_to_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        let path = path.into();
        self.o_file_path = if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        };
        self
    }

    /// The rotation threshold in bytes; must be greater than zero.
    /// The default is 1 GiB.
    #[must_use]
    pub fn max_size(mut self, max_size: u64) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// How many numbered backups rotation keeps; 0 disables rotation and
    /// lets the file grow without bound. The default is 10.
    #[must_use]
    pub fn backup_count(mut self, backup_count: usize) -> Self {
        self.backup_count = Some(backup_count);
        self
    }

    /// How rename failures during a rotation are handled.
    /// The default is [`RotatePolicy::BestEffort`].
    #[must_use]
    pub fn rotate_policy(mut self, policy: RotatePolicy) -> Self {
        self.rotate_policy = policy;
        self
    }

    /// Makes the logger use the provided line formatter for all destinations,
    /// rather than [`default_format`](crate::default_format).
    #[must_use]
    pub fn format(mut self, format: FormatFunction) -> Self {
        self.format = format;
        self
    }

    /// What logging a Fatal record does after the record is written and the
    /// file synced. The default is [`FatalAction::Exit`]`(255)`.
    #[must_use]
    pub fn fatal_action(mut self, action: FatalAction) -> Self {
        self.fatal_action = action;
        self
    }

    /// Produces the [`LogHandle`], opening the log file if one is configured.
    ///
    /// The handle is an explicit object: clone it and pass it to whatever
    /// needs to log. Dropping the last clone closes the file.
    ///
    /// # Errors
    ///
    /// `LogError::InvalidMaxSize` or `LogError::Io`.
    pub fn try_build(self) -> Result<LogHandle, LogError> {
        let writer = match &self.o_file_path {
            None => None,
            Some(path) => {
                let mut builder = RotatingFileWriter::builder(path.clone())
                    .rotate_policy(self.rotate_policy);
                if let Some(max_size) = self.max_size {
                    builder = builder.max_size(max_size);
                }
                if let Some(backup_count) = self.backup_count {
                    builder = builder.backup_count(backup_count);
                }
                Some(builder.try_build()?)
            }
        };

        let mut destinations = [Destination::DISCARD; SEVERITY_COUNT];
        for severity in &Severity::ALL {
            let enabled = *severity == Severity::Fatal || *severity >= self.min_severity;
            if enabled {
                destinations[severity.index()] =
                    Destination::console(severity.stream(), writer.is_some());
            }
        }

        Ok(LogHandle::new(
            destinations,
            writer,
            self.format,
            self.fatal_action,
        ))
    }

    /// Builds the handle and additionally installs it as the backend of the
    /// [`log`](https://crates.io/crates/log) facade, so that `log::info!`
    /// etc. route through it. `log::Level::Debug` maps to `Severity::Trace`;
    /// Fatal has no facade counterpart.
    ///
    /// The facade accepts only one backend per process: a second `start`
    /// fails, it does not silently replace the first.
    ///
    /// # Errors
    ///
    /// The [`try_build`](Self::try_build) errors, or `LogError::Facade` if a
    /// global logger is already installed.
    pub fn start(self) -> Result<LogHandle, LogError> {
        let max_level = facade_level(self.min_severity);
        let handle = self.try_build()?;
        log::set_boxed_logger(Box::new(handle.clone()))?;
        log::set_max_level(max_level);
        Ok(handle)
    }
}

// The coarse upper bound handed to the facade; the handle's destination
// table does the real filtering.
fn facade_level(min_severity: Severity) -> log::LevelFilter {
    match min_severity {
        Severity::Trace => log::LevelFilter::Trace,
        Severity::Info => log::LevelFilter::Info,
        Severity::Warn => log::LevelFilter::Warn,
        Severity::Error => log::LevelFilter::Error,
        // nothing the facade can emit is enabled
        Severity::Fatal => log::LevelFilter::Off,
    }
}
