use crate::destination::{write_err, write_to_console, write_to_file, Destination};
use crate::formats::FormatFunction;
use crate::parameters::FatalAction;
use crate::record::{DeferredNow, Record};
use crate::severity::{Severity, SEVERITY_COUNT};
use crate::writers::RotatingFileWriter;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

/// Explicit handle to a configured logger.
///
/// There is no hidden global state: the handle is created by
/// [`Logger::try_build`](crate::Logger::try_build), cloned cheaply, and
/// passed to whatever needs to log. All clones share the destination table
/// and the rotating file writer; dropping the last clone closes the file.
///
/// A log call never fails its caller. I/O problems inside a call are
/// reported best-effort to stderr and otherwise swallowed.
#[derive(Clone)]
pub struct LogHandle {
    inner: Arc<HandleState>,
}

struct HandleState {
    destinations: [Destination; SEVERITY_COUNT],
    writer: Option<RotatingFileWriter>,
    format: FormatFunction,
    fatal_action: FatalAction,
}

impl LogHandle {
    pub(crate) fn new(
        destinations: [Destination; SEVERITY_COUNT],
        writer: Option<RotatingFileWriter>,
        format: FormatFunction,
        fatal_action: FatalAction,
    ) -> Self {
        Self {
            inner: Arc::new(HandleState {
                destinations,
                writer,
                format,
                fatal_action,
            }),
        }
    }

    /// Writes one record to its precomputed destination.
    ///
    /// Prefer the [`trace!`](crate::trace) .. [`fatal!`](crate::fatal)
    /// macros, which capture the source location. A Fatal record, after
    /// being written and the file synced, runs the configured
    /// [`FatalAction`] and by default does not return.
    pub fn log(&self, record: &Record<'_>) {
        let destination = self.destination(record.severity());
        if destination.is_discard() {
            return;
        }
        let mut now = DeferredNow::new();
        if let Some(stream) = destination.console_stream() {
            write_to_console(stream, self.inner.format, &mut now, record)
                .unwrap_or_else(|e| write_err("writing to the console failed", &e));
        }
        if destination.writes_to_file() {
            if let Some(ref writer) = self.inner.writer {
                if !writer.is_closed() {
                    write_to_file(writer, self.inner.format, &mut now, record)
                        .unwrap_or_else(|e| write_err("writing to the log file failed", &e));
                }
            }
        }
        if record.severity() == Severity::Fatal {
            self.fatal();
        }
    }

    // Best-effort persistence, then the configured action; Exit does not
    // return.
    fn fatal(&self) {
        self.flush();
        if let Some(ref writer) = self.inner.writer {
            writer
                .sync()
                .unwrap_or_else(|e| write_err("syncing the log file failed", &e));
        }
        self.inner.fatal_action.run();
    }

    /// Flushes the console streams and the log file.
    pub fn flush(&self) {
        io::stdout()
            .flush()
            .unwrap_or_else(|e| write_err("flushing stdout failed", &e));
        io::stderr()
            .flush()
            .unwrap_or_else(|e| write_err("flushing stderr failed", &e));
        if let Some(ref writer) = self.inner.writer {
            writer
                .flush()
                .unwrap_or_else(|e| write_err("flushing the log file failed", &e));
        }
    }

    /// Closes the rotating file writer, if one is configured. Log calls made
    /// afterwards still reach the console; the file leg is skipped. Safe to
    /// call repeatedly, and a no-op for console-only configurations.
    ///
    /// # Errors
    ///
    /// The final flush's error.
    pub fn stop(&self) -> io::Result<()> {
        match self.inner.writer {
            Some(ref writer) => writer.close(),
            None => Ok(()),
        }
    }

    /// The destination records of the given severity go to.
    #[must_use]
    pub fn destination(&self, severity: Severity) -> Destination {
        self.inner.destinations[severity.index()]
    }

    /// The path of the current log file, if file output is configured.
    #[must_use]
    pub fn log_file_path(&self) -> Option<&Path> {
        self.inner.writer.as_ref().map(RotatingFileWriter::path)
    }
}

impl log::Log for LogHandle {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        !self.destination(severity_from_level(metadata.level())).is_discard()
    }

    fn log(&self, record: &log::Record<'_>) {
        let severity = severity_from_level(record.level());
        let own = Record::new(severity, *record.args(), record.file(), record.line());
        LogHandle::log(self, &own);
    }

    fn flush(&self) {
        LogHandle::flush(self);
    }
}

// Fatal has no counterpart in the facade; Debug folds into Trace.
fn severity_from_level(level: log::Level) -> Severity {
    match level {
        log::Level::Error => Severity::Error,
        log::Level::Warn => Severity::Warn,
        log::Level::Info => Severity::Info,
        log::Level::Debug | log::Level::Trace => Severity::Trace,
    }
}
