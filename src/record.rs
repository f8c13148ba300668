use crate::severity::Severity;
use chrono::{DateTime, Local};
use std::fmt;

/// The payload of one log call: its severity, the formatted message, and the
/// source location of the call site.
///
/// Records are normally created by the [`trace!`](crate::trace) ..
/// [`fatal!`](crate::fatal) macros, which capture `file!()` and `line!()`;
/// constructing one manually is only needed when driving
/// [`LogHandle::log`](crate::LogHandle::log) directly.
pub struct Record<'a> {
    severity: Severity,
    args: fmt::Arguments<'a>,
    file: Option<&'a str>,
    line: Option<u32>,
}

impl<'a> Record<'a> {
    /// Creates a record.
    #[must_use]
    pub fn new(
        severity: Severity,
        args: fmt::Arguments<'a>,
        file: Option<&'a str>,
        line: Option<u32>,
    ) -> Self {
        Self {
            severity,
            args,
            file,
            line,
        }
    }

    /// The record's severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The formatted message.
    #[must_use]
    pub fn args(&self) -> &fmt::Arguments<'a> {
        &self.args
    }

    /// The source file of the call site, if captured.
    #[must_use]
    pub fn file(&self) -> Option<&'a str> {
        self.file
    }

    /// The source line of the call site, if captured.
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        self.line
    }
}

/// Lazily created timestamp.
///
/// A record that fans out to several destinations (console and file) is
/// formatted once per destination; sharing one `DeferredNow` guarantees that
/// all of them show the same instant.
#[derive(Debug, Default)]
pub struct DeferredNow(Option<DateTime<Local>>);

impl DeferredNow {
    pub(crate) fn new() -> Self {
        Self(None)
    }

    /// Retrieve the timestamp; the first caller materializes it.
    pub fn now(&mut self) -> &DateTime<Local> {
        self.0.get_or_insert_with(Local::now)
    }
}
