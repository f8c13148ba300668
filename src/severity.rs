use crate::error::LogError;
use std::fmt;
use std::str::FromStr;

/// The number of severities; destination tables are indexed by severity.
pub(crate) const SEVERITY_COUNT: usize = 5;

/// Severity of a log record, ordered from most verbose to most severe.
///
/// A `Severity` is used both as the category of a single log call and,
/// via the minimum configured with [`Logger::with`](crate::Logger::with),
/// as a filter. `Fatal` is special: it is never filtered out, so that a
/// terminating condition always leaves a trace (see
/// [`FatalAction`](crate::FatalAction)).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    /// Fine-grained output for following the program flow.
    Trace,
    /// Normal operational messages.
    Info,
    /// Something looks wrong, but the program continues.
    Warn,
    /// An operation failed.
    Error,
    /// The program cannot continue; logging a fatal record runs the
    /// configured [`FatalAction`](crate::FatalAction).
    Fatal,
}

impl Severity {
    pub(crate) const ALL: [Severity; SEVERITY_COUNT] = [
        Severity::Trace,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// The one-letter marker that starts every log line, `"T:"` .. `"F:"`.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Trace => "T:",
            Self::Info => "I:",
            Self::Warn => "W:",
            Self::Error => "E:",
            Self::Fatal => "F:",
        }
    }

    // The console stream this severity reports to when it is enabled.
    pub(crate) fn stream(self) -> Stream {
        match self {
            Self::Trace | Self::Info | Self::Warn => Stream::StdOut,
            Self::Error | Self::Fatal => Stream::StdErr,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trace => "TRACE",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        })
    }
}

impl FromStr for Severity {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_ref() {
            "trace" => Ok(Self::Trace),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            _ => Err(LogError::SeverityParse(s.to_owned())),
        }
    }
}

/// The two console streams a severity can be routed to.
///
/// Trace, Info and Warn report to stdout, Error and Fatal to stderr.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stream {
    /// Standard output.
    StdOut,
    /// Standard error.
    StdErr,
}
