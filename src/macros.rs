//! The per-severity logging macros.
//!
//! Each takes a [`LogHandle`](crate::LogHandle) (or anything with a `log`
//! method accepting a [`Record`](crate::Record)) as its first argument and a
//! format string with arguments, and captures the call site's `file!()` and
//! `line!()` for the source location in the log line.

/// Logs a formatted message at Trace severity.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log(&$crate::Record::new(
            $crate::Severity::Trace,
            format_args!($($arg)+),
            Some(file!()),
            Some(line!()),
        ))
    };
}

/// Logs a formatted message at Info severity.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log(&$crate::Record::new(
            $crate::Severity::Info,
            format_args!($($arg)+),
            Some(file!()),
            Some(line!()),
        ))
    };
}

/// Logs a formatted message at Warn severity.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log(&$crate::Record::new(
            $crate::Severity::Warn,
            format_args!($($arg)+),
            Some(file!()),
            Some(line!()),
        ))
    };
}

/// Logs a formatted message at Error severity.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log(&$crate::Record::new(
            $crate::Severity::Error,
            format_args!($($arg)+),
            Some(file!()),
            Some(line!()),
        ))
    };
}

/// Logs a formatted message at Fatal severity, then runs the configured
/// [`FatalAction`](crate::FatalAction), which by default terminates the
/// process with exit code 255 after flushing and syncing the log file.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log(&$crate::Record::new(
            $crate::Severity::Fatal,
            format_args!($($arg)+),
            Some(file!()),
            Some(line!()),
        ))
    };
}
