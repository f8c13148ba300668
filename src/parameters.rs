use std::fmt;
use std::sync::Arc;

/// How rename failures during a rotation are handled.
///
/// Used in [`Logger::rotate_policy`](crate::Logger::rotate_policy) and
/// [`RotatingFileWriterBuilder::rotate_policy`](crate::writers::RotatingFileWriterBuilder::rotate_policy).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RotatePolicy {
    /// A rename step that fails is reported to stderr and skipped, and the
    /// rest of the rotation proceeds; a skipped step can leave one backup
    /// stale. Logging itself stays available. This is the default.
    BestEffort,
    /// The first failing rename aborts the rotation, and the error is
    /// returned from the write that triggered it.
    Strict,
}

impl Default for RotatePolicy {
    fn default() -> Self {
        Self::BestEffort
    }
}

/// What logging a [`Fatal`](crate::Severity::Fatal) record does after the
/// record has been written and the log file synced.
///
/// Used in [`Logger::fatal_action`](crate::Logger::fatal_action).
#[derive(Clone)]
pub enum FatalAction {
    /// Terminate the process with the given exit code.
    /// `Exit(255)` is the default.
    Exit(i32),
    /// Run the given closure instead of terminating.
    ///
    /// Process termination cannot be observed from within a test, so tests
    /// inject a handler and assert that it ran.
    Handler(Arc<dyn Fn() + Send + Sync>),
}

impl FatalAction {
    pub(crate) fn run(&self) {
        match self {
            Self::Exit(code) => std::process::exit(*code),
            Self::Handler(f) => f(),
        }
    }
}

impl Default for FatalAction {
    fn default() -> Self {
        Self::Exit(255)
    }
}

impl fmt::Debug for FatalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit(code) => write!(f, "Exit({})", code),
            Self::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}
