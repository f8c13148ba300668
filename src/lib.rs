#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! Leveled logging to console and/or a file, with size-based rotation into
//! numbered backups.
//!
//! Five severities (Trace, Info, Warn, Error, Fatal) are routed to stdout
//! (Trace/Info/Warn) or stderr (Error/Fatal) depending on a configured
//! minimum, and optionally fanned out to one shared log file. The file is
//! kept below a size threshold by rotating it into `path.1` .. `path.N`
//! backups, `.1` being the youngest; the oldest backup is evicted when the
//! count is exceeded.
//!
//! ```rust
//! use rotolog::{error, info, Logger, Severity};
//!
//! let logger = Logger::with(Severity::Info)
//!     .log_to_file("log_files/doc/lib.log")
//!     .max_size(10_000_000)
//!     .backup_count(3)
//!     .try_build()
//!     .unwrap_or_else(|e| panic!("logger initialization failed with {}", e));
//!
//! info!(logger, "listening on port {}", 8080);
//! error!(logger, "connection lost: {}", "reset by peer");
//! logger.stop().ok();
//! ```
//!
//! There is no hidden global state: [`LogHandle`] is an explicit, cloneable
//! object. Applications that prefer the `log` crate's macros can install the
//! handle as the facade backend with [`Logger::start`].
//!
//! See
//!
//! * [`Logger`] for all configuration options,
//! * [`writers`](writers/index.html) for using the rotating file writer on
//!   its own,
//! * [`RotatePolicy`] and [`FatalAction`] for the failure policies.

mod destination;
mod error;
mod formats;
mod handle;
mod logger;
mod macros;
mod parameters;
mod record;
mod severity;

pub mod writers;

pub use crate::destination::Destination;
pub use crate::error::LogError;
pub use crate::formats::{default_format, detailed_format, FormatFunction};
pub use crate::handle::LogHandle;
pub use crate::logger::Logger;
pub use crate::parameters::{FatalAction, RotatePolicy};
pub use crate::record::{DeferredNow, Record};
pub use crate::severity::{Severity, Stream};
