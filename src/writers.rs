//! Contains the writer for the file leg of the fan-out,
//! [`RotatingFileWriter`](struct.RotatingFileWriter.html).
//!
//! The logger owns at most one such writer (see
//! [`Logger::log_to_file`](../struct.Logger.html#method.log_to_file)),
//! but the writer can also be built and used standalone when an application
//! wants size-bounded files without the leveled routing:
//!
//! ```rust
//! use rotolog::writers::RotatingFileWriter;
//!
//! let writer = RotatingFileWriter::builder("log_files/doc/standalone.log")
//!     .max_size(10_000_000)
//!     .backup_count(3)
//!     .try_build()
//!     .unwrap();
//! writer.write(b"one line\n").unwrap();
//! ```

mod rotating_file_writer;

pub use self::rotating_file_writer::{RotatingFileWriter, RotatingFileWriterBuilder};
