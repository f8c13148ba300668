use crate::error::LogError;
use crate::parameters::RotatePolicy;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

const DEFAULT_MAX_SIZE: u64 = 1024 * 1024 * 1024;
const DEFAULT_BACKUP_COUNT: usize = 10;

// The handle behind the writer's mutex.
enum Inner {
    Open(File),
    // A rotation closed the old handle and the reopen failed;
    // the next write retries the reopen.
    Detached,
    Closed,
}

/// Writes to a file and keeps it below a size threshold by rotating it into
/// numbered backups.
///
/// The file at the configured path is always the current segment. A write
/// that finds it at or above the threshold first shifts the backups:
/// `path.i` is renamed to `path.(i+1)` for i from `backup_count`-1 down
/// to 1, then `path` becomes `path.1` and a fresh file is opened at `path`.
/// `path.1` is therefore the youngest backup and `path.N` the oldest; the
/// shift onto an existing `path.N` replaces it, which bounds the disk usage
/// to `backup_count` + 1 segments.
///
/// With `backup_count` 0 no rotation ever happens and the file grows without
/// bound; callers that do not want backups accept that.
///
/// The whole stat-rotate-append sequence runs under a mutex, so concurrent
/// writers cannot both act on the same threshold crossing.
pub struct RotatingFileWriter {
    path: PathBuf,
    max_size: u64,
    backup_count: usize,
    policy: RotatePolicy,
    inner: Mutex<Inner>,
}

impl RotatingFileWriter {
    /// Instantiates a builder for a `RotatingFileWriter`.
    pub fn builder<P: Into<PathBuf>>(path: P) -> RotatingFileWriterBuilder {
        RotatingFileWriterBuilder::new(path.into())
    }

    fn try_new(
        path: PathBuf,
        max_size: u64,
        backup_count: usize,
        policy: RotatePolicy,
    ) -> Result<Self, LogError> {
        if max_size == 0 {
            return Err(LogError::InvalidMaxSize);
        }
        if let Some(directory) = path.parent() {
            // best-effort; a directory that is really missing surfaces
            // from the open below
            std::fs::create_dir_all(directory).ok();
        }
        let file = open_append(&path)?;
        Ok(Self {
            path,
            max_size,
            backup_count,
            policy,
            inner: Mutex::new(Inner::Open(file)),
        })
    }

    /// The path of the current segment.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `buf`, rotating first when the current segment has reached
    /// the threshold.
    ///
    /// # Errors
    ///
    /// The append's own error, a failed reopen after a rotation, or, under
    /// [`RotatePolicy::Strict`](crate::RotatePolicy::Strict), the first
    /// failing rename of the rotation.
    pub fn write(&self, buf: &[u8]) -> io::Result<()> {
        let mut guard = lock(&self.inner);
        if let Inner::Detached = *guard {
            *guard = Inner::Open(open_append(&self.path)?);
        }
        self.rotate_if_over_threshold(&mut guard)?;
        match *guard {
            Inner::Open(ref mut file) => file.write_all(buf),
            Inner::Detached | Inner::Closed => Err(closed_error()),
        }
    }

    // Checks the threshold and performs the backup shift.
    //
    // Stat failures skip the rotation: logging availability wins, and a file
    // that really went away surfaces from the append itself. Rename failures
    // are handled per the configured policy.
    fn rotate_if_over_threshold(&self, inner: &mut Inner) -> io::Result<()> {
        let size = match *inner {
            Inner::Open(ref file) => match file.metadata() {
                Ok(metadata) => metadata.len(),
                Err(_) => return Ok(()),
            },
            Inner::Detached | Inner::Closed => return Ok(()),
        };
        if size < self.max_size || self.backup_count == 0 {
            return Ok(());
        }

        // close before renaming; not every platform renames an open file
        *inner = Inner::Detached;
        self.shift_backups()?;
        let file = open_append(&self.path)?;
        *inner = Inner::Open(file);
        Ok(())
    }

    fn shift_backups(&self) -> io::Result<()> {
        for i in (1..self.backup_count).rev() {
            self.shift(&self.backup_path(i), &self.backup_path(i + 1))?;
        }
        self.shift(&self.path, &self.backup_path(1))
    }

    fn shift(&self, from: &Path, to: &Path) -> io::Result<()> {
        match std::fs::rename(from, to) {
            Ok(()) => Ok(()),
            // a source that does not exist yet is normal early on
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => match self.policy {
                RotatePolicy::BestEffort => {
                    eprintln!(
                        "[rotolog] renaming {:?} to {:?} failed with {}",
                        from, to, e
                    );
                    Ok(())
                }
                RotatePolicy::Strict => Err(e),
            },
        }
    }

    fn backup_path(&self, idx: usize) -> PathBuf {
        let mut os = self.path.clone().into_os_string();
        os.push(format!(".{}", idx));
        PathBuf::from(os)
    }

    // Lets the fan-out skip the file leg after a close instead of reporting
    // an error on every subsequent call.
    pub(crate) fn is_closed(&self) -> bool {
        matches!(*lock(&self.inner), Inner::Closed)
    }

    /// Flushes the current segment.
    ///
    /// # Errors
    ///
    /// `std::io::Error`
    pub fn flush(&self) -> io::Result<()> {
        let mut guard = lock(&self.inner);
        match *guard {
            Inner::Open(ref mut file) => file.flush(),
            Inner::Detached | Inner::Closed => Ok(()),
        }
    }

    /// Asks the OS to persist the current segment to disk.
    /// Used by the fatal path, where the process is about to terminate.
    ///
    /// # Errors
    ///
    /// `std::io::Error`
    pub fn sync(&self) -> io::Result<()> {
        let guard = lock(&self.inner);
        match *guard {
            Inner::Open(ref file) => file.sync_all(),
            Inner::Detached | Inner::Closed => Ok(()),
        }
    }

    /// Flushes and releases the file handle. Subsequent writes fail;
    /// a second `close` is a no-op.
    ///
    /// # Errors
    ///
    /// The final flush's error.
    pub fn close(&self) -> io::Result<()> {
        let mut guard = lock(&self.inner);
        match std::mem::replace(&mut *guard, Inner::Closed) {
            Inner::Open(mut file) => file.flush(),
            Inner::Detached | Inner::Closed => Ok(()),
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "the log file writer is closed")
}

// Poisoning cannot corrupt the handle, only leave a partially rotated
// set of backups behind; keep logging.
fn lock(mutex: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Builder for [`RotatingFileWriter`](struct.RotatingFileWriter.html).
#[allow(clippy::module_name_repetitions)]
pub struct RotatingFileWriterBuilder {
    path: PathBuf,
    max_size: u64,
    backup_count: usize,
    policy: RotatePolicy,
}

impl RotatingFileWriterBuilder {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            max_size: DEFAULT_MAX_SIZE,
            backup_count: DEFAULT_BACKUP_COUNT,
            policy: RotatePolicy::default(),
        }
    }

    /// The rotation threshold in bytes; must be greater than zero.
    /// The default is 1 GiB.
    #[must_use]
    pub fn max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// How many numbered backups to keep; older ones are evicted by the
    /// backup shift. 0 disables rotation entirely and lets the file grow
    /// without bound. The default is 10.
    #[must_use]
    pub fn backup_count(mut self, backup_count: usize) -> Self {
        self.backup_count = backup_count;
        self
    }

    /// How rename failures during a rotation are handled.
    /// The default is [`RotatePolicy::BestEffort`](crate::RotatePolicy::BestEffort).
    #[must_use]
    pub fn rotate_policy(mut self, policy: RotatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Produces the writer, creating the containing directory if necessary
    /// and opening the file for append.
    ///
    /// # Errors
    ///
    /// `LogError::InvalidMaxSize` or `LogError::Io`.
    pub fn try_build(self) -> Result<RotatingFileWriter, LogError> {
        RotatingFileWriter::try_new(self.path, self.max_size, self.backup_count, self.policy)
    }
}
