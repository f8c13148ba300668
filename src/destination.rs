use crate::formats::FormatFunction;
use crate::record::{DeferredNow, Record};
use crate::severity::Stream;
use crate::writers::RotatingFileWriter;
use std::cell::RefCell;
use std::io::{self, Write};

/// Where records of one severity go.
///
/// One descriptor per severity is computed when the logger is built and never
/// changes afterwards: a severity is either discarded, printed to its console
/// stream, or printed to its console stream and fanned out to the shared
/// rotating file writer. Severities without a console stream never reach the
/// file either.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Destination {
    console: Option<Stream>,
    file: bool,
}

impl Destination {
    pub(crate) const DISCARD: Destination = Destination {
        console: None,
        file: false,
    };

    pub(crate) fn console(stream: Stream, file: bool) -> Self {
        Self {
            console: Some(stream),
            file,
        }
    }

    /// The console stream this destination prints to, if any.
    #[must_use]
    pub fn console_stream(&self) -> Option<Stream> {
        self.console
    }

    /// True if records are additionally fanned out to the rotating file
    /// writer.
    #[must_use]
    pub fn writes_to_file(&self) -> bool {
        self.file
    }

    /// True if records of this severity are dropped entirely.
    #[must_use]
    pub fn is_discard(&self) -> bool {
        self.console.is_none()
    }
}

pub(crate) fn write_to_console(
    stream: Stream,
    format: FormatFunction,
    now: &mut DeferredNow,
    record: &Record<'_>,
) -> io::Result<()> {
    match stream {
        Stream::StdOut => write_buffered(format, now, record, &mut io::stdout()),
        Stream::StdErr => write_buffered(format, now, record, &mut io::stderr()),
    }
}

pub(crate) fn write_to_file(
    writer: &RotatingFileWriter,
    format: FormatFunction,
    now: &mut DeferredNow,
    record: &Record<'_>,
) -> io::Result<()> {
    write_buffered(format, now, record, &mut FileLeg(writer))
}

// Lets the rotating writer take the place of a console stream, so both legs
// of the fan-out share write_buffered.
struct FileLeg<'a>(&'a RotatingFileWriter);

impl Write for FileLeg<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf).map(|()| buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

// Formats into a thread-local buffer before handing the whole line to the
// target, so that one log line arrives in one write.
fn write_buffered(
    format: FormatFunction,
    now: &mut DeferredNow,
    record: &Record<'_>,
    w: &mut dyn Write,
) -> io::Result<()> {
    let mut result = Ok(());
    buffer_with(|tl_buf| match tl_buf.try_borrow_mut() {
        Ok(mut buffer) => {
            (format)(&mut *buffer, now, record).unwrap_or_else(|e| write_err(ERR_FORMATTING, &e));
            buffer
                .write_all(b"\n")
                .unwrap_or_else(|e| write_err(ERR_FORMATTING, &e));
            result = w.write_all(&buffer);
            buffer.clear();
        }
        Err(_e) => {
            // recursive logging, e.g. log calls in a Display implementation;
            // the inner calls land first, in chronological order
            let mut tmp_buf = Vec::<u8>::with_capacity(200);
            (format)(&mut tmp_buf, now, record).unwrap_or_else(|e| write_err(ERR_FORMATTING, &e));
            tmp_buf
                .write_all(b"\n")
                .unwrap_or_else(|e| write_err(ERR_FORMATTING, &e));
            result = w.write_all(&tmp_buf);
        }
    });
    result
}

fn buffer_with<F>(f: F)
where
    F: FnOnce(&RefCell<Vec<u8>>),
{
    thread_local! {
        static BUFFER: RefCell<Vec<u8>> = RefCell::new(Vec::with_capacity(200));
    }
    BUFFER.with(f);
}

const ERR_FORMATTING: &str = "formatting failed";

pub(crate) fn write_err(msg: &str, err: &io::Error) {
    eprintln!("[rotolog] {} with {}", msg, err);
}
