use crate::record::{DeferredNow, Record};

/// Function type for line formatters.
///
/// If you want your log lines in a different shape, implement a function with
/// this signature and hand it to [`Logger::format`](crate::Logger::format).
/// The formatter must not write a trailing newline; the destinations append
/// their own line ending.
pub type FormatFunction = fn(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record<'_>,
) -> Result<(), std::io::Error>;

/// A line formatter that produces lines like<br>
/// ```text
/// I: 2020/03/17 14:03:59 server.rs:144: listening on port 8080
/// ```
/// i.e. severity marker, timestamp, and the file name of the call site.
///
/// # Errors
///
/// See `std::write`
pub fn default_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record<'_>,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}:{}: {}",
        record.severity().marker(),
        now.now().format("%Y/%m/%d %H:%M:%S"),
        short_file(record.file()),
        record.line().unwrap_or(0),
        record.args()
    )
}

/// A line formatter that produces lines like<br>
/// ```text
/// [2020-03-17 14:03:59.081234 +01:00] INFO src/server.rs:144: listening on port 8080
/// ```
/// i.e. with fractional seconds, UTC offset, and the full file path.
///
/// # Errors
///
/// See `std::write`
pub fn detailed_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record<'_>,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] {} {}:{}: {}",
        now.now().format("%Y-%m-%d %H:%M:%S%.6f %:z"),
        record.severity(),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
        record.args()
    )
}

// The last path component of the call site; full paths make the default
// lines too wide.
fn short_file(o_file: Option<&str>) -> &str {
    match o_file {
        None => "<unnamed>",
        Some(f) => f.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(f),
    }
}

#[cfg(test)]
mod test {
    use super::{default_format, detailed_format, short_file};
    use crate::record::{DeferredNow, Record};
    use crate::severity::Severity;

    fn render(
        format: crate::FormatFunction,
        severity: Severity,
        file: Option<&str>,
        line: Option<u32>,
    ) -> String {
        let mut buf = Vec::new();
        format(
            &mut buf,
            &mut DeferredNow::new(),
            &Record::new(severity, format_args!("disk almost full"), file, line),
        )
        .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn default_format_leads_with_marker() {
        let line = render(default_format, Severity::Warn, Some("src/server.rs"), Some(17));
        assert!(line.starts_with("W: "), "got {:?}", line);
        assert!(line.ends_with("server.rs:17: disk almost full"), "got {:?}", line);
    }

    #[test]
    fn default_format_without_location() {
        let line = render(default_format, Severity::Error, None, None);
        assert!(line.starts_with("E: "), "got {:?}", line);
        assert!(line.ends_with("<unnamed>:0: disk almost full"), "got {:?}", line);
    }

    #[test]
    fn detailed_format_keeps_full_path() {
        let line = render(detailed_format, Severity::Info, Some("src/server.rs"), Some(17));
        assert!(line.contains(" INFO src/server.rs:17: "), "got {:?}", line);
    }

    #[test]
    fn short_file_strips_directories() {
        assert_eq!(short_file(Some("src/a/b.rs")), "b.rs");
        assert_eq!(short_file(Some(r"src\a\b.rs")), "b.rs");
        assert_eq!(short_file(Some("b.rs")), "b.rs");
        assert_eq!(short_file(None), "<unnamed>");
    }
}
