use chrono::Local;
use glob::glob;
use rotolog::{trace, Logger, Severity};
use std::path::PathBuf;

const NO_OF_THREADS: usize = 5;
const NO_OF_LINES_PER_THREAD: usize = 100;

// Writes from several threads through clones of one handle, with a threshold
// small enough to rotate constantly and a backup count large enough that
// nothing is evicted; every line must come out whole and none may be lost.
#[test]
fn test_multi_threaded_writes() {
    let path = define_log_path();
    let logger = Logger::with(Severity::Trace)
        .log_to_file(&path)
        .max_size(200)
        .backup_count(1000)
        .try_build()
        .unwrap();

    let mut worker_handles = Vec::with_capacity(NO_OF_THREADS);
    for thread_number in 0..NO_OF_THREADS {
        let logger = logger.clone();
        worker_handles.push(std::thread::spawn(move || {
            for idx in 0..NO_OF_LINES_PER_THREAD {
                trace!(logger, "thread {} line {}", thread_number, idx);
            }
        }));
    }
    for worker_handle in worker_handles {
        worker_handle.join().unwrap();
    }
    logger.stop().unwrap();

    verify_segments(&path);
}

fn define_log_path() -> PathBuf {
    let mut path = PathBuf::from("log_files/multi_threaded");
    path.push(format!(
        "mt-{}.log",
        Local::now().format("%Y-%m-%d_%H-%M-%S%.6f")
    ));
    path
}

fn verify_segments(path: &PathBuf) {
    let mut segments: Vec<PathBuf> = glob(&format!("{}.[0-9]*", path.display()))
        .unwrap()
        .filter_map(Result::ok)
        .collect();
    segments.push(path.clone());

    let mut total_line_count = 0;
    for segment in &segments {
        let text = std::fs::read_to_string(segment).unwrap();
        assert!(
            text.is_empty() || text.ends_with('\n'),
            "segment {:?} ends mid-line",
            segment
        );
        for line in text.lines() {
            assert!(line.starts_with("T: "), "torn or foreign line {:?}", line);
            assert!(line.contains(" line "), "torn line {:?}", line);
            total_line_count += 1;
        }
    }

    assert_eq!(
        total_line_count,
        NO_OF_THREADS * NO_OF_LINES_PER_THREAD,
        "lines were lost across {} segments",
        segments.len()
    );
}
