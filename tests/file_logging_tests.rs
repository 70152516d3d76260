//! `--log` output: everything goes through the writer thread into a file.
//!
//! The file channel is process-global, so this file holds a single test.

use clockhand::logger::Log;
use clockhand::{log_block_start, log_indented, log_version, log_warning};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_file_logging_writes_plain_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("clockhand-simulation.log");

    assert!(!Log::is_file_logging());
    let guard = Log::start_file_logging(path.to_string_lossy().into_owned()).unwrap();
    assert!(Log::is_file_logging());

    log_version!();
    log_block_start!("Simulation Mode");
    log_indented!("Time acceleration: {}x", 60);
    log_warning!("tick sound unavailable: {}", "no device");

    // Dropping the guard flushes and joins the writer
    drop(guard);

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("┏ clockhand v"));
    assert!(content.contains("┃\n┣ Simulation Mode\n"));
    assert!(content.contains("┃   Time acceleration: 60x\n"));
    assert!(content.contains("┣[WARNING] tick sound unavailable: no device\n"));
    assert!(!content.contains('\x1b'));

    // A second redirect in the same process is refused
    assert!(Log::start_file_logging(path.to_string_lossy().into_owned()).is_err());
}
