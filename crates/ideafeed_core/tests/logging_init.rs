// Logging init touches process-global state, so every scenario lives in
// this one test binary and runs against the same directory.

use ideafeed_core::{init_logging, logging_status};

#[test]
fn init_is_idempotent_for_same_config_and_rejects_conflicts() {
    let log_dir = tempfile::tempdir().unwrap();
    let log_dir_str = log_dir.path().to_str().unwrap().to_string();
    let other_dir = tempfile::tempdir().unwrap();
    let other_dir_str = other_dir.path().to_str().unwrap().to_string();

    init_logging("info", &log_dir_str).expect("first init should succeed");
    init_logging("info", &log_dir_str).expect("same config should be idempotent");

    let level_error =
        init_logging("debug", &log_dir_str).expect_err("level conflict should fail");
    assert!(level_error.contains("refusing to switch"));

    let dir_error =
        init_logging("info", &other_dir_str).expect_err("directory conflict should fail");
    assert!(dir_error.contains("refusing to switch"));

    let (active_level, active_dir) = logging_status().expect("logging should be active");
    assert_eq!(active_level, "info");
    assert_eq!(active_dir, log_dir.path());

    // The startup events land in a rotating file under the log directory.
    let wrote_log_file = std::fs::read_dir(log_dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .any(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with("ideafeed")
        });
    assert!(wrote_log_file, "expected an ideafeed log file");
}
