use log_tally::config::PipelineConfig;
use log_tally::pipeline::entry::Level;
use log_tally::pipeline::sink::Destination;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

/// Helper to create a sample log with a mix of levels and noise
fn create_sample_log() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let mut file = fs::File::create(&path).unwrap();

    let lines = [
        "t=100 lvl=INFO service started",
        "t=100 lvl=ERROR cache miss storm",
        "t=101 lvl=ERROR upstream timeout",
        "t=101 lvl=ERROR upstream timeout",
        "t=101 lvl=WARN slow query",
        "t=102 lvl=WARNING disk 91% full",
        "### rotated ###",
        "t=099 lvl=ERROR late arrival",
    ];
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();

    (dir, path)
}

#[test]
fn test_count_command_to_file() {
    use log_tally::commands::count;

    let (dir, log) = create_sample_log();
    let output = dir.path().join("out").join("errors.txt");
    let config = PipelineConfig::new(Level::Error, Destination::File(output.clone()));

    let summary = count::run(&[log.to_str().unwrap().to_string()], &config).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "99 1\n100 1\n101 2\n"
    );
    assert_eq!(summary.lines, 8);
    assert_eq!(summary.invalid, 1);
    assert_eq!(summary.matched, 4);
    assert_eq!(summary.lines_written, 3);
}

#[test]
fn test_count_command_warn_level_with_threads() {
    use log_tally::commands::count;

    let (dir, log) = create_sample_log();
    let output = dir.path().join("warn.txt");
    let mut config = PipelineConfig::new(Level::Warn, Destination::File(output.clone()));
    config.threads = Some(2);
    config.chunk_size = 3;

    count::run(&[log.to_str().unwrap().to_string()], &config).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "101 1\n102 1\n");
}

#[test]
fn test_count_command_to_stdout() {
    use log_tally::commands::count;

    let (_dir, log) = create_sample_log();
    let config = PipelineConfig::new(Level::Info, Destination::Stdout);

    let summary = count::run(&[log.to_str().unwrap().to_string()], &config).unwrap();

    assert_eq!(summary.lines_written, 1);
}

#[test]
fn test_stdout_bytes_match_file_output() {
    use log_tally::commands::count;
    use log_tally::pipeline::sink::emit_to_writer;
    use log_tally::pipeline::Pipeline;
    use log_tally::utils::progress::ProgressBar;

    let (dir, log) = create_sample_log();
    let output = dir.path().join("errors.txt");
    let config = PipelineConfig::new(Level::Error, Destination::File(output.clone()));
    let file_summary = count::run(&[log.to_str().unwrap().to_string()], &config).unwrap();

    // same pipeline, console path captured in memory
    let (tally, _) = Pipeline::<i64>::new(Level::Error)
        .tally_files(&[&log], &ProgressBar::hidden())
        .unwrap();
    let mut console = Vec::new();
    let console_lines = emit_to_writer(&tally, &mut console, &Destination::Stdout).unwrap();

    assert_eq!(console_lines, file_summary.lines_written);
    assert_eq!(console, fs::read(&output).unwrap());
}

#[test]
fn test_count_command_with_invalid_file() {
    use log_tally::commands::count;

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("errors.txt");
    let config = PipelineConfig::new(Level::Error, Destination::File(output.clone()));

    let result = count::run(&["/nonexistent/file.log".to_string()], &config);

    assert!(result.is_err());
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("/nonexistent/file.log"));
    assert!(!output.exists());
}

#[test]
fn test_count_command_with_empty_file() {
    use log_tally::commands::count;

    let empty = NamedTempFile::new().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("errors.txt");
    let config = PipelineConfig::new(Level::Error, Destination::File(output.clone()));

    let summary = count::run(&[empty.path().to_str().unwrap().to_string()], &config).unwrap();

    assert_eq!(summary.lines, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn test_count_command_writes_report() {
    use log_tally::commands::count;

    let (dir, log) = create_sample_log();
    let report = dir.path().join("report.json");
    let mut config = PipelineConfig::new(Level::Error, Destination::File(dir.path().join("e.txt")));
    config.report = Some(report.clone());

    count::run(&[log.to_str().unwrap().to_string()], &config).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();
    assert_eq!(json["files"], 1);
    assert_eq!(json["valid"], 7);
    assert_eq!(json["distinct_keys"], 3);
    assert_eq!(json["lines_written"], 3);
}

#[test]
fn test_levels_command() {
    use log_tally::commands::levels;

    let (dir, log) = create_sample_log();
    let output = dir.path().join("levels.txt");

    let summary = levels::run(
        &[log.to_str().unwrap().to_string()],
        Some(output.to_str().unwrap()),
        None,
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "INFO 1\nWARN 2\nERROR 4\n"
    );
    assert_eq!(summary.distinct_keys, 3);
}
