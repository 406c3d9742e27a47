use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "famsim-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_lists_activities() {
    let exe = env!("CARGO_BIN_EXE_famsim-term");
    let output = Command::new(exe)
        .args(["--list-activities", "--locale", "en"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Available activities"));
    assert!(stdout.contains("start_business"));
    assert!(stdout.contains("Rest"));
}

#[test]
fn cli_rejects_unknown_locale() {
    let exe = env!("CARGO_BIN_EXE_famsim-term");
    let output = Command::new(exe)
        .args(["--list-activities", "--locale", "fr"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("fr"));
}

#[test]
fn cli_script_quits_from_start_screen_without_engine() {
    let exe = env!("CARGO_BIN_EXE_famsim-term");
    let script = temp_path("script");
    std::fs::write(&script, "4\n").expect("write script");
    let output = Command::new(exe)
        .args(["--engine-url", "http://127.0.0.1:9", "--script"])
        .arg(&script)
        .env_remove("FAMSIM_ENGINE_URL")
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("家族兴衰模拟"));
    assert!(stdout.contains("再见"));
}

#[test]
fn cli_reports_missing_config() {
    let exe = env!("CARGO_BIN_EXE_famsim-term");
    let output = Command::new(exe)
        .args(["--list-activities", "--config"])
        .arg(temp_path("missing-config"))
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config"));
}
