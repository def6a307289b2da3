use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ttimer(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ttimer").unwrap();
    cmd.env("HOME", home.path()).env_remove("TTIMER_LOG");
    cmd
}

#[test]
fn preview_lists_phases_as_json() {
    let home = TempDir::new().unwrap();
    let output = ttimer(&home)
        .args(["preview", "--work", "1m", "--rest", "15s", "--cycles", "2", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["count"], 4);
    assert_eq!(value["total_ms"], 150_000);
    assert_eq!(value["items"][2]["cycle"], 2);
}

#[test]
fn preview_total_time_stops_mid_phase() {
    let home = TempDir::new().unwrap();
    let output = ttimer(&home)
        .args(["preview", "--work", "1m", "--rest", "15s", "--total", "100s", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["mode"], "total-time");
    assert_eq!(value["total_ms"], 100_000);
    assert_eq!(value["items"][2]["duration_ms"], 25_000);
}

#[test]
fn run_zero_length_phases_completes() {
    let home = TempDir::new().unwrap();
    ttimer(&home)
        .args(["run", "--work", "0s", "--rest", "0s", "--cycles", "3", "--no-bell", "-o", "json"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"event\":\"completed\""))
        .stdout(predicate::str::contains("\"complete\":true"));
}

#[test]
fn run_pretty_prints_phases() {
    let home = TempDir::new().unwrap();
    ttimer(&home)
        .args(["run", "--work", "0s", "--rest", "0s", "--cycles", "1", "--no-bell"])
        .env("NO_COLOR", "1")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Work Time"))
        .stdout(predicate::str::contains("Rest Time"))
        .stdout(predicate::str::contains("Timer complete"));
}

#[test]
fn bad_duration_is_rejected() {
    let home = TempDir::new().unwrap();
    ttimer(&home)
        .args(["run", "--work", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid work duration"));
}

#[test]
fn config_path_is_under_home() {
    let home = TempDir::new().unwrap();
    ttimer(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".ttimer"))
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn config_init_then_show() {
    let home = TempDir::new().unwrap();
    ttimer(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join(".ttimer/config.yaml").exists());

    ttimer(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    ttimer(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("work_seconds: 60"));
}

#[test]
fn config_file_sets_defaults() {
    let home = TempDir::new().unwrap();
    let root = home.path().join(".ttimer");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(
        root.join("config.yaml"),
        "general:\n  default_output: json\ntimer:\n  work_seconds: 30\n  cycles: 2\n",
    )
    .unwrap();

    let output = ttimer(&home).arg("preview").output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["items"][0]["duration_ms"], 30_000);
    assert_eq!(value["count"], 4);
}

#[test]
fn completions_mention_binary() {
    let home = TempDir::new().unwrap();
    ttimer(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ttimer"));
}

#[test]
fn run_countdown_completes() {
    let home = TempDir::new().unwrap();
    ttimer(&home)
        .args(["run", "--kind", "countdown", "--duration", "0s", "--no-bell", "-o", "json"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"event\":\"alert\""))
        .stdout(predicate::str::contains("\"kind\":\"countdown\""))
        .stdout(predicate::str::contains("\"complete\":true"));
}

#[test]
fn run_stopwatch_is_rejected() {
    let home = TempDir::new().unwrap();
    ttimer(&home)
        .args(["run", "--kind", "stopwatch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("never finishes"));
}

#[test]
fn preview_pomodoro_has_long_break() {
    let home = TempDir::new().unwrap();
    let output = ttimer(&home)
        .args(["preview", "-k", "pomodoro", "--work", "25m", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["kind"], "pomodoro");
    assert_eq!(value["count"], 8);
    assert_eq!(value["items"][7]["phase"], "long-break");
    assert_eq!(value["total_ms"], 130 * 60_000);
}

#[test]
fn too_long_duration_is_rejected() {
    let home = TempDir::new().unwrap();
    ttimer(&home)
        .args(["preview", "--work", "999999999999999999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid work duration"));
    ttimer(&home)
        .args(["preview", "--total", "2000h"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too long"));
}
