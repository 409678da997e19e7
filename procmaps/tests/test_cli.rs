use std::process::Command;

fn procmaps() -> Command {
    Command::new(env!("CARGO_BIN_EXE_procmaps"))
}

fn own_pid() -> String {
    std::process::id().to_string()
}

#[test]
fn test_lists_own_executable() {
    let output = procmaps().args(["--pid", &own_pid(), "--type", "exe", "--quiet"]).output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.is_empty());
    assert!(stdout.lines().all(|line| line.starts_with("exe")));
}

#[test]
fn test_json_output_is_valid() {
    let output = procmaps().args(["--pid", &own_pid(), "--json"]).output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let regions = parsed.as_array().expect("array of regions");
    assert!(!regions.is_empty());
    assert!(regions.iter().all(|r| r.get("start").is_some() && r.get("type").is_some()));
}

#[test]
fn test_find_address_outside_any_region() {
    let output = procmaps().args(["--pid", &own_pid(), "--find", "0x0", "-q"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No region"));
}

#[test]
fn test_missing_arguments_is_usage_error() {
    let output = procmaps().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unknown_pid() {
    let output = procmaps().args(["--pid", "999999999"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}
