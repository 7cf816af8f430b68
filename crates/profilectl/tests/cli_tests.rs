use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Runs the binary in an isolated directory with no config or manifest
/// overrides leaking in from the environment.
fn profilectl(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_profilectl"));
    cmd.current_dir(dir.path())
        .env_remove("PROFILECTL_CONFIG")
        .env_remove("PROFILECTL_MANIFEST")
        .env_remove("PROFILECTL_REGION")
        .env_remove("PROFILECTL_AWS_PROFILE")
        .env("AWS_EC2_METADATA_DISABLED", "true");
    cmd
}

#[test]
fn should_exit_with_usage_when_no_action_given() {
    let dir = TempDir::new().unwrap();

    let output = profilectl(&dir).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: profilectl <action> [profile_name]"));
    assert!(stdout.contains("Actions: create, update, delete, list"));
}

#[test]
fn should_fail_when_manifest_is_missing() {
    let dir = TempDir::new().unwrap();

    let output = profilectl(&dir).arg("list").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("profiles.yaml"));
}

#[test]
fn should_succeed_on_unknown_action() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("profiles.yaml"), "apps:\n  - name: foo\n    model_id: m1\n").unwrap();

    let output = profilectl(&dir).arg("purge").output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout)
        .contains("Invalid action. Use: create, update, delete, or list"));
}

#[test]
fn should_succeed_on_delete_without_profile_name() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("profiles.yaml"), "apps: []\n").unwrap();

    let output = profilectl(&dir).arg("delete").output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout)
        .contains("Profile name required for delete action"));
}
