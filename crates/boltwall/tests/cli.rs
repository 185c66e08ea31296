//! Argument and config-file validation through the real binary.
//!
//! Every case here must fail before a window would open, so the tests stay
//! headless.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn boltwall() -> Command {
    Command::new(env!("CARGO_BIN_EXE_boltwall"))
}

#[test]
fn help_exits_successfully() {
    let output = boltwall().arg("--help").output().expect("failed to run boltwall");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--hue"));
    assert!(stdout.contains("--window-size"));
}

#[test]
fn rejects_malformed_window_size() {
    for bad in ["1280", "0x720", "axb"] {
        let output = boltwall()
            .args(["--window-size", bad])
            .output()
            .expect("failed to run boltwall");
        assert!(!output.status.success(), "size '{bad}' should be rejected");
    }
}

#[test]
fn rejects_missing_config_file() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("nope.toml");

    let output = boltwall()
        .args(["--config", missing.to_str().unwrap()])
        .output()
        .expect("failed to run boltwall");
    assert!(!output.status.success());
}

#[test]
fn rejects_unparseable_config_file() {
    let root = TempDir::new().unwrap();
    let path = root.path().join("boltwall.toml");
    fs::write(&path, "hue = \"electric\"").unwrap();

    let output = boltwall()
        .args(["--config", path.to_str().unwrap()])
        .output()
        .expect("failed to run boltwall");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse config file"));
}
