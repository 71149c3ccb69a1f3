use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::path::Path;

/// Get a Command for quill that never reads the user's global config
pub fn quill() -> Command {
    let mut cmd = cargo_bin_cmd!("quill");
    cmd.env("QUILL_CONFIG_DIR", std::env::temp_dir().join("quill-tests-no-config"))
        .env_remove("RUST_LOG")
        .env_remove("QUILL_LOG");
    cmd
}

#[allow(dead_code)]
pub fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout should be JSON")
}

#[allow(dead_code)]
pub fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, content).expect("write config");
    path
}
