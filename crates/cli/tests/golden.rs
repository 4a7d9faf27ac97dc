//! Golden tests for verifying JSON output format stability
//!
//! These tests pin the JSON shapes the commands emit so scripts that
//! parse them do not break silently.
//!
//! Run with: `cargo test --features golden`

#![cfg(feature = "golden")]

use std::process::Command;

/// Get the path to the ov binary
fn ov_binary() -> String {
    let output = Command::new("cargo")
        .args(["build", "--release", "-p", "ov-cli"])
        .output()
        .expect("Failed to build ov binary");

    if !output.status.success() {
        panic!(
            "Failed to build ov binary: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    env!("CARGO_MANIFEST_DIR").to_string() + "/../../target/release/ov"
}

mod alias_tests {
    use super::*;
    use tempfile::TempDir;

    /// Set up a temporary config directory for isolated testing
    fn setup_test_env() -> TempDir {
        TempDir::new().expect("Failed to create temp dir")
    }

    #[test]
    fn test_alias_list_empty_json() {
        let temp_dir = setup_test_env();
        let config_dir = temp_dir.path().to_str().unwrap();

        let output = Command::new(ov_binary())
            .args(["alias", "list", "--json"])
            .env("OV_CONFIG_DIR", config_dir)
            .output()
            .expect("Failed to execute ov");

        assert!(output.status.success(), "Command should succeed");

        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value =
            serde_json::from_str(&stdout).expect("Output should be valid JSON");

        insta::assert_json_snapshot!("alias_list_empty", json);
    }

    #[test]
    fn test_alias_set_json() {
        let temp_dir = setup_test_env();
        let config_dir = temp_dir.path().to_str().unwrap();

        let output = Command::new(ov_binary())
            .args([
                "alias",
                "set",
                "test-alias",
                "http://localhost:9000",
                "accesskey",
                "secretkey",
                "--json",
            ])
            .env("OV_CONFIG_DIR", config_dir)
            .output()
            .expect("Failed to execute ov");

        assert!(output.status.success(), "Command should succeed");

        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value =
            serde_json::from_str(&stdout).expect("Output should be valid JSON");

        insta::assert_json_snapshot!("alias_set_success", json);
    }

    #[test]
    fn test_alias_list_with_aliases_json() {
        let temp_dir = setup_test_env();
        let config_dir = temp_dir.path().to_str().unwrap();

        Command::new(ov_binary())
            .args([
                "alias",
                "set",
                "local",
                "http://localhost:9000",
                "accesskey",
                "secretkey",
                "--json",
            ])
            .env("OV_CONFIG_DIR", config_dir)
            .output()
            .expect("Failed to set alias");

        Command::new(ov_binary())
            .args([
                "alias",
                "set",
                "s3",
                "https://s3.amazonaws.com",
                "awskey",
                "awssecret",
                "--region",
                "us-west-2",
                "--json",
            ])
            .env("OV_CONFIG_DIR", config_dir)
            .output()
            .expect("Failed to set alias");

        let output = Command::new(ov_binary())
            .args(["alias", "list", "--json"])
            .env("OV_CONFIG_DIR", config_dir)
            .output()
            .expect("Failed to execute ov");

        assert!(output.status.success(), "Command should succeed");

        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value =
            serde_json::from_str(&stdout).expect("Output should be valid JSON");

        // Aliases are persisted sorted by name, so snapshots stay stable
        assert!(json["aliases"].is_array());
        assert_eq!(json["aliases"].as_array().unwrap().len(), 2);

        insta::assert_json_snapshot!("alias_list_with_aliases", json);
    }

    #[test]
    fn test_alias_remove_json() {
        let temp_dir = setup_test_env();
        let config_dir = temp_dir.path().to_str().unwrap();

        Command::new(ov_binary())
            .args([
                "alias",
                "set",
                "to-remove",
                "http://localhost:9000",
                "accesskey",
                "secretkey",
                "--json",
            ])
            .env("OV_CONFIG_DIR", config_dir)
            .output()
            .expect("Failed to set alias");

        let output = Command::new(ov_binary())
            .args(["alias", "remove", "to-remove", "--json"])
            .env("OV_CONFIG_DIR", config_dir)
            .output()
            .expect("Failed to execute ov");

        assert!(output.status.success(), "Command should succeed");

        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value =
            serde_json::from_str(&stdout).expect("Output should be valid JSON");

        insta::assert_json_snapshot!("alias_remove_success", json);
    }

    #[test]
    fn test_alias_remove_not_found_json() {
        let temp_dir = setup_test_env();
        let config_dir = temp_dir.path().to_str().unwrap();

        let output = Command::new(ov_binary())
            .args(["alias", "remove", "nonexistent", "--json"])
            .env("OV_CONFIG_DIR", config_dir)
            .output()
            .expect("Failed to execute ov");

        assert!(!output.status.success(), "Command should fail");
        assert_eq!(
            output.status.code(),
            Some(3),
            "Exit code should be 3 (not found)"
        );

        let stderr = String::from_utf8_lossy(&output.stderr);
        let json: serde_json::Value =
            serde_json::from_str(&stderr).expect("Output should be valid JSON");

        insta::assert_json_snapshot!("alias_remove_not_found", json);
    }
}
