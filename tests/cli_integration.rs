//! Integration tests for the plates CLI
//!
//! These tests drive the real binary against a temporary directory file:
//! - add / list / search round trips
//! - move and remove, including soft not-found failures
//! - stats totals
//! - validation of status/category arguments
//! - credential requirements for availability checks

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Helper to get the plates binary path
fn plates_binary() -> PathBuf {
    // When running tests, the binary is in target/debug/plates
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps
    path.push("plates");
    path
}

/// Helper to run plates with an isolated directory
fn run_plates(plates_dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(plates_binary())
        .env("PLATES_DIR", plates_dir)
        .env_remove("PLATES_CONFIG")
        .env_remove("RESY_API_KEY")
        .env_remove("RESY_AUTH_TOKEN")
        .args(args)
        .output()
        .expect("Failed to execute plates")
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn add_lilia(dir: &Path) {
    let output = run_plates(
        dir,
        &[
            "add", "Lilia", "love", "dinner", "--location", "Williamsburg", "--cuisine", "Italian", "--notes",
            "Best pasta",
        ],
    );
    assert!(output.status.success(), "add failed: {:?}", output);
}

#[test]
fn test_add_then_list_round_trip() {
    let temp = TempDir::new().unwrap();
    add_lilia(temp.path());

    let output = run_plates(temp.path(), &["list", "--status", "love", "--category", "dinner", "-o", "json"]);
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(listing["love"]["dinner"][0]["name"], "Lilia");
    assert_eq!(listing["love"]["dinner"][0]["cuisine"], "Italian");
}

#[test]
fn test_remove_then_list_is_empty() {
    let temp = TempDir::new().unwrap();
    add_lilia(temp.path());

    let output = run_plates(temp.path(), &["remove", "lilia"]);
    assert!(output.status.success(), "case-insensitive remove should succeed");

    let output = run_plates(temp.path(), &["list", "-o", "json"]);
    let listing: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert!(listing.get("love").is_none(), "emptied buckets are omitted");

    // Removing again is a not-found failure
    let output = run_plates(temp.path(), &["remove", "Lilia"]);
    assert!(!output.status.success());
}

#[test]
fn test_move_updates_stats_totals() {
    let temp = TempDir::new().unwrap();
    let output = run_plates(temp.path(), &["add", "Mono Mono", "try", "dinner", "--cuisine", "Korean"]);
    assert!(output.status.success());
    add_lilia(temp.path());

    let output = run_plates(temp.path(), &["move", "Mono Mono", "try", "love"]);
    assert!(output.status.success(), "move failed: {:?}", output);

    let output = run_plates(temp.path(), &["stats", "-o", "json"]);
    let stats: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(stats["totals"]["love"], 2);
    assert_eq!(stats["totals"]["try"], 0);
    assert_eq!(stats["totals"]["overall"], 2);
    // Move keeps the category
    assert_eq!(stats["places_we_love"]["dinner"], 2);
}

#[test]
fn test_move_not_found_fails() {
    let temp = TempDir::new().unwrap();
    let output = run_plates(temp.path(), &["move", "Nowhere", "try", "love"]);
    assert!(!output.status.success());
}

#[test]
fn test_search_is_case_insensitive() {
    let temp = TempDir::new().unwrap();
    let output = run_plates(temp.path(), &["add", "Watawa", "love", "dinner", "--cuisine", "Sushi"]);
    assert!(output.status.success());
    add_lilia(temp.path());

    let output = run_plates(temp.path(), &["search", "sushi", "-o", "json"]);
    let results: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    let bucket = results["love"]["dinner"].as_array().unwrap();
    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket[0]["name"], "Watawa");
}

#[test]
fn test_invalid_status_and_category_are_rejected() {
    let temp = TempDir::new().unwrap();

    // Rejected at argument parsing, before any file is written
    let output = run_plates(temp.path(), &["add", "Lilia", "favorite", "dinner"]);
    assert!(!output.status.success());

    let output = run_plates(temp.path(), &["add", "Lilia", "love", "weekend"]);
    assert!(!output.status.success());

    assert!(
        !temp.path().join("restaurant_directory.json").exists(),
        "no write may happen on validation failure"
    );
}

#[test]
fn test_duplicate_names_are_not_rejected() {
    let temp = TempDir::new().unwrap();
    add_lilia(temp.path());
    add_lilia(temp.path());

    let output = run_plates(temp.path(), &["stats", "-o", "json"]);
    let stats: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(stats["totals"]["love"], 2);
}

#[test]
fn test_check_requires_credentials() {
    let temp = TempDir::new().unwrap();
    add_lilia(temp.path());

    let output = run_plates(temp.path(), &["check", "--date", "tomorrow"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    assert!(stderr.contains("RESY_API_KEY"), "should name the missing env vars: {stderr}");
}

#[test]
fn test_stats_on_empty_directory() {
    let temp = TempDir::new().unwrap();
    let output = run_plates(temp.path(), &["stats", "-o", "json"]);
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(stats["totals"]["overall"], 0);
}
