//! Integration tests for file I/O operations.
//!
//! Tests cover:
//! - Plan save/load round trip
//! - Rejection of malformed plan and metadata files
//! - Rename log format

use episode_renamer::core::planner::{load_plan, save_plan, write_rename_log};
use episode_renamer::models::plan::{Operation, OperationKind, Plan, Validation};
use episode_renamer::services::metadata::load_metadata;
use episode_renamer::Error;
use std::path::PathBuf;
use tempfile::TempDir;

// ========== PLAN I/O TESTS ==========

#[test]
fn test_save_and_load_plan() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("plan.json");

    let plan = Plan {
        id: "0c9c1c74".to_string(),
        created_at: "2026-01-01T00:00:00Z".to_string(),
        series_name: "Show".to_string(),
        operations: vec![Operation {
            kind: OperationKind::Rename,
            source: PathBuf::from("/v/Show.S01E01.mkv"),
            target_name: "Show - S01E01 - Pilot.mkv".to_string(),
            target_folder: PathBuf::from("/v"),
            episode: Some((1, 1)),
        }],
        skip_count: 3,
        special_count: 1,
        unmatched: vec![],
        validation: Validation {
            is_valid: true,
            issues: vec![],
        },
    };

    save_plan(&plan, &path).unwrap();
    let loaded = load_plan(&path).unwrap();

    assert_eq!(loaded.id, plan.id);
    assert_eq!(loaded.series_name, "Show");
    assert_eq!(loaded.skip_count, 3);
    assert_eq!(loaded.operations.len(), 1);
    assert_eq!(loaded.operations[0].kind, OperationKind::Rename);
    assert_eq!(loaded.operations[0].episode, Some((1, 1)));
    assert!(loaded.validation.is_valid);
}

#[test]
fn test_load_plan_rejects_malformed_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("plan.json");
    std::fs::write(&path, "{{ not json").unwrap();

    assert!(matches!(load_plan(&path), Err(Error::InvalidPlanFile(_))));
    assert!(matches!(
        load_plan(&tmp.path().join("missing.json")),
        Err(Error::InvalidPlanFile(_))
    ));
}

// ========== METADATA I/O TESTS ==========

#[test]
fn test_load_metadata_rejects_malformed_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("show.json");
    std::fs::write(&path, "[]").unwrap();

    assert!(matches!(
        load_metadata(&path),
        Err(Error::InvalidMetadataFile(_))
    ));
}

// ========== RENAME LOG TESTS ==========

#[test]
fn test_rename_log_format() {
    let tmp = TempDir::new().unwrap();
    let log_path = tmp.path().join("rename.log");

    let op = Operation {
        kind: OperationKind::Rename,
        source: PathBuf::from("/v/Show.S01E01.mkv"),
        target_name: "Show - S01E01 - Pilot.mkv".to_string(),
        target_folder: PathBuf::from("/v"),
        episode: Some((1, 1)),
    };
    let plan = Plan {
        series_name: "Show".to_string(),
        ..Default::default()
    };

    write_rename_log(&plan, &[&op], &log_path).unwrap();

    let log = std::fs::read_to_string(&log_path).unwrap();
    let mut lines = log.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("# "));
    assert!(header.ends_with("Show"));
    assert_eq!(
        lines.next().unwrap(),
        "/v/Show.S01E01.mkv -> /v/Show - S01E01 - Pilot.mkv"
    );

    // A second run appends rather than truncating.
    write_rename_log(&plan, &[&op], &log_path).unwrap();
    let log = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(log.matches("# ").count(), 2);
}
