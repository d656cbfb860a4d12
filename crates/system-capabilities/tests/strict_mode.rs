mod common;

use std::fs;

use disk_inventory_api_types::MethodCall;
use serde_json::json;
use system_capabilities::{FailureMode, InventoryError, Operation, OperationOutput, PathParams};

use common::{error_code, path_call, strict_service, success_value};

#[test]
fn test_strict_mode_reports_read_failures() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let service = strict_service();
    assert_eq!(service.failure_mode(), FailureMode::Strict);

    let reply = service.handle(path_call("readFile", &dir.path().join("nope.txt")));

    assert_eq!(error_code(&reply), "PATH_NOT_FOUND");
}

#[test]
fn test_strict_mode_reports_missing_parent() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let file = dir.path().join("a").join("b").join("c.txt");

    let reply = strict_service().handle(path_call("createFile", &file).with_argument("content", "x"));

    assert_eq!(error_code(&reply), "PATH_NOT_FOUND");
}

#[test]
fn test_strict_mode_reports_metadata_kind_mismatch() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let file = dir.path().join("plain.txt");
    fs::write(&file, "x").expect("write file");
    let service = strict_service();

    assert_eq!(
        error_code(&service.handle(path_call("getFolderMetadata", &file))),
        "NOT_A_DIRECTORY"
    );
    assert_eq!(
        error_code(&service.handle(path_call("getFileMetadata", dir.path()))),
        "NOT_A_FILE"
    );
}

#[test]
fn test_strict_mode_keeps_listing_code() {
    let dir = tempfile::tempdir().expect("create temp dir");

    let reply = strict_service().handle(path_call("listDirectory", &dir.path().join("missing")));

    assert_eq!(error_code(&reply), "DIRECTORY_LIST_ERROR");
}

#[test]
fn test_strict_mode_reports_empty_directory_path() {
    let reply = strict_service().handle(MethodCall::new("createDirectory").with_argument("path", ""));

    assert_eq!(error_code(&reply), "PATH_NOT_FOUND");
}

#[test]
fn test_strict_mode_success_is_unchanged() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let file = dir.path().join("ok.txt");
    let service = strict_service();

    let reply = service.handle(path_call("writeFile", &file).with_argument("content", "ok"));
    assert_eq!(success_value(&reply), &json!(true));

    let existing = service.handle(path_call("createDirectory", dir.path()));
    assert_eq!(success_value(&existing), &json!(false));
}

#[test]
fn test_execute_returns_typed_errors() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let missing = dir.path().join("missing").to_string_lossy().into_owned();
    let service = strict_service();

    let err = service
        .execute(Operation::ListDirectory(PathParams { path: missing.clone() }))
        .expect_err("listing a missing directory fails");
    assert!(matches!(err, InventoryError::DirectoryList(_)));

    let err = service
        .execute(Operation::DeleteFile(PathParams { path: missing }))
        .expect_err("deleting a missing file fails");
    assert!(matches!(err, InventoryError::FileSystem(_)));

    let output = service
        .execute(Operation::GetPlatformVersion)
        .expect("platform version never fails");
    assert_eq!(output, OperationOutput::Text("Windows 10+".to_string()));
}
