//! Work-log upload, listing, and review

mod common;

use http::StatusCode;
use serde_json::json;

use common::{login, multipart_body, multipart_request, request, test_app};

const BOUNDARY: &str = "------------------------worklogtest";
const SIGNATURE: &str = "data:image/png;base64,iVBORw0KGgo=";

#[tokio::test]
async fn test_upload_stores_file_and_record() {
    let harness = test_app();
    let token = login(&harness.app, "employee1").await;

    let body = multipart_body(
        BOUNDARY,
        &[
            ("file", Some("week-35.pdf"), b"%PDF-1.4 weekly log".as_slice()),
            ("signatureDataUrl", None, SIGNATURE.as_bytes()),
        ],
    );
    let (status, response) =
        multipart_request(&harness.app, "/api/worklogs", &token, BOUNDARY, body).await;

    assert_eq!(status, StatusCode::CREATED, "upload failed: {response}");
    assert!(response["data"]["id"].as_str().is_some());
    let file_path = response["data"]["filePath"].as_str().unwrap();
    assert!(file_path.ends_with("week-35.pdf"));
    assert_eq!(harness.state.blob_store().count().unwrap(), 1);

    // visible to a reviewer, joined with the uploader's display name
    let manager = login(&harness.app, "manager1").await;
    let (status, listing) =
        request(&harness.app, "GET", "/api/worklogs", Some(&manager), None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = listing["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], json!("Pending"));
    assert_eq!(rows[0]["fileName"], json!("week-35.pdf"));
    assert_eq!(rows[0]["uploaderName"], json!("김철수"));
}

#[tokio::test]
async fn test_missing_signature_stores_nothing() {
    let harness = test_app();
    let token = login(&harness.app, "employee1").await;

    let body = multipart_body(
        BOUNDARY,
        &[("file", Some("week-35.pdf"), b"%PDF-1.4".as_slice())],
    );
    let (status, response) =
        multipart_request(&harness.app, "/api/worklogs", &token, BOUNDARY, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        response["details"]
            .as_object()
            .unwrap()
            .contains_key("signatureDataUrl")
    );

    // no orphaned blob, no record
    assert_eq!(harness.state.blob_store().count().unwrap(), 0);
    let manager = login(&harness.app, "manager1").await;
    let (_, listing) = request(&harness.app, "GET", "/api/worklogs", Some(&manager), None).await;
    assert!(listing["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_file_rejected() {
    let harness = test_app();
    let token = login(&harness.app, "employee1").await;

    let body = multipart_body(BOUNDARY, &[("signatureDataUrl", None, SIGNATURE.as_bytes())]);
    let (status, response) =
        multipart_request(&harness.app, "/api/worklogs", &token, BOUNDARY, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["details"].as_object().unwrap().contains_key("file"));
    assert_eq!(harness.state.blob_store().count().unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_signature_mime_rejected() {
    let harness = test_app();
    let token = login(&harness.app, "employee1").await;

    let body = multipart_body(
        BOUNDARY,
        &[
            ("file", Some("week-35.pdf"), b"%PDF-1.4".as_slice()),
            ("signatureDataUrl", None, b"data:image/gif;base64,QUJD".as_slice()),
        ],
    );
    let (status, _) =
        multipart_request(&harness.app, "/api/worklogs", &token, BOUNDARY, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(harness.state.blob_store().count().unwrap(), 0);
}

#[tokio::test]
async fn test_listing_requires_reviewer_role() {
    let harness = test_app();
    let employee = login(&harness.app, "employee1").await;

    let (status, _) = request(&harness.app, "GET", "/api/worklogs", Some(&employee), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_review_updates_status() {
    let harness = test_app();
    let employee = login(&harness.app, "employee1").await;
    let manager = login(&harness.app, "manager1").await;

    let body = multipart_body(
        BOUNDARY,
        &[
            ("file", Some("week-35.pdf"), b"%PDF-1.4".as_slice()),
            ("signatureDataUrl", None, SIGNATURE.as_bytes()),
        ],
    );
    let (_, response) =
        multipart_request(&harness.app, "/api/worklogs", &employee, BOUNDARY, body).await;
    let id = response["data"]["id"].as_str().unwrap();

    let (status, body) = request(
        &harness.app,
        "PUT",
        &format!("/api/worklogs/{id}/status"),
        Some(&manager),
        Some(json!({ "status": "Approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("Approved"));

    // work-log review is a plain overwrite, re-review is allowed
    let (status, body) = request(
        &harness.app,
        "PUT",
        &format!("/api/worklogs/{id}/status"),
        Some(&manager),
        Some(json!({ "status": "Rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("Rejected"));
}

#[tokio::test]
async fn test_unknown_work_log_id_is_not_found() {
    let harness = test_app();
    let manager = login(&harness.app, "manager1").await;
    let id = uuid::Uuid::new_v4();

    let (status, _) = request(
        &harness.app,
        "PUT",
        &format!("/api/worklogs/{id}/status"),
        Some(&manager),
        Some(json!({ "status": "Approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_employee_cannot_review_work_logs() {
    let harness = test_app();
    let employee = login(&harness.app, "employee1").await;
    let id = uuid::Uuid::new_v4();

    // role check comes before the existence check
    let (status, _) = request(
        &harness.app,
        "PUT",
        &format!("/api/worklogs/{id}/status"),
        Some(&employee),
        Some(json!({ "status": "Approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
