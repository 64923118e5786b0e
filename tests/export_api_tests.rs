
use reqwest::{header, StatusCode};
use serde_json::{json, Value};
use test_utils::*;

async fn populated_resume(app: &TestApp, owner: &TestUser) -> i64 {
    let resume = app.create_resume(owner, "Senior Backend").await;

    app.create_section(owner, "experience", json!({
        "resume_id": resume,
        "company": "Acme",
        "position": "Staff Engineer",
        "start_date": "2021-03-01",
        "is_current": true,
        "description": "Led the billing rewrite\nCut p99 latency in half"
    })).await;
    app.create_section(owner, "education", json!({
        "resume_id": resume,
        "school": "University of Lagos",
        "degree": "BSc Computer Science",
        "start_date": "2012-09-01",
        "end_date": "2016-07-01",
        "gpa": 3.8
    })).await;
    app.create_section(owner, "skills", json!({
        "resume_id": resume,
        "name": "Rust",
        "category": "Languages",
        "level": "expert"
    })).await;
    app.create_section(owner, "skills", json!({
        "resume_id": resume,
        "name": "Go",
        "category": "Languages"
    })).await;

    resume
}

#[actix_rt::test]
async fn bundle_is_ordered_and_stable_across_reads() {
    let app = TestApp::spawn().await;
    let owner = app.new_user();
    let resume = populated_resume(&app, &owner).await;

    let first: Value = app.get(&owner, &format!("/resumes/{}/bundle", resume)).await.json().await.unwrap();
    let second: Value = app.get(&owner, &format!("/resumes/{}/bundle", resume)).await.json().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first["resume"]["id"], resume);
    assert_eq!(first["skills"][0]["name"], "Go");
    assert_eq!(first["skills"][1]["name"], "Rust");
    assert_eq!(first["experience"].as_array().map(Vec::len), Some(1));
    assert_eq!(first["projects"], json!([]));
}

#[actix_rt::test]
async fn export_returns_a_pdf_attachment() {
    let app = TestApp::spawn().await;
    let owner = app.new_user();
    let resume = populated_resume(&app, &owner).await;

    let response = app.get(&owner, &format!("/resumes/{}/export", resume)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers().clone();
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(&format!("Senior_Backend_{}.pdf", resume)));
    assert!(!disposition.contains("filename*"));

    let bytes = response.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[actix_rt::test]
async fn accented_title_gets_utf8_filename_alongside_ascii_fallback() {
    let app = TestApp::spawn().await;
    let owner = app.new_user();
    let resume = app.create_resume(&owner, "Résumé Dev").await;

    let response = app.get(&owner, &format!("/resumes/{}/export", resume)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.contains(&format!("filename=\"Rsum_Dev_{}.pdf\"", resume)));
    assert!(disposition.contains(&format!("filename*=UTF-8''R%C3%A9sum%C3%A9_Dev_{}.pdf", resume)));
}

#[actix_rt::test]
async fn resume_without_sections_still_exports() {
    let app = TestApp::spawn().await;
    let owner = app.new_user();
    let resume = app.create_resume(&owner, "Empty").await;

    let response = app.get(&owner, &format!("/resumes/{}/export", resume)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.bytes().await.unwrap().starts_with(b"%PDF"));
}

#[actix_rt::test]
async fn export_of_someone_elses_resume_is_not_found() {
    let app = TestApp::spawn().await;
    let owner = app.new_user();
    let stranger = app.new_user();
    let resume = populated_resume(&app, &owner).await;

    let export = app.get(&stranger, &format!("/resumes/{}/export", resume)).await;
    assert_eq!(export.status(), StatusCode::NOT_FOUND);
    assert_ne!(
        export.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
        Some(b"application/pdf".as_slice())
    );

    let bundle = app.get(&stranger, &format!("/resumes/{}/bundle", resume)).await;
    assert_eq!(bundle.status(), StatusCode::NOT_FOUND);
}
