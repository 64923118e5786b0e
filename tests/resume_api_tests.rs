
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn requests_without_a_token_are_rejected() {
    let app = TestApp::spawn().await;

    let response = app.client
        .get(app.url("/resumes"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.client
        .get(app.url("/resumes"))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn health_and_home_are_public() {
    let app = TestApp::spawn().await;

    let health = app.client.get(format!("{}/health", app.address)).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    let body: Value = health.json().await.unwrap();
    assert_eq!(body["store"], "OK");

    let home = app.client.get(format!("{}/", app.address)).send().await.unwrap();
    assert_eq!(home.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn owner_can_create_read_and_list_resumes() {
    let app = TestApp::spawn().await;
    let owner = app.new_user();

    let id = app.create_resume(&owner, "  Senior Backend  ").await;

    let response = app.get(&owner, &format!("/resumes/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let resume: Value = response.json().await.unwrap();
    assert_eq!(resume["title"], "Senior Backend");
    assert_eq!(resume["owner_id"], owner.id.to_string());

    let list: Value = app.get(&owner, "/resumes").await.json().await.unwrap();
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[actix_rt::test]
async fn other_users_cannot_see_or_touch_a_resume() {
    let app = TestApp::spawn().await;
    let owner = app.new_user();
    let stranger = app.new_user();
    let id = app.create_resume(&owner, "Private").await;

    let missing = app.get(&stranger, "/resumes/999999").await;
    let foreign = app.get(&stranger, &format!("/resumes/{}", id)).await;

    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
    let missing_body: Value = missing.json().await.unwrap();
    let foreign_body: Value = foreign.json().await.unwrap();
    assert_eq!(missing_body, foreign_body);

    let patch = app.patch(&stranger, &format!("/resumes/{}", id), &json!({ "title": "Mine" })).await;
    assert_eq!(patch.status(), StatusCode::NOT_FOUND);

    let delete = app.delete(&stranger, &format!("/resumes/{}", id)).await;
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);

    let list: Value = app.get(&stranger, "/resumes").await.json().await.unwrap();
    assert_eq!(list, json!([]));
}

#[actix_rt::test]
async fn patch_updates_only_the_fields_sent() {
    let app = TestApp::spawn().await;
    let owner = app.new_user();
    let id = app.create_resume(&owner, "Draft").await;

    let response = app.patch(&owner, &format!("/resumes/{}", id), &json!({
        "title": "Final",
        "phone": null
    })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let resume: Value = response.json().await.unwrap();
    assert_eq!(resume["title"], "Final");
    assert_eq!(resume["phone"], Value::Null);
    assert_eq!(resume["full_name"], "Ada Lovelace");
    assert_eq!(resume["email"], "ada@example.com");
}

#[actix_rt::test]
async fn invalid_resume_input_is_rejected_with_field_details() {
    let app = TestApp::spawn().await;
    let owner = app.new_user();

    let response = app.post(&owner, "/resumes", &json!({
        "title": "",
        "email": "not-an-email"
    })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["field"].as_str())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"email"));

    let id = app.create_resume(&owner, "Keep").await;
    let null_title = app.patch(&owner, &format!("/resumes/{}", id), &json!({ "title": null })).await;
    assert_eq!(null_title.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn malformed_json_answers_400() {
    let app = TestApp::spawn().await;
    let owner = app.new_user();

    let response = app.client
        .post(app.url("/resumes"))
        .bearer_auth(&owner.token)
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn deleting_a_resume_removes_its_sections() {
    let app = TestApp::spawn().await;
    let owner = app.new_user();
    let id = app.create_resume(&owner, "Short lived").await;

    let skill_id = app.create_section(&owner, "skills", json!({
        "resume_id": id,
        "name": "Rust",
        "category": "Languages"
    })).await;

    let response = app.delete(&owner, &format!("/resumes/{}", id)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let gone = app.get(&owner, &format!("/resumes/{}", id)).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let skill = app.get(&owner, &format!("/skills/{}", skill_id)).await;
    assert_eq!(skill.status(), StatusCode::NOT_FOUND);

    let skills: Value = app.get(&owner, "/skills").await.json().await.unwrap();
    assert_eq!(skills, json!([]));
}
