use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use patient_cell::models::UpdateProfileRequest;
use patient_cell::services::profile::ProfileService;
use shared_utils::test_utils::TestConfig;

fn profile_row(id: &str, full_name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "full_name": full_name,
        "phone": "+213555000222",
        "avatar_url": null,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn fetches_the_callers_profile() {
    let mock_server = MockServer::start().await;
    let user_id = Uuid::new_v4().to_string();

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            profile_row(&user_id, "Amel B.")
        ])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_mock_server(&mock_server.uri()).to_app_config();
    let profile = ProfileService::new(&config)
        .get_profile(&user_id, "token")
        .await
        .unwrap();

    assert_eq!(profile.id, user_id);
    assert_eq!(profile.full_name.as_deref(), Some("Amel B."));
}

#[tokio::test]
async fn update_patches_only_provided_fields() {
    let mock_server = MockServer::start().await;
    let user_id = Uuid::new_v4().to_string();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/profiles"))
        .and(body_partial_json(json!({ "full_name": "Amel Benali" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            profile_row(&user_id, "Amel Benali")
        ])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_mock_server(&mock_server.uri()).to_app_config();
    let profile = ProfileService::new(&config)
        .update_profile(
            &user_id,
            UpdateProfileRequest {
                full_name: Some("Amel Benali".to_string()),
                phone: None,
                avatar_url: None,
            },
            "token",
        )
        .await
        .unwrap();

    assert_eq!(profile.full_name.as_deref(), Some("Amel Benali"));
}

#[tokio::test]
async fn missing_profile_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_mock_server(&mock_server.uri()).to_app_config();
    let result = ProfileService::new(&config)
        .get_profile(&Uuid::new_v4().to_string(), "token")
        .await;

    assert!(result.is_err());
}
