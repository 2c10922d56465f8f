//! HTTP provider tests

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use gameday_providers::{FetchError, GameProvider, TemplateProvider};

use crate::common::{
    lakers, mixed_template, mount_game, mount_template, provider_for, start_backend_mock,
};

#[tokio::test]
async fn template_is_returned_untouched() {
    let server = start_backend_mock().await;
    mount_template(&server, &mixed_template()).await;

    let raw = provider_for(&server).fetch_template().await.unwrap();
    assert_eq!(raw, mixed_template());
}

#[tokio::test]
async fn game_reads_camel_case_fields() {
    let server = start_backend_mock().await;
    mount_game(&server, &lakers()).await;

    let game = provider_for(&server).fetch_game().await.unwrap();
    assert_eq!(game, lakers());
    assert_eq!(
        game.storage_key().map(|key| key.to_string()).as_deref(),
        Some("sections_2024-01-05_Lakers")
    );
}

#[tokio::test]
async fn partial_game_defaults_missing_fields() {
    let server = start_backend_mock().await;
    Mock::given(method("GET"))
        .and(path("/current-game"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"opponent": "Lakers"})))
        .mount(&server)
        .await;

    let game = provider_for(&server).fetch_game().await.unwrap();
    assert_eq!(game.opponent, "Lakers");
    assert!(game.date.is_empty());
    assert!(game.storage_key().is_none());
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let server = start_backend_mock().await;
    Mock::given(method("GET"))
        .and(path("/checklists"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Failed to load checklists"))
        .mount(&server)
        .await;

    match provider_for(&server).fetch_template().await {
        Err(FetchError::Status { status, body, url }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "Failed to load checklists");
            assert!(url.ends_with("/checklists"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
