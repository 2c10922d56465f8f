//! Shared test utilities and fixtures
//!
//! Mock checklist backend and sample payloads for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gameday_providers::HttpProvider;
use gameday_types::Game;

pub const LAKERS_KEY: &str = "sections_2024-01-05_Lakers";

/// Start a mock server standing in for the checklist backend
pub async fn start_backend_mock() -> MockServer {
    MockServer::start().await
}

pub fn provider_for(server: &MockServer) -> HttpProvider {
    HttpProvider::new(server.uri(), Duration::from_secs(5)).expect("http client")
}

pub fn lakers() -> Game {
    Game {
        opponent: "Lakers".to_string(),
        date: "2024-01-05".to_string(),
        time: "7:00 PM".to_string(),
        manager_name: "Sam".to_string(),
    }
}

/// Template mixing every supported section shape
pub fn mixed_template() -> Value {
    json!({
        "preGame": {
            "name": "PRE-GAME SETUP CHECKLIST",
            "groups": [{
                "id": "court",
                "title": "Court",
                "techName": "Tech 1",
                "items": [
                    {"id": "floor", "label": "Floor wiped"},
                    {"id": "hoops", "label": "Hoops checked"}
                ]
            }]
        },
        "postGame": {
            "name": "POST-GAME CHECKLIST",
            "tasks": [{
                "id": "teardown",
                "title": "Teardown",
                "items": [{"id": "cables", "label": "Cables coiled"}]
            }]
        },
        "bbOps": {
            "name": "BBOPS TECH CHECKLIST",
            "techName": "Tech 2",
            "items": [{"id": "replay", "label": "Replay station up"}]
        }
    })
}

pub async fn mount_template(server: &MockServer, body: &Value) {
    Mock::given(method("GET"))
        .and(path("/checklists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_game(server: &MockServer, game: &Game) {
    Mock::given(method("GET"))
        .and(path("/current-game"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "opponent": game.opponent,
            "date": game.date,
            "time": game.time,
            "managerName": game.manager_name
        })))
        .mount(server)
        .await;
}

pub async fn mount_failure(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string("unavailable"))
        .mount(server)
        .await;
}
