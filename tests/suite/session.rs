//! Session tests against a mock checklist backend

use serde_json::{Value, json};

use gameday_core::{fallback_model, normalize};
use gameday_engine::{GAME_WARNING, Session, TEMPLATE_WARNING, Warning};
use gameday_providers::FileTemplateProvider;
use gameday_store::{FileStore, KeyValueStore, MemoryStore};
use gameday_types::{BB_OPS, POST_GAME, PRE_GAME, Role, UNASSIGNED};

use crate::common::{
    LAKERS_KEY, lakers, mixed_template, mount_failure, mount_game, mount_template, provider_for,
    start_backend_mock,
};

#[tokio::test]
async fn start_normalizes_every_section_shape() {
    let server = start_backend_mock().await;
    mount_template(&server, &mixed_template()).await;
    mount_game(&server, &lakers()).await;
    let provider = provider_for(&server);

    let session = Session::start(&provider, &provider, MemoryStore::new()).await;

    assert!(session.warnings().is_empty());
    assert_eq!(session.game(), Some(&lakers()));
    assert!(session.is_hydrated());

    let model = session.model();
    let court = model.group(PRE_GAME, "court").unwrap();
    assert_eq!(court.assigned_tech, "Tech 1");
    assert_eq!(court.items.len(), 2);

    let teardown = model.group(POST_GAME, "teardown").unwrap();
    assert_eq!(teardown.title, "Teardown");
    assert_eq!(teardown.assigned_tech, UNASSIGNED);

    let replay = model.group(BB_OPS, "bbOps-g1").unwrap();
    assert_eq!(replay.title, "BBOPS TECH CHECKLIST");
    assert_eq!(replay.assigned_tech, "Tech 2");
}

#[tokio::test]
async fn template_outage_uses_backup_and_still_hydrates() {
    let server = start_backend_mock().await;
    mount_failure(&server, "/checklists", 500).await;
    mount_game(&server, &lakers()).await;
    let provider = provider_for(&server);

    let session = Session::start(&provider, &provider, MemoryStore::new()).await;

    assert_eq!(session.model(), &fallback_model());
    assert_eq!(session.warnings(), &[Warning::TemplateFallback]);
    assert_eq!(session.warnings()[0].to_string(), TEMPLATE_WARNING);
    assert!(session.is_hydrated());
}

#[tokio::test]
async fn game_outage_warns_and_skips_persistence() {
    let server = start_backend_mock().await;
    mount_template(&server, &mixed_template()).await;
    mount_failure(&server, "/current-game", 404).await;
    let provider = provider_for(&server);

    let mut session = Session::start(&provider, &provider, MemoryStore::new()).await;

    assert!(session.game().is_none());
    assert_eq!(session.warnings(), &[Warning::GameUnavailable]);
    assert_eq!(session.warnings()[0].to_string(), GAME_WARNING);

    assert!(session.toggle_item(PRE_GAME, "court", "floor"));
    assert!(session.store().is_empty());
}

#[tokio::test]
async fn both_outages_show_both_banners() {
    let server = start_backend_mock().await;
    mount_failure(&server, "/checklists", 503).await;
    mount_failure(&server, "/current-game", 503).await;
    let provider = provider_for(&server);

    let session = Session::start(&provider, &provider, MemoryStore::new()).await;

    assert_eq!(
        session.warnings(),
        &[Warning::TemplateFallback, Warning::GameUnavailable]
    );
}

#[tokio::test]
async fn progress_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("store.json");

    let server = start_backend_mock().await;
    mount_template(&server, &mixed_template()).await;
    mount_game(&server, &lakers()).await;
    let provider = provider_for(&server);

    {
        let store = FileStore::open(&store_path).unwrap();
        let mut session = Session::start(&provider, &provider, store).await;
        assert!(session.toggle_item(PRE_GAME, "court", "floor"));
        assert!(session.toggle_item(PRE_GAME, "court", "hoops"));
        assert!(session.toggle_manager_verified(PRE_GAME, "court"));
        assert!(session.assign_tech(BB_OPS, "bbOps-g1", "Tech 3"));
    }

    let store = FileStore::open(&store_path).unwrap();
    let session = Session::start(&provider, &provider, store).await;

    let court = session.model().group(PRE_GAME, "court").unwrap();
    assert!(court.all_completed());
    assert!(court.manager_verified);
    assert!(court.verified_at.is_some());
    assert_eq!(
        session.model().group(BB_OPS, "bbOps-g1").unwrap().assigned_tech,
        "Tech 3"
    );
}

#[tokio::test]
async fn stored_snapshot_overrides_template() {
    let server = start_backend_mock().await;
    mount_template(&server, &mixed_template()).await;
    mount_game(&server, &lakers()).await;
    let provider = provider_for(&server);

    let snapshot = json!({
        "preGame": {"name": "Saved", "groups": [
            {"id": "saved", "items": [{"id": "x", "label": "From last time", "completed": true}]}
        ]}
    });
    let store: MemoryStore = [(LAKERS_KEY, snapshot.to_string())].into_iter().collect();

    let session = Session::start(&provider, &provider, store).await;
    assert_eq!(session.model(), &normalize(&snapshot));
}

#[tokio::test]
async fn corrupt_snapshot_is_discarded_silently() {
    let server = start_backend_mock().await;
    mount_template(&server, &mixed_template()).await;
    mount_game(&server, &lakers()).await;
    let provider = provider_for(&server);

    let store: MemoryStore = [(LAKERS_KEY, "{truncated")].into_iter().collect();
    let mut session = Session::start(&provider, &provider, store).await;

    assert_eq!(session.model(), &normalize(&mixed_template()));
    assert!(session.warnings().is_empty());

    assert!(session.toggle_item(PRE_GAME, "court", "floor"));
    let stored: Value = serde_json::from_str(&session.store().get(LAKERS_KEY).unwrap()).unwrap();
    assert_eq!(normalize(&stored), *session.model());
}

#[tokio::test]
async fn snapshots_are_kept_per_game() {
    let server = start_backend_mock().await;
    mount_template(&server, &mixed_template()).await;
    mount_game(&server, &lakers()).await;
    let provider = provider_for(&server);

    let other_game = json!({"preGame": {"groups": [{"id": "other", "items": []}]}});
    let store: MemoryStore = [("sections_2024-01-07_Celtics", other_game.to_string())]
        .into_iter()
        .collect();

    let mut session = Session::start(&provider, &provider, store).await;
    session.toggle_item(PRE_GAME, "court", "floor");

    let store = session.into_store();
    assert_eq!(
        store.get("sections_2024-01-07_Celtics"),
        Some(other_game.to_string())
    );
    assert!(store.get(LAKERS_KEY).is_some());
}

#[tokio::test]
async fn local_template_file_replaces_server_template() {
    let dir = tempfile::tempdir().unwrap();
    let template_path = dir.path().join("checklists.json");
    std::fs::write(
        &template_path,
        r#"{"preGame": {"items": [{"id": "local", "label": "Offline item"}]}}"#,
    )
    .unwrap();

    let server = start_backend_mock().await;
    mount_game(&server, &lakers()).await;
    let provider = provider_for(&server);

    let session = Session::start(
        &FileTemplateProvider::new(&template_path),
        &provider,
        MemoryStore::new(),
    )
    .await;

    let group = session.model().group(PRE_GAME, "preGame-g1").unwrap();
    assert_eq!(group.items[0].label, "Offline item");
    assert!(session.warnings().is_empty());
}

#[tokio::test]
async fn tech_view_hides_bb_ops() {
    let server = start_backend_mock().await;
    mount_template(&server, &mixed_template()).await;
    mount_game(&server, &lakers()).await;
    let provider = provider_for(&server);

    let session = Session::start(&provider, &provider, MemoryStore::new()).await;
    let visible: Vec<&str> = session
        .visible_sections(Role::Tech)
        .map(|(key, _)| key)
        .collect();
    assert_eq!(visible, vec![PRE_GAME, POST_GAME]);
}
