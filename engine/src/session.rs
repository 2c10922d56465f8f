use std::fmt;

use serde_json::Value;

use gameday_core::{assign_tech, fallback_model, normalize, toggle_item, toggle_manager_verified};
use gameday_providers::{FetchError, GameProvider, TemplateProvider};
use gameday_store::{Hydration, KeyValueStore, PersistenceBinder};
use gameday_types::{ChecklistModel, Game, Permissions, Role, Section};

pub const TEMPLATE_WARNING: &str = "Could not load checklists from server. Using backup.";
pub const GAME_WARNING: &str = "Could not load current game from server.";

/// Non-blocking banner shown after a fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    TemplateFallback,
    GameUnavailable,
}

impl Warning {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Warning::TemplateFallback => TEMPLATE_WARNING,
            Warning::GameUnavailable => GAME_WARNING,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Completion of one of the two startup fetches.
#[derive(Debug)]
pub enum SessionEvent {
    TemplateLoaded(Result<Value, FetchError>),
    GameLoaded(Result<Game, FetchError>),
}

/// Owner of the checklist model for one client.
///
/// The model starts as the fallback template. Fetch results arrive as
/// [`SessionEvent`]s in either order; stored progress is restored only once
/// both have landed. Each game starts from the resolved template, never from
/// another game's progress.
#[derive(Debug)]
pub struct Session<S> {
    model: ChecklistModel,
    /// Last resolved template (normalized or fallback), without progress.
    template: ChecklistModel,
    game: Option<Game>,
    binder: PersistenceBinder<S>,
    warnings: Vec<Warning>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self {
            model: fallback_model(),
            template: fallback_model(),
            game: None,
            binder: PersistenceBinder::new(store),
            warnings: Vec::new(),
        }
    }

    /// Fetch template and game concurrently and apply both results.
    pub async fn start<T, G>(templates: &T, games: &G, store: S) -> Self
    where
        T: TemplateProvider,
        G: GameProvider,
    {
        let (template, game) = tokio::join!(templates.fetch_template(), games.fetch_game());
        let mut session = Self::new(store);
        session.apply(SessionEvent::TemplateLoaded(template));
        session.apply(SessionEvent::GameLoaded(game));
        session
    }

    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::TemplateLoaded(result) => self.template_loaded(result),
            SessionEvent::GameLoaded(result) => self.game_loaded(result),
        }
    }

    fn template_loaded(&mut self, result: Result<Value, FetchError>) {
        // Once hydrated, the in-memory model is authoritative even if no
        // snapshot was stored for this game.
        if self.binder.is_hydrated() {
            tracing::debug!("Ignoring template reload; hydrated model is authoritative");
            return;
        }

        match result {
            Ok(raw) => {
                self.template = normalize(&raw);
                self.model = self.template.clone();
                self.clear_warning(Warning::TemplateFallback);
                tracing::info!(sections = self.model.len(), "Loaded checklist template");
            }
            Err(e) => {
                tracing::warn!("Failed to load checklists: {e}");
                self.template = fallback_model();
                self.model = self.template.clone();
                self.push_warning(Warning::TemplateFallback);
            }
        }
        self.binder.mark_template_ready();
        self.hydrate();
    }

    fn game_loaded(&mut self, result: Result<Game, FetchError>) {
        let previous_key = self.binder.storage_key().cloned();
        match result {
            Ok(game) => {
                tracing::info!(opponent = %game.opponent, date = %game.date, "Loaded current game");
                self.binder.bind_game(Some(&game));
                self.game = Some(game);
                self.clear_warning(Warning::GameUnavailable);
            }
            Err(e) => {
                tracing::warn!("Failed to load current game: {e}");
                self.binder.bind_game(None);
                self.game = None;
                self.push_warning(Warning::GameUnavailable);
            }
        }

        if previous_key.is_some() && self.binder.storage_key() != previous_key.as_ref() {
            tracing::debug!("Game changed; resetting checklist to template");
            self.model = self.template.clone();
        }
        self.hydrate();
    }

    fn hydrate(&mut self) {
        match self.binder.try_hydrate() {
            Hydration::Restored(model) => self.model = model,
            Hydration::NotReady
            | Hydration::AlreadyHydrated
            | Hydration::Empty
            | Hydration::Discarded => {}
        }
    }

    fn push_warning(&mut self, warning: Warning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    fn clear_warning(&mut self, warning: Warning) {
        self.warnings.retain(|w| *w != warning);
    }

    /// Swap in `next` and persist it if it differs. Returns whether it changed.
    fn commit(&mut self, next: ChecklistModel) -> bool {
        if next == self.model {
            return false;
        }
        self.model = next;
        self.binder.persist(&self.model);
        true
    }

    pub fn toggle_item(&mut self, section_key: &str, group_id: &str, item_id: &str) -> bool {
        let next = toggle_item(self.model.clone(), section_key, group_id, item_id);
        self.commit(next)
    }

    pub fn toggle_manager_verified(&mut self, section_key: &str, group_id: &str) -> bool {
        let next = toggle_manager_verified(self.model.clone(), section_key, group_id);
        self.commit(next)
    }

    pub fn assign_tech(&mut self, section_key: &str, group_id: &str, tech_name: &str) -> bool {
        let next = assign_tech(self.model.clone(), section_key, group_id, tech_name);
        self.commit(next)
    }

    #[must_use]
    pub fn model(&self) -> &ChecklistModel {
        &self.model
    }

    #[must_use]
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.binder.is_hydrated()
    }

    #[must_use]
    pub fn permissions(role: Role) -> Permissions {
        role.permissions()
    }

    /// Sections the role may see, known sections first.
    pub fn visible_sections(&self, role: Role) -> impl Iterator<Item = (&str, &Section)> {
        self.model
            .display_order()
            .filter(move |(key, _)| role.can_view_section(key))
    }

    #[must_use]
    pub fn store(&self) -> &S {
        self.binder.store()
    }

    pub fn into_store(self) -> S {
        self.binder.into_store()
    }
}
