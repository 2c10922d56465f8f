//! Core domain types for Gameday.
//!
//! This crate contains the canonical checklist model and the small value types
//! around it, with no IO, no async, and minimal dependencies. Everything here can
//! be used from any layer of the application.
//!
//! - [`ChecklistModel`] - sections keyed by a stable identifier, each holding
//!   verification [`Group`]s of [`ChecklistItem`]s
//! - [`Game`] / [`GameKey`] / [`StorageKey`] - the active game and the
//!   persistence partition derived from it
//! - [`Role`] / [`Permissions`] - presentation-owned role and the gating
//!   predicates derived from it
//! - [`TechRoster`] - the technician roster and the `(unassigned)` sentinel

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod checklist;
mod game;
mod role;
mod tech;

pub use checklist::{
    BB_OPS, ChecklistItem, ChecklistModel, Group, KNOWN_SECTIONS, POST_GAME, PRE_GAME, Progress,
    Section,
};
pub use game::{Game, GameKey, STORAGE_KEY_PREFIX, StorageKey};
pub use role::{EnumParseError, Permissions, Role};
pub use tech::{TechRoster, UNASSIGNED, normalize_tech_name};
