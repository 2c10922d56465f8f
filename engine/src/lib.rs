//! Session orchestration for Gameday.
//!
//! [`Session`] is the single owner of the checklist model for one client. It
//! joins the template and game fetches, falls back when either fails, drives
//! the persistence binder, and serializes every transition through `&mut self`.
//! [`PasswordGate`] is the shared-secret login in front of it.

mod auth;
mod session;

pub use auth::{AuthError, LOGGED_IN_KEY, PasswordGate};
pub use session::{GAME_WARNING, Session, SessionEvent, TEMPLATE_WARNING, Warning};

pub use gameday_core;
pub use gameday_providers;
pub use gameday_store;
pub use gameday_types;
