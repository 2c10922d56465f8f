//! Core checklist logic for Gameday.
//!
//! This crate owns the two halves of the checklist state model that have real
//! invariants:
//!
//! - [`normalize`] - converts any supported raw template or stored snapshot
//!   into the canonical [`ChecklistModel`](gameday_types::ChecklistModel)
//! - [`transitions`] - pure model-in/model-out operations for toggling items,
//!   toggling manager verification, and assigning technicians
//!
//! [`fallback_model`] is the built-in checklist used when no template can be
//! fetched.

mod fallback;
pub mod normalize;
pub mod transitions;

pub use fallback::fallback_model;
pub use normalize::normalize;
pub use transitions::{
    assign_tech, format_verified_at, toggle_item, toggle_manager_verified,
    toggle_manager_verified_at,
};
