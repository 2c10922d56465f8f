//! State transitions over the canonical model.
//!
//! Each operation takes the current model by value and returns the next one.
//! References that do not resolve (a stale group or item id after a template
//! reload) leave the model untouched.

use chrono::{DateTime, Local};

use gameday_types::{ChecklistModel, normalize_tech_name};

/// Human-readable local timestamp, e.g. `1/5/2024, 7:30:00 PM`.
#[must_use]
pub fn format_verified_at(now: DateTime<Local>) -> String {
    now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Flip one item's `completed` flag.
///
/// If the owning group is left with any incomplete item, its verification is
/// cleared. Verification is never set by this operation.
#[must_use]
pub fn toggle_item(
    mut model: ChecklistModel,
    section_key: &str,
    group_id: &str,
    item_id: &str,
) -> ChecklistModel {
    let Some(group) = model.group_mut(section_key, group_id) else {
        tracing::debug!(section_key, group_id, "Ignoring item toggle for unknown group");
        return model;
    };
    let Some(item) = group.item_mut(item_id) else {
        tracing::debug!(section_key, group_id, item_id, "Ignoring toggle for unknown item");
        return model;
    };
    item.completed = !item.completed;
    group.revoke_verification_if_incomplete();
    model
}

/// Flip manager verification, stamping the current local time when it turns on.
#[must_use]
pub fn toggle_manager_verified(
    model: ChecklistModel,
    section_key: &str,
    group_id: &str,
) -> ChecklistModel {
    toggle_manager_verified_at(model, section_key, group_id, Local::now())
}

/// [`toggle_manager_verified`] with an explicit clock reading.
///
/// Turning verification on requires every item in the group to be complete;
/// otherwise the call is a no-op. Turning it off is always allowed.
#[must_use]
pub fn toggle_manager_verified_at(
    mut model: ChecklistModel,
    section_key: &str,
    group_id: &str,
    now: DateTime<Local>,
) -> ChecklistModel {
    let Some(group) = model.group_mut(section_key, group_id) else {
        tracing::debug!(section_key, group_id, "Ignoring verification for unknown group");
        return model;
    };

    if group.manager_verified {
        group.manager_verified = false;
        group.verified_at = None;
    } else if group.all_completed() {
        group.manager_verified = true;
        group.verified_at = Some(format_verified_at(now));
    } else {
        tracing::debug!(
            section_key,
            group_id,
            "Refusing verification while items are incomplete"
        );
    }
    model
}

/// Set the group's technician. Blank input and the sentinel both mean unassigned.
#[must_use]
pub fn assign_tech(
    mut model: ChecklistModel,
    section_key: &str,
    group_id: &str,
    tech_name: &str,
) -> ChecklistModel {
    match model.group_mut(section_key, group_id) {
        Some(group) => group.assigned_tech = normalize_tech_name(tech_name),
        None => {
            tracing::debug!(section_key, group_id, "Ignoring assignment for unknown group");
        }
    }
    model
}
