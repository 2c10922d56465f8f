//! Built-in checklist shown when the template provider is unreachable.

use gameday_types::{
    BB_OPS, ChecklistItem, ChecklistModel, Group, POST_GAME, PRE_GAME, Section, UNASSIGNED,
};

const FALLBACK_SECTIONS: &[(&str, &str, &str)] = &[
    (PRE_GAME, "PRE-GAME SETUP CHECKLIST", "pg"),
    (POST_GAME, "POST-GAME CHECKLIST", "post"),
    (BB_OPS, "BBOPS TECH CHECKLIST", "bb"),
];

/// One placeholder group per known section, each with a single unchecked item.
#[must_use]
pub fn fallback_model() -> ChecklistModel {
    FALLBACK_SECTIONS
        .iter()
        .map(|(key, name, prefix)| {
            let group = Group {
                id: format!("{prefix}-fallback-1"),
                title: "Loading…".to_string(),
                subtitle: String::new(),
                assigned_tech: UNASSIGNED.to_string(),
                items: vec![ChecklistItem::new(
                    format!("{prefix}-fallback-item-1"),
                    "Loading from server…",
                )],
                manager_verified: false,
                verified_at: None,
            };
            (
                (*key).to_string(),
                Section {
                    name: (*name).to_string(),
                    groups: vec![group],
                },
            )
        })
        .collect()
}
