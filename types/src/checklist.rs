//! Canonical checklist model.
//!
//! Every raw payload shape is normalized into these types at the boundary;
//! nothing downstream ever branches on the shape a checklist arrived in.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Section key for the pre-game setup checklist.
pub const PRE_GAME: &str = "preGame";
/// Section key for the post-game checklist.
pub const POST_GAME: &str = "postGame";
/// Section key for the BBOps technician checklist.
pub const BB_OPS: &str = "bbOps";

/// Section keys expected to survive every template fetch, in display order.
pub const KNOWN_SECTIONS: &[&str] = &[PRE_GAME, POST_GAME, BB_OPS];

// ============================================================================
// Items
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    pub completed: bool,
}

impl ChecklistItem {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            completed: false,
        }
    }
}

// ============================================================================
// Progress
// ============================================================================

/// Completed/total counts for a group or a whole section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// True only when there is at least one item and every item is done.
    #[must_use]
    pub fn all_completed(self) -> bool {
        self.total > 0 && self.completed == self.total
    }

    fn add(self, other: Progress) -> Self {
        Self {
            completed: self.completed + other.completed,
            total: self.total + other.total,
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} completed", self.completed, self.total)
    }
}

// ============================================================================
// Groups
// ============================================================================

/// The unit of verification: items sharing one technician and one sign-off.
///
/// Invariant: `manager_verified` implies every item is completed and the group
/// is non-empty. `verified_at` is `Some` only while `manager_verified` holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub assigned_tech: String,
    pub items: Vec<ChecklistItem>,
    pub manager_verified: bool,
    pub verified_at: Option<String>,
}

impl Group {
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.items.iter().filter(|item| item.completed).count(),
            total: self.items.len(),
        }
    }

    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.progress().all_completed()
    }

    #[must_use]
    pub fn item(&self, item_id: &str) -> Option<&ChecklistItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut ChecklistItem> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }

    /// Drop verification if the group no longer satisfies its invariant.
    ///
    /// Returns `true` if anything was cleared.
    pub fn revoke_verification_if_incomplete(&mut self) -> bool {
        if self.all_completed() {
            return false;
        }
        let changed = self.manager_verified || self.verified_at.is_some();
        self.manager_verified = false;
        self.verified_at = None;
        changed
    }
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub groups: Vec<Group>,
}

impl Section {
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.groups
            .iter()
            .map(Group::progress)
            .fold(Progress::default(), Progress::add)
    }

    #[must_use]
    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    pub fn group_mut(&mut self, group_id: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| group.id == group_id)
    }
}

// ============================================================================
// Model
// ============================================================================

/// Mapping from section key to [`Section`]; the unit of persistence.
///
/// Serializes as a plain JSON object keyed by section key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecklistModel {
    sections: BTreeMap<String, Section>,
}

impl ChecklistModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, section: Section) -> Option<Section> {
        self.sections.insert(key.into(), section)
    }

    #[must_use]
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.get(key)
    }

    pub fn section_mut(&mut self, key: &str) -> Option<&mut Section> {
        self.sections.get_mut(key)
    }

    #[must_use]
    pub fn group(&self, section_key: &str, group_id: &str) -> Option<&Group> {
        self.section(section_key)?.group(group_id)
    }

    pub fn group_mut(&mut self, section_key: &str, group_id: &str) -> Option<&mut Group> {
        self.section_mut(section_key)?.group_mut(group_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Section> {
        self.sections.iter()
    }

    /// Sections in display order: known keys first, then any others by key.
    pub fn display_order(&self) -> impl Iterator<Item = (&str, &Section)> {
        let known = KNOWN_SECTIONS
            .iter()
            .filter_map(|key| self.sections.get(*key).map(|section| (*key, section)));
        let extra = self
            .sections
            .iter()
            .filter(|(key, _)| !KNOWN_SECTIONS.contains(&key.as_str()))
            .map(|(key, section)| (key.as_str(), section));
        known.chain(extra)
    }
}

impl<'a> IntoIterator for &'a ChecklistModel {
    type Item = (&'a String, &'a Section);
    type IntoIter = btree_map::Iter<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

impl FromIterator<(String, Section)> for ChecklistModel {
    fn from_iter<T: IntoIterator<Item = (String, Section)>>(iter: T) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}
