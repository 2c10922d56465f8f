//! Raw checklist payloads to the canonical model.
//!
//! Three section shapes have been served over time. Detection is per section
//! and follows a fixed precedence:
//!
//! 1. `groups[]` - the current shape
//! 2. `tasks[]` - legacy task groups, same fields at the task level
//! 3. flat `items[]` with section-level `techName`/`managerVerified`/`verifiedAt`
//!
//! Normalization is total. Malformed input degrades to empty strings, empty
//! arrays, `false` and `null`; missing ids are synthesized from position so the
//! same positional data always yields the same ids.

use serde_json::{Map, Value};

use gameday_types::{ChecklistItem, ChecklistModel, Group, Section, normalize_tech_name};

use crate::fallback::fallback_model;

type Object = Map<String, Value>;

/// A section as served, resolved to exactly one shape.
#[derive(Debug)]
enum RawSection<'a> {
    Groups(&'a [Value]),
    Tasks(&'a [Value]),
    Flat(FlatSection<'a>),
}

/// Oldest shape: one implicit group whose fields live on the section itself.
#[derive(Debug)]
struct FlatSection<'a> {
    items: &'a [Value],
    tech: String,
    manager_verified: bool,
    verified_at: Option<String>,
}

impl<'a> RawSection<'a> {
    fn detect(section: Option<&'a Object>) -> Self {
        if let Some(groups) = array_field(section, "groups") {
            return RawSection::Groups(groups);
        }
        if let Some(tasks) = array_field(section, "tasks") {
            return RawSection::Tasks(tasks);
        }
        RawSection::Flat(FlatSection {
            items: array_field(section, "items").unwrap_or_default(),
            tech: tech_field(section),
            manager_verified: bool_field(section, "managerVerified"),
            verified_at: optional_str_field(section, "verifiedAt"),
        })
    }
}

/// Normalize a raw template or stored snapshot.
///
/// A `null`, array or scalar payload yields [`fallback_model`]. Unknown section
/// keys pass through unchanged.
#[must_use]
pub fn normalize(raw: &Value) -> ChecklistModel {
    let Value::Object(sections) = raw else {
        tracing::debug!("Checklist payload is not an object; using fallback model");
        return fallback_model();
    };

    sections
        .iter()
        .map(|(key, value)| (key.clone(), normalize_section(key, value)))
        .collect()
}

fn normalize_section(key: &str, value: &Value) -> Section {
    let section = value.as_object();
    let name = non_empty(str_field(section, "name")).unwrap_or_else(|| key.to_string());

    let groups = match RawSection::detect(section) {
        RawSection::Groups(groups) | RawSection::Tasks(groups) => groups
            .iter()
            .enumerate()
            .map(|(index, group)| normalize_group(key, index, group))
            .collect(),
        RawSection::Flat(flat) => {
            let id = synthesized_group_id(key, 0);
            let items = normalize_items(&id, flat.items);
            vec![settle(Group {
                id,
                title: name.clone(),
                subtitle: String::new(),
                assigned_tech: flat.tech,
                items,
                manager_verified: flat.manager_verified,
                verified_at: flat.verified_at,
            })]
        }
    };

    Section { name, groups }
}

fn normalize_group(section_key: &str, index: usize, value: &Value) -> Group {
    let group = value.as_object();
    let id = id_field(group).unwrap_or_else(|| synthesized_group_id(section_key, index));
    let items = normalize_items(&id, array_field(group, "items").unwrap_or_default());

    settle(Group {
        title: str_field(group, "title"),
        subtitle: str_field(group, "subtitle"),
        assigned_tech: tech_field(group),
        items,
        manager_verified: bool_field(group, "managerVerified"),
        verified_at: optional_str_field(group, "verifiedAt"),
        id,
    })
}

fn normalize_items(group_id: &str, items: &[Value]) -> Vec<ChecklistItem> {
    items
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let item = value.as_object();
            ChecklistItem {
                id: id_field(item).unwrap_or_else(|| format!("{group_id}-i{}", index + 1)),
                label: str_field(item, "label"),
                completed: bool_field(item, "completed"),
            }
        })
        .collect()
}

/// Enforce the verification invariant on data coming in from outside.
fn settle(mut group: Group) -> Group {
    group.revoke_verification_if_incomplete();
    if !group.manager_verified {
        group.verified_at = None;
    }
    group
}

fn synthesized_group_id(section_key: &str, index: usize) -> String {
    format!("{section_key}-g{}", index + 1)
}

// ============================================================================
// Lenient field access
// ============================================================================

fn array_field<'a>(obj: Option<&'a Object>, key: &str) -> Option<&'a [Value]> {
    obj?.get(key)?.as_array().map(Vec::as_slice)
}

fn str_field(obj: Option<&Object>, key: &str) -> String {
    obj.and_then(|o| o.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn optional_str_field(obj: Option<&Object>, key: &str) -> Option<String> {
    non_empty(str_field(obj, key))
}

fn bool_field(obj: Option<&Object>, key: &str) -> bool {
    obj.and_then(|o| o.get(key))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Ids may arrive as strings or numbers; anything else counts as missing.
fn id_field(obj: Option<&Object>) -> Option<String> {
    match obj?.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `assignedTech` wins over the legacy `techName`; blank becomes the sentinel.
fn tech_field(obj: Option<&Object>) -> String {
    let assigned = str_field(obj, "assignedTech");
    let tech = if assigned.trim().is_empty() {
        str_field(obj, "techName")
    } else {
        assigned
    };
    normalize_tech_name(&tech)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
