//! Plain-text rendering of the session.

use gameday_engine::gameday_store::KeyValueStore;
use gameday_engine::gameday_types::{Game, Group, Role, Section, TechRoster};
use gameday_engine::{Session, Warning};

const PLACEHOLDER_TITLE: &str = "TBD";
const PLACEHOLDER_META: &str = "--";

pub fn render_session<S: KeyValueStore>(session: &Session<S>, role: Role) -> String {
    let mut out = render_warnings(session.warnings());
    out.push_str(&render_header(session.game(), role));
    for (key, section) in session.visible_sections(role) {
        out.push('\n');
        out.push_str(&render_section(key, section));
    }
    out
}

pub fn render_warnings(warnings: &[Warning]) -> String {
    warnings
        .iter()
        .map(|warning| format!("! {warning}\n"))
        .collect()
}

pub fn render_header(game: Option<&Game>, role: Role) -> String {
    let (opponent, date, time, manager) = match game {
        Some(game) => (
            or_placeholder(&game.opponent, PLACEHOLDER_TITLE),
            or_placeholder(&game.date, PLACEHOLDER_META),
            or_placeholder(&game.time, PLACEHOLDER_META),
            or_placeholder(&game.manager_name, PLACEHOLDER_TITLE),
        ),
        None => (
            PLACEHOLDER_TITLE,
            PLACEHOLDER_META,
            PLACEHOLDER_META,
            PLACEHOLDER_TITLE,
        ),
    };

    let mut out = format!("{opponent}\n{date} • {time}\n");
    out.push_str(&format!("Assigned Manager: {manager}\n"));
    out.push_str(&format!("Viewing as: {}\n", role.display_name()));
    out
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

pub fn render_section(key: &str, section: &Section) -> String {
    let mut out = format!("{} [{key}] ({})\n", section.name, section.progress());
    for group in &section.groups {
        out.push_str(&render_group(group));
    }
    out
}

pub fn render_group(group: &Group) -> String {
    let mut out = format!("  {} [{}]", group.title, group.id);
    if !group.subtitle.is_empty() {
        out.push_str(&format!(" - {}", group.subtitle));
    }
    out.push('\n');
    out.push_str(&format!(
        "    Tech: {} | {}\n",
        group.assigned_tech,
        group.progress()
    ));

    for item in &group.items {
        let mark = if item.completed { 'x' } else { ' ' };
        out.push_str(&format!("    [{mark}] {} ({})\n", item.label, item.id));
    }

    match (&group.verified_at, group.manager_verified) {
        (Some(at), true) => out.push_str(&format!("    Verified by manager at: {at}\n")),
        _ => out.push_str("    Awaiting manager verification\n"),
    }
    out
}

pub fn render_roster(roster: &TechRoster) -> String {
    roster
        .options()
        .iter()
        .map(|name| format!("{name}\n"))
        .collect()
}
