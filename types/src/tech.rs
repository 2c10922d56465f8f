//! Technician roster and the `(unassigned)` sentinel.

/// Technician value meaning "nobody assigned".
pub const UNASSIGNED: &str = "(unassigned)";

const DEFAULT_ROSTER: &[&str] = &["Sinclaire Hoyt", "Tech 1", "Tech 2", "Tech 3"];

/// Coerce the sentinel and blank input to [`UNASSIGNED`]; keep anything else verbatim.
#[must_use]
pub fn normalize_tech_name(name: &str) -> String {
    if name == UNASSIGNED || name.trim().is_empty() {
        UNASSIGNED.to_string()
    } else {
        name.to_string()
    }
}

/// Names offered for assignment, always led by the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechRoster {
    names: Vec<String>,
}

impl TechRoster {
    /// Build a roster from configured names. Blank entries, duplicates and
    /// explicit sentinels are dropped; the sentinel is always the first option.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = vec![UNASSIGNED.to_string()];
        for name in names {
            let name = name.into();
            let trimmed = name.trim();
            if trimmed.is_empty() || trimmed == UNASSIGNED {
                continue;
            }
            if !out.iter().any(|existing| existing == trimmed) {
                out.push(trimmed.to_string());
            }
        }
        Self { names: out }
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.names
    }

    /// True for the sentinel, blank input, or a rostered name.
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        let normalized = normalize_tech_name(name);
        self.names.iter().any(|option| *option == normalized)
    }
}

impl Default for TechRoster {
    fn default() -> Self {
        Self::new(DEFAULT_ROSTER.iter().copied())
    }
}
