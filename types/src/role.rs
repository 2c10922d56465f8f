//! Viewer role and the UI-level gating derived from it.
//!
//! The role is chosen by the presentation layer; nothing here enforces
//! authorization beyond answering what a role may see and do.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checklist::BB_OPS;

const ROLE_PARSE_VALUES: &[&str] = &["ADMIN", "MANAGER", "TECH"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid role '{raw}'; expected one of: {expected:?}")]
pub struct EnumParseError {
    raw: String,
    expected: &'static [&'static str],
}

impl EnumParseError {
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub const fn expected(&self) -> &'static [&'static str] {
        self.expected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    #[default]
    Manager,
    Tech,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Tech => "TECH",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Tech => "Tech",
        }
    }

    pub fn parse(s: &str) -> Result<Self, EnumParseError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "MANAGER" => Ok(Role::Manager),
            "TECH" => Ok(Role::Tech),
            _ => Err(EnumParseError {
                raw: s.trim().to_string(),
                expected: ROLE_PARSE_VALUES,
            }),
        }
    }

    #[must_use]
    pub fn all() -> &'static [Role] {
        &[Role::Admin, Role::Manager, Role::Tech]
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    #[must_use]
    pub const fn can_verify(self) -> bool {
        matches!(self, Role::Manager | Role::Admin)
    }

    #[must_use]
    pub const fn can_assign(self) -> bool {
        self.is_admin() || self.can_verify()
    }

    /// BBOps is hidden from technicians; every other section is visible to all.
    #[must_use]
    pub fn can_view_section(self, section_key: &str) -> bool {
        section_key != BB_OPS || !matches!(self, Role::Tech)
    }

    #[must_use]
    pub const fn permissions(self) -> Permissions {
        Permissions {
            can_verify: self.can_verify(),
            can_assign: self.can_assign(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gating predicates handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    pub can_verify: bool,
    pub can_assign: bool,
}
