//! User identity carried in bearer tokens

use serde::{Deserialize, Serialize};

/// User resolved from a bearer token
///
/// Owned by the token collaborator. The gate only reads the `active` and
/// `sysop` flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(default)]
    active: bool,
    #[serde(default)]
    sysop: bool,
}

impl User {
    pub fn new(id: impl Into<String>, active: bool, sysop: bool) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            active,
            sysop,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    // Getters

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_sysop(&self) -> bool {
        self.sysop
    }

    /// Active sysops may reach every account
    pub fn is_active_sysop(&self) -> bool {
        self.active && self.sysop
    }
}
