// 🎭 Actor Role - supplied by the caller, never derived from user data

use crate::error::AclError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    /// Internal administrator
    Admin,

    /// Ordinary account user
    #[default]
    Member,
}

impl ActorRole {
    /// Map an externally defined role name onto the two-role model.
    ///
    /// Only a match on `admin_role` (case-insensitive) yields `Admin`;
    /// every other value is treated as `Member`.
    pub fn from_role_name(name: &str, admin_role: &str) -> Self {
        if name.trim().eq_ignore_ascii_case(admin_role.trim()) {
            ActorRole::Admin
        } else {
            ActorRole::Member
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, ActorRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::Admin => "admin",
            ActorRole::Member => "member",
        }
    }
}

impl FromStr for ActorRole {
    type Err = AclError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(ActorRole::Admin),
            "member" => Ok(ActorRole::Member),
            other => Err(AclError::UnknownRole(other.to_string())),
        }
    }
}
