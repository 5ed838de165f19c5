// 👤 User Entity - account member with derived seniority
//
// Terminology:
// - Main    - the account's original user (created_by is empty)
// - Regular - any user created by someone else (created_by is set)
//
// Seniority is computed from created_by on every call and never stored.

use crate::error::{AclError, AclResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Opaque user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque account identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// SENIORITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seniority {
    /// Original member of the account
    Main,

    /// Created afterward by another user
    Regular,
}

impl Seniority {
    pub fn of(created_by: Option<UserId>) -> Self {
        match created_by {
            None => Seniority::Main,
            Some(_) => Seniority::Regular,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Main => "main",
            Seniority::Regular => "regular",
        }
    }
}

// ============================================================================
// ACCOUNT MEMBERSHIP
// ============================================================================

/// Link record between a user and an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMembership {
    pub user_id: UserId,
    pub account_id: AccountId,
}

// ============================================================================
// USER ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,

    /// Who created this user (None = account's main user)
    #[serde(default)]
    pub created_by: Option<UserId>,

    /// Membership records in load order; the first one is authoritative
    #[serde(default, alias = "account_users")]
    pub memberships: Vec<AccountMembership>,
}

impl User {
    /// Main user (no creator)
    pub fn main(user_id: UserId) -> Self {
        User {
            user_id,
            created_by: None,
            memberships: Vec::new(),
        }
    }

    /// Regular user created by `created_by`
    pub fn regular(user_id: UserId, created_by: UserId) -> Self {
        User {
            user_id,
            created_by: Some(created_by),
            memberships: Vec::new(),
        }
    }

    /// Builder: append a membership for this user
    pub fn with_account(mut self, account_id: AccountId) -> Self {
        self.add_membership(account_id);
        self
    }

    pub fn add_membership(&mut self, account_id: AccountId) {
        self.memberships.push(AccountMembership {
            user_id: self.user_id,
            account_id,
        });
    }

    pub fn seniority(&self) -> Seniority {
        Seniority::of(self.created_by)
    }

    pub fn is_main(&self) -> bool {
        self.seniority() == Seniority::Main
    }

    /// Resolve the account this user belongs to.
    ///
    /// The first membership record wins. Having none is a data-integrity
    /// error, never a silent fallback.
    pub fn account_id(&self) -> AclResult<AccountId> {
        let first = self.memberships.first().ok_or_else(|| {
            tracing::warn!(user_id = %self.user_id, "user has no account membership");
            AclError::MissingAccountMembership {
                user_id: self.user_id,
            }
        })?;

        if self.memberships.len() > 1 {
            tracing::debug!(
                user_id = %self.user_id,
                memberships = self.memberships.len(),
                account_id = %first.account_id,
                "multiple memberships, using first"
            );
        }

        Ok(first.account_id)
    }
}

// ============================================================================
// TESTS
// ============================================================================
