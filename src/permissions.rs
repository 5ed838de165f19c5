// 🔐 Permission Evaluator - who may edit or delete which account user
//
// Terminology:
//      Admin   - internal admin (role supplied by the caller)
//      Main    - main user of the account (the oldest; created_by is empty)
//      Regular - account user created by someone (created_by is set)
//
// Account isolation is checked first and overrides every other rule.

use crate::entities::{ActorRole, User, UserId};
use crate::error::AclResult;
use serde::Serialize;

// ============================================================================
// DECISION SUMMARY
// ============================================================================

/// Both decisions for one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserPermissions {
    pub target: UserId,
    pub can_edit: bool,
    pub can_delete: bool,
}

// ============================================================================
// EVALUATOR
// ============================================================================

/// Evaluates edit/delete permissions for a fixed actor.
///
/// Role and seniority are captured once in `new`; the actor record is
/// only borrowed, so one evaluator can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct PermissionEvaluator<'a> {
    actor: &'a User,
    role: ActorRole,
    is_admin: bool,
    is_main: bool,
}

impl<'a> PermissionEvaluator<'a> {
    pub fn new(actor: &'a User, role: ActorRole) -> Self {
        let is_admin = role.is_admin();
        let is_main = actor.is_main();

        tracing::debug!(
            actor = %actor.user_id,
            role = role.as_str(),
            seniority = actor.seniority().as_str(),
            "permission evaluator ready"
        );

        PermissionEvaluator {
            actor,
            role,
            is_admin,
            is_main,
        }
    }

    /// Evaluator for an actor with no role given (treated as `Member`)
    pub fn member(actor: &'a User) -> Self {
        Self::new(actor, ActorRole::default())
    }

    pub fn actor_id(&self) -> UserId {
        self.actor.user_id
    }

    pub fn role(&self) -> ActorRole {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn is_main(&self) -> bool {
        self.is_main
    }

    /// Do actor and target resolve to the same account?
    pub fn same_account(&self, target: &User) -> AclResult<bool> {
        let actor_account = self.actor.account_id()?;
        let target_account = target.account_id()?;
        Ok(actor_account == target_account)
    }

    /// EDIT permission:
    ///
    /// | actor admin | actor main | target main | result |
    /// |-------------|------------|-------------|--------|
    /// | yes         | -          | -           | allow  |
    /// | no          | yes        | -           | allow  |
    /// | no          | no         | yes         | deny   |
    /// | no          | no         | no          | allow  |
    pub fn can_edit(&self, target: &User) -> AclResult<bool> {
        if !self.same_account(target)? {
            tracing::trace!(actor = %self.actor.user_id, target = %target.user_id, "edit denied: other account");
            return Ok(false);
        }

        let allowed = match (self.is_admin, self.is_main, target.is_main()) {
            (true, _, _) => true,
            (false, true, _) => true,
            (false, false, true) => false,
            (false, false, false) => true,
        };

        tracing::trace!(actor = %self.actor.user_id, target = %target.user_id, allowed, "edit decision");
        Ok(allowed)
    }

    /// DELETE permission:
    ///
    /// Nobody deletes the main user, and nobody deletes themself,
    /// whatever their role. Every other same-account user may be deleted.
    pub fn can_delete(&self, target: &User) -> AclResult<bool> {
        if !self.same_account(target)? {
            tracing::trace!(actor = %self.actor.user_id, target = %target.user_id, "delete denied: other account");
            return Ok(false);
        }

        let is_self = target.user_id == self.actor.user_id;
        let allowed = !target.is_main() && !is_self;

        tracing::trace!(actor = %self.actor.user_id, target = %target.user_id, allowed, "delete decision");
        Ok(allowed)
    }

    /// Edit and delete answers for one target
    pub fn permissions_for(&self, target: &User) -> AclResult<UserPermissions> {
        Ok(UserPermissions {
            target: target.user_id,
            can_edit: self.can_edit(target)?,
            can_delete: self.can_delete(target)?,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
