// ⚠️ Error Types - data-integrity failures, never permission outcomes
//
// A denial is `Ok(false)`. An `Err` means the records handed to the
// evaluator were incomplete and the question could not be answered.

use crate::entities::UserId;

pub type AclResult<T> = Result<T, AclError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AclError {
    /// The user has no account-membership record, so its account is unknown.
    #[error("user {user_id} has no account membership record")]
    MissingAccountMembership { user_id: UserId },

    /// Directory lookup failed.
    #[error("user {user_id} not found in directory")]
    UnknownUser { user_id: UserId },

    #[error("unknown role: {0}")]
    UnknownRole(String),
}

impl AclError {
    /// True for the precondition violation callers must surface as an
    /// internal error rather than an access denial.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, AclError::MissingAccountMembership { .. })
    }
}
