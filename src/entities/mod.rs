// Entity Models
//
// Users and roles as handed over by the persistence/auth layers.
// The evaluator only ever reads them.

pub mod role;
pub mod user;

pub use role::ActorRole;
pub use user::{AccountId, AccountMembership, Seniority, User, UserId};
