// Account ACL - Core Library
// Edit/delete permission rules between users of the same account

pub mod config;
pub mod directory;
pub mod entities;
pub mod error;
pub mod permissions;

// Re-export commonly used types
pub use config::AclConfig;
pub use directory::UserDirectory;
pub use entities::{AccountId, AccountMembership, ActorRole, Seniority, User, UserId};
pub use error::{AclError, AclResult};
pub use permissions::{PermissionEvaluator, UserPermissions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
