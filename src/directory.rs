// 📇 User Directory - read-only lookup of already-loaded user records
//
// Records come from JSON (array of users) or CSV (one row per membership).
// Nothing is ever written back.

use crate::entities::{AccountId, User, UserId};
use crate::error::{AclError, AclResult};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// ============================================================================
// CSV ROW
// ============================================================================

/// Flat row: `user_id,created_by,account_id`
#[derive(Debug, Deserialize)]
struct UserRow {
    user_id: u64,
    created_by: Option<u64>,
    account_id: Option<u64>,
}

// ============================================================================
// DIRECTORY
// ============================================================================

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<UserId, User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records; a later record with the same id replaces the earlier one
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut directory = Self::new();
        for user in users {
            directory.insert(user);
        }
        directory
    }

    /// Load a JSON array of users
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read users file: {:?}", path.as_ref()))?;

        let users: Vec<User> =
            serde_json::from_str(&content).context("Failed to parse users JSON")?;

        for user in &users {
            if let Some(stray) = user.memberships.iter().find(|m| m.user_id != user.user_id) {
                bail!(
                    "User {} carries a membership record for user {} (account {})",
                    user.user_id,
                    stray.user_id,
                    stray.account_id
                );
            }
        }

        let directory = Self::from_users(users);
        tracing::info!(users = directory.len(), "loaded users from JSON");
        Ok(directory)
    }

    /// Load CSV rows; rows sharing a user_id add memberships in file order
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut rdr = csv::Reader::from_path(path.as_ref())
            .with_context(|| format!("Failed to open users CSV: {:?}", path.as_ref()))?;

        let mut directory = Self::new();

        for (line, result) in rdr.deserialize().enumerate() {
            let row: UserRow =
                result.with_context(|| format!("Failed to deserialize user row {}", line + 1))?;

            let user_id = UserId(row.user_id);
            let created_by = row.created_by.map(UserId);
            let user = directory.users.entry(user_id).or_insert_with(|| User {
                user_id,
                created_by,
                memberships: Vec::new(),
            });

            // Seniority comes from created_by, so every row must agree on it
            if user.created_by != created_by {
                bail!(
                    "User row {}: created_by {:?} for user {} conflicts with earlier {:?}",
                    line + 1,
                    created_by.map(|id| id.0),
                    user_id,
                    user.created_by.map(|id| id.0)
                );
            }

            if let Some(account_id) = row.account_id {
                user.add_membership(AccountId(account_id));
            }
        }

        tracing::info!(users = directory.len(), "loaded users from CSV");
        Ok(directory)
    }

    /// Pick the loader by file extension (`.csv`, anything else is JSON)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let is_csv = path
            .as_ref()
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        if is_csv {
            Self::from_csv_file(path)
        } else {
            Self::from_json_file(path)
        }
    }

    pub fn insert(&mut self, user: User) {
        self.users.insert(user.user_id, user);
    }

    pub fn get(&self, user_id: UserId) -> Option<&User> {
        self.users.get(&user_id)
    }

    pub fn require(&self, user_id: UserId) -> AclResult<&User> {
        self.get(user_id).ok_or(AclError::UnknownUser { user_id })
    }

    /// All users ordered by id
    pub fn users(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self.users.values().collect();
        users.sort_by_key(|u| u.user_id);
        users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_from_users_and_lookup() {
        let directory = UserDirectory::from_users(vec![
            User::main(UserId(200)).with_account(AccountId(1000)),
            User::regular(UserId(300), UserId(200)).with_account(AccountId(1000)),
        ]);

        assert_eq!(directory.len(), 2);
        assert!(directory.get(UserId(200)).unwrap().is_main());
        assert!(directory.get(UserId(999)).is_none());
        assert_eq!(
            directory.require(UserId(999)),
            Err(AclError::UnknownUser { user_id: UserId(999) })
        );
    }

    #[test]
    fn test_users_sorted() {
        let directory = UserDirectory::from_users(vec![
            User::main(UserId(400)),
            User::main(UserId(100)),
            User::main(UserId(300)),
        ]);
        let ids: Vec<u64> = directory.users().iter().map(|u| u.user_id.0).collect();
        assert_eq!(ids, vec![100, 300, 400]);
    }

    #[test]
    fn test_empty_directory() {
        let directory = UserDirectory::new();
        assert!(directory.is_empty());
        assert!(directory.users().is_empty());
    }

    #[test]
    fn test_from_json_file() {
        let file = temp_file(
            ".json",
            r#"[
                {"user_id": 200, "memberships": [{"user_id": 200, "account_id": 1000}]},
                {"user_id": 300, "created_by": 200, "memberships": [{"user_id": 300, "account_id": 1000}]}
            ]"#,
        );

        let directory = UserDirectory::from_path(file.path()).unwrap();
        assert_eq!(directory.len(), 2);
        let regular = directory.require(UserId(300)).unwrap();
        assert!(!regular.is_main());
        assert_eq!(regular.account_id(), Ok(AccountId(1000)));
    }

    #[test]
    fn test_from_csv_file() {
        let file = temp_file(
            ".csv",
            "user_id,created_by,account_id\n\
             200,,1000\n\
             300,200,1000\n\
             300,200,2000\n\
             500,200,\n",
        );

        let directory = UserDirectory::from_path(file.path()).unwrap();
        assert_eq!(directory.len(), 3);

        let main = directory.require(UserId(200)).unwrap();
        assert!(main.is_main());

        let regular = directory.require(UserId(300)).unwrap();
        assert_eq!(regular.memberships.len(), 2);
        assert_eq!(regular.account_id(), Ok(AccountId(1000)));

        let orphan = directory.require(UserId(500)).unwrap();
        assert!(orphan.memberships.is_empty());
        assert!(orphan.account_id().is_err());
    }

    #[test]
    fn test_from_csv_file_conflicting_created_by() {
        let file = temp_file(
            ".csv",
            "user_id,created_by,account_id\n\
             200,,1000\n\
             300,,1000\n\
             300,200,1000\n",
        );

        let err = UserDirectory::from_csv_file(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("User row 3"), "{}", message);
        assert!(message.contains("conflicts"), "{}", message);
    }

    #[test]
    fn test_from_json_file_foreign_membership() {
        let file = temp_file(
            ".json",
            r#"[
                {"user_id": 300, "created_by": 200, "memberships": [{"user_id": 400, "account_id": 1000}]}
            ]"#,
        );

        let err = UserDirectory::from_json_file(file.path()).unwrap_err();
        assert!(err
            .to_string()
            .contains("User 300 carries a membership record for user 400"));
    }

    #[test]
    fn test_from_json_file_invalid() {
        let file = temp_file(".json", "not json");
        let err = UserDirectory::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse users JSON"));
    }
}
