// ⚙️ Configuration - how external role names map onto Admin / Member

use crate::entities::ActorRole;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding the admin role name
pub const ADMIN_ROLE_ENV: &str = "ACCOUNT_ACL_ADMIN_ROLE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclConfig {
    /// Role name that denotes an internal administrator
    #[serde(default = "default_admin_role")]
    pub admin_role: String,

    /// Role used when the caller supplies none
    #[serde(default)]
    pub default_role: ActorRole,
}

fn default_admin_role() -> String {
    "admin".to_string()
}

impl Default for AclConfig {
    fn default() -> Self {
        AclConfig {
            admin_role: default_admin_role(),
            default_role: ActorRole::default(),
        }
    }
}

impl AclConfig {
    /// Load config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: AclConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        tracing::debug!(admin_role = %config.admin_role, "loaded config");
        Ok(config)
    }

    /// Defaults with `ACCOUNT_ACL_ADMIN_ROLE` applied when set
    pub fn from_env() -> Self {
        Self::default().with_admin_role_from(std::env::var(ADMIN_ROLE_ENV).ok())
    }

    fn with_admin_role_from(mut self, value: Option<String>) -> Self {
        if let Some(role) = value.filter(|v| !v.trim().is_empty()) {
            self.admin_role = role.trim().to_string();
        }
        self
    }

    /// Resolve a caller-supplied role name; `None` yields `default_role`
    pub fn resolve_role(&self, name: Option<&str>) -> ActorRole {
        match name {
            Some(name) => ActorRole::from_role_name(name, &self.admin_role),
            None => self.default_role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AclConfig::default();
        assert_eq!(config.admin_role, "admin");
        assert_eq!(config.default_role, ActorRole::Member);
    }

    #[test]
    fn test_resolve_role() {
        let config = AclConfig::default();
        assert_eq!(config.resolve_role(None), ActorRole::Member);
        assert_eq!(config.resolve_role(Some("admin")), ActorRole::Admin);
        assert_eq!(config.resolve_role(Some("editor")), ActorRole::Member);
    }

    #[test]
    fn test_admin_role_override() {
        let config = AclConfig::default().with_admin_role_from(Some(" ROLE_ADMIN ".to_string()));
        assert_eq!(config.admin_role, "ROLE_ADMIN");
        assert_eq!(config.resolve_role(Some("role_admin")), ActorRole::Admin);
        assert_eq!(config.resolve_role(Some("admin")), ActorRole::Member);

        let unchanged = AclConfig::default().with_admin_role_from(Some("  ".to_string()));
        assert_eq!(unchanged.admin_role, "admin");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"admin_role": "superuser"}}"#).unwrap();

        let config = AclConfig::from_file(file.path()).unwrap();
        assert_eq!(config.admin_role, "superuser");
        assert_eq!(config.default_role, ActorRole::Member);
    }

    #[test]
    fn test_from_file_missing() {
        let err = AclConfig::from_file("/nonexistent/acl.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
