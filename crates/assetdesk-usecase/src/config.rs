//! Configuration for AssetDesk

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use assetdesk_domain::model::ids::{DepartmentId, IT_DEPARTMENT_ID};
use assetdesk_domain::service::admin_policy::AdminPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryConfig {
    /// Department whose employees may hold admin accounts
    pub admin_department_id: DepartmentId,

    /// Minimum password length in characters
    pub min_password_length: usize,

    /// JSON snapshot file; in-memory only when absent
    pub snapshot_path: Option<PathBuf>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            admin_department_id: IT_DEPARTMENT_ID,
            min_password_length: 8,
            snapshot_path: None,
        }
    }
}

impl InventoryConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn admin_policy(&self) -> AdminPolicy {
        AdminPolicy::new(self.admin_department_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: InventoryConfig = serde_json::from_str(r#"{"minPasswordLength": 12}"#).unwrap();

        assert_eq!(config.min_password_length, 12);
        assert_eq!(config.admin_department_id, IT_DEPARTMENT_ID);
        assert!(config.snapshot_path.is_none());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assetdesk.json");
        std::fs::write(
            &path,
            r#"{"adminDepartmentId": 3, "snapshotPath": "/var/lib/assetdesk/store.json"}"#,
        )
        .unwrap();

        let config = InventoryConfig::from_file(&path).unwrap();
        assert_eq!(config.admin_department_id, DepartmentId::new(3));
        assert_eq!(config.admin_policy().admin_department(), DepartmentId::new(3));
        assert_eq!(
            config.snapshot_path.as_deref(),
            Some(Path::new("/var/lib/assetdesk/store.json"))
        );
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            InventoryConfig::from_file(&missing),
            Err(ConfigError::Io(_))
        ));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{").unwrap();
        assert!(matches!(
            InventoryConfig::from_file(&broken),
            Err(ConfigError::Json(_))
        ));
    }
}
