//! SoftwareAsset - A software package installed on hardware
//!
//! Two software assets with the same (name, version) are the same package.
//! Storage holds at most one record per [`SoftwareKey`]; the
//! [`crate::service::link_resolver::LinkResolver`] makes every installation
//! converge onto it.
//!
//! The hardware a package is installed on is not stored here. Each
//! HardwareAsset points at its software by id, and the installed-on list
//! is a query over that foreign key.

use serde::{Deserialize, Serialize};

use super::ids::SoftwareAssetId;
use crate::error::FieldValidationError;
use crate::validation::TextRule;

/// The natural key of a software package
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SoftwareKey {
    pub name: String,
    pub version: String,
}

impl core::fmt::Display for SoftwareKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareAsset {
    id: Option<SoftwareAssetId>,
    name: String,
    version: String,
    manufacturer: String,
}

impl SoftwareAsset {
    /// Create a new, not yet persisted SoftwareAsset
    pub fn new(
        name: &str,
        version: &str,
        manufacturer: &str,
    ) -> Result<Self, FieldValidationError> {
        Ok(Self {
            id: None,
            name: TextRule::SoftwareName.apply("software name", name)?,
            version: TextRule::SoftwareVersion.apply("software version", version)?,
            manufacturer: TextRule::Manufacturer.apply("manufacturer", manufacturer)?,
        })
    }

    /// Builder: attach the identity assigned by storage
    pub fn with_id(mut self, id: SoftwareAssetId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<SoftwareAssetId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn key(&self) -> SoftwareKey {
        SoftwareKey {
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }

    /// Whether this asset is the same package as `key`
    pub fn is_same_package(&self, key: &SoftwareKey) -> bool {
        self.name == key.name && self.version == key.version
    }

    /// Update the descriptive manufacturer field
    ///
    /// Name and version form the identity of the package and have no setter.
    pub fn set_manufacturer(&mut self, raw: &str) -> Result<(), FieldValidationError> {
        self.manufacturer = TextRule::Manufacturer.apply("manufacturer", raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_software_creation() {
        let software = SoftwareAsset::new(" Windows 10 ", "22H2", "Microsoft").unwrap();

        assert_eq!(software.name(), "Windows 10");
        assert_eq!(software.version(), "22H2");
        assert_eq!(software.key().to_string(), "Windows 10 22H2");
    }

    #[test]
    fn test_same_package_is_exact_on_name_and_version() {
        let a = SoftwareAsset::new("Windows 10", "22H2", "Microsoft").unwrap();
        let b = SoftwareAsset::new("Windows 10", "22H2", "Microsoft Corp.").unwrap();
        let c = SoftwareAsset::new("windows 10", "22H2", "Microsoft").unwrap();

        assert!(a.is_same_package(&b.key()));
        assert!(!a.is_same_package(&c.key()));
    }

    #[test]
    fn test_invalid_fields_rejected() {
        assert_eq!(
            SoftwareAsset::new("Win/10", "22H2", "Microsoft").unwrap_err().field,
            "software name"
        );
        assert_eq!(
            SoftwareAsset::new("Windows 10", "22 H2", "Microsoft").unwrap_err().field,
            "software version"
        );
        assert_eq!(
            SoftwareAsset::new("Windows 10", "22H2", "").unwrap_err().field,
            "manufacturer"
        );
    }

    #[test]
    fn test_failed_manufacturer_update_keeps_value() {
        let mut software = SoftwareAsset::new("Office", "2021", "Microsoft").unwrap();

        assert!(software.set_manufacturer("Micro$oft").is_err());
        assert_eq!(software.manufacturer(), "Microsoft");
    }
}
