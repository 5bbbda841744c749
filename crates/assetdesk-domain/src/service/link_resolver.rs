//! Link Resolver - Converges software installations onto one record
//!
//! When hardware reports a software package, the resolver:
//! 1. Lookup: finds the stored package with the same (name, version)
//! 2. Found: uses it as the canonical record, no new row is written
//! 3. Not found: stores the incoming package as the canonical record
//! 4. Attach: points every listed hardware asset at the canonical record
//!    and stamps the link time
//!
//! Every hardware id is checked before anything is written. The caller is
//! expected to run `attach` inside a [`crate::repository::UnitOfWork`]
//! transaction so the software row and the hardware links commit together.

use chrono::{DateTime, Utc};

use crate::error::{EntityKind, InventoryError, RelationshipPreconditionError};
use crate::model::hardware_asset::HardwareAsset;
use crate::model::ids::{HardwareAssetId, SoftwareAssetId};
use crate::model::software_asset::SoftwareAsset;
use crate::repository::{HardwareAssetRepository, RepositoryError, SoftwareAssetRepository};

/// A software package together with the hardware it was reported on
#[derive(Debug, Clone)]
pub struct SoftwareInstallation {
    /// The package as reported; may be transient (no id)
    pub software: SoftwareAsset,
    /// Hardware the package is installed on
    pub hardware: Vec<HardwareAssetId>,
}

impl SoftwareInstallation {
    pub fn new(software: SoftwareAsset) -> Self {
        Self {
            software,
            hardware: Vec::new(),
        }
    }

    /// Builder: add a hardware asset the package is installed on
    pub fn on(mut self, hardware_id: HardwareAssetId) -> Self {
        if !self.hardware.contains(&hardware_id) {
            self.hardware.push(hardware_id);
        }
        self
    }
}

/// Outcome of the lookup step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A record with the same key was already stored
    Existing(SoftwareAsset),
    /// The incoming package was stored as the new canonical record
    Created(SoftwareAsset),
}

impl Resolution {
    pub fn software(&self) -> &SoftwareAsset {
        match self {
            Resolution::Existing(software) | Resolution::Created(software) => software,
        }
    }

    pub fn into_software(self) -> SoftwareAsset {
        match self {
            Resolution::Existing(software) | Resolution::Created(software) => software,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Resolution::Created(_))
    }
}

/// Result of attaching an installation
#[derive(Debug, Clone)]
pub struct LinkOutcome {
    /// The canonical record the hardware now points at
    pub software: SoftwareAsset,
    /// Whether the canonical record was created by this call
    pub created: bool,
    /// The hardware assets as written, with their new links
    pub linked: Vec<HardwareAsset>,
}

/// LinkResolver - find-or-create for software packages
///
/// Stateless; all state lives in the repositories it is handed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkResolver;

impl LinkResolver {
    pub fn new() -> Self {
        Self
    }

    /// Lookup + create: return the canonical record for `incoming`
    pub fn resolve<R>(
        &self,
        repo: &mut R,
        incoming: SoftwareAsset,
    ) -> Result<Resolution, RepositoryError>
    where
        R: SoftwareAssetRepository + ?Sized,
    {
        if let Some(existing) = repo.find_software_by_key(&incoming.key())? {
            return Ok(Resolution::Existing(existing));
        }
        let created = repo.insert_software(incoming)?;
        Ok(Resolution::Created(created))
    }

    /// Resolve the package and link every listed hardware asset to it
    pub fn attach<R>(
        &self,
        repo: &mut R,
        installation: SoftwareInstallation,
        now: DateTime<Utc>,
    ) -> Result<LinkOutcome, InventoryError>
    where
        R: SoftwareAssetRepository + HardwareAssetRepository + ?Sized,
    {
        let mut hardware = Vec::with_capacity(installation.hardware.len());
        for id in &installation.hardware {
            let asset = repo
                .find_hardware(*id)?
                .ok_or(RelationshipPreconditionError::MissingHardware(*id))?;
            hardware.push(asset);
        }

        let resolution = self.resolve(repo, installation.software)?;
        let created = resolution.was_created();
        let software = resolution.into_software();
        let software_id = canonical_id(&software)?;

        for asset in &mut hardware {
            asset.link_software(software_id, now);
            repo.update_hardware(asset)?;
        }

        Ok(LinkOutcome {
            software,
            created,
            linked: hardware,
        })
    }
}

fn canonical_id(software: &SoftwareAsset) -> Result<SoftwareAssetId, RepositoryError> {
    software.id().ok_or(RepositoryError::MissingIdentity {
        entity: EntityKind::SoftwareAsset,
    })
}
