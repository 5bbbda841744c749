//! Software Asset Service
//!
//! A software package is stored once per (name, version). Adding a package
//! that is already known links the listed hardware to the stored record.

use chrono::Utc;
use tracing::info;

use assetdesk_domain::error::{EntityKind, Result};
use assetdesk_domain::model::hardware_asset::HardwareAsset;
use assetdesk_domain::model::ids::{HardwareAssetId, SoftwareAssetId};
use assetdesk_domain::model::software_asset::SoftwareAsset;
use assetdesk_domain::repository::UnitOfWork;
use assetdesk_domain::service::link_resolver::{LinkOutcome, LinkResolver, SoftwareInstallation};

use super::found;

pub struct SoftwareAssetService<S> {
    store: S,
    resolver: LinkResolver,
}

impl<S: UnitOfWork> SoftwareAssetService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            resolver: LinkResolver::new(),
        }
    }

    /// Store a package, or reuse the stored one, and link its hardware
    pub fn add(&mut self, installation: SoftwareInstallation) -> Result<LinkOutcome> {
        let resolver = self.resolver;
        let now = Utc::now();
        let outcome = self
            .store
            .transaction(|tx| resolver.attach(tx, installation, now))?;
        info!(
            software_id = ?outcome.software.id(),
            created = outcome.created,
            hardware = outcome.linked.len(),
            "software asset added"
        );
        Ok(outcome)
    }

    pub fn get_by_id(&self, id: SoftwareAssetId) -> Result<SoftwareAsset> {
        found(self.store.find_software(id)?, EntityKind::SoftwareAsset, id.get())
    }

    pub fn get_all(&self) -> Result<Vec<SoftwareAsset>> {
        Ok(self.store.list_software()?)
    }

    /// The package a hardware asset runs; empty when it runs none
    pub fn get_all_for(&self, hardware_id: HardwareAssetId) -> Result<Vec<SoftwareAsset>> {
        let hardware = found(
            self.store.find_hardware(hardware_id)?,
            EntityKind::HardwareAsset,
            hardware_id.get(),
        )?;
        match hardware.software_id() {
            Some(id) => Ok(self.store.find_software(id)?.into_iter().collect()),
            None => Ok(Vec::new()),
        }
    }

    /// Every hardware asset the package is installed on
    pub fn installed_on(&self, id: SoftwareAssetId) -> Result<Vec<HardwareAsset>> {
        self.get_by_id(id)?;
        Ok(self.store.hardware_for_software(id)?)
    }

    /// Change the manufacturer; name and version identify the package
    pub fn update(&mut self, id: SoftwareAssetId, manufacturer: &str) -> Result<SoftwareAsset> {
        self.store.transaction(|tx| -> Result<SoftwareAsset> {
            let mut software = found(tx.find_software(id)?, EntityKind::SoftwareAsset, id.get())?;
            software.set_manufacturer(manufacturer)?;
            tx.update_software(&software)?;
            info!(software_id = %id, "software asset updated");
            Ok(software)
        })
    }

    /// Delete a package and clear every hardware link to it
    pub fn delete(&mut self, id: SoftwareAssetId) -> Result<()> {
        let unlinked = self.store.transaction(|tx| -> Result<usize> {
            found(tx.find_software(id)?, EntityKind::SoftwareAsset, id.get())?;
            let hardware = tx.hardware_for_software(id)?;
            for mut asset in hardware.iter().cloned() {
                asset.unlink_software();
                tx.update_hardware(&asset)?;
            }
            tx.delete_software(id)?;
            Ok(hardware.len())
        })?;
        info!(software_id = %id, unlinked, "software asset deleted");
        Ok(())
    }
}
