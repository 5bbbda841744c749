//! Hardware Asset Service
//!
//! Hardware is always assigned to an existing employee. Software reported
//! with a hardware asset goes through the [`LinkResolver`], so an already
//! known package is linked instead of stored a second time.

use chrono::Utc;
use tracing::{debug, info};

use assetdesk_domain::error::{EntityKind, RelationshipPreconditionError, Result};
use assetdesk_domain::model::hardware_asset::{HardwareAsset, HardwareAssetInput};
use assetdesk_domain::model::ids::{EmployeeId, HardwareAssetId};
use assetdesk_domain::model::software_asset::SoftwareAsset;
use assetdesk_domain::repository::{EmployeeRepository, RepositoryError, UnitOfWork};
use assetdesk_domain::service::link_resolver::{LinkResolver, SoftwareInstallation};

use super::found;

/// What an update does with the hardware's software link
#[derive(Debug, Clone, Default)]
pub enum SoftwareChange {
    /// Leave the current link as it is
    #[default]
    Keep,
    /// Remove the link
    Unlink,
    /// Link to this package, reusing a stored one with the same name and version
    Install(SoftwareAsset),
}

pub struct HardwareAssetService<S> {
    store: S,
    resolver: LinkResolver,
}

impl<S: UnitOfWork> HardwareAssetService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            resolver: LinkResolver::new(),
        }
    }

    /// Store a hardware asset, optionally with the software it runs
    pub fn add(
        &mut self,
        input: &HardwareAssetInput,
        software: Option<SoftwareAsset>,
    ) -> Result<HardwareAsset> {
        let now = Utc::now();
        let asset = HardwareAsset::from_input(input, now.date_naive())?;
        let employee_id = asset
            .employee_id()
            .ok_or(RelationshipPreconditionError::HardwareWithoutEmployee)?;
        let resolver = self.resolver;

        let stored = self.store.transaction(|tx| -> Result<HardwareAsset> {
            require_employee(tx, employee_id)?;
            let stored = tx.insert_hardware(asset)?;
            let Some(software) = software else {
                return Ok(stored);
            };

            let id = stored.id().ok_or(RepositoryError::MissingIdentity {
                entity: EntityKind::HardwareAsset,
            })?;
            let outcome = resolver.attach(tx, SoftwareInstallation::new(software).on(id), now)?;
            debug!(
                software_id = ?outcome.software.id(),
                created = outcome.created,
                "software resolved for new hardware"
            );
            found(tx.find_hardware(id)?, EntityKind::HardwareAsset, id.get())
        })?;

        info!(
            hardware_id = ?stored.id(),
            employee_id = %employee_id,
            software_id = ?stored.software_id(),
            "hardware asset added"
        );
        Ok(stored)
    }

    pub fn get_by_id(&self, id: HardwareAssetId) -> Result<HardwareAsset> {
        found(self.store.find_hardware(id)?, EntityKind::HardwareAsset, id.get())
    }

    /// Every hardware asset assigned to one employee
    pub fn get_all_for(&self, employee_id: EmployeeId) -> Result<Vec<HardwareAsset>> {
        found(
            self.store.find_employee(employee_id)?,
            EntityKind::Employee,
            employee_id.get(),
        )?;
        Ok(self.store.hardware_for_employee(employee_id)?)
    }

    /// Replace every editable field and apply a software change
    pub fn update(
        &mut self,
        id: HardwareAssetId,
        input: &HardwareAssetInput,
        change: SoftwareChange,
    ) -> Result<HardwareAsset> {
        let now = Utc::now();
        let today = now.date_naive();
        HardwareAsset::from_input(input, today)?;
        let employee_id = input
            .employee_id
            .ok_or(RelationshipPreconditionError::HardwareWithoutEmployee)?;
        let resolver = self.resolver;

        self.store.transaction(|tx| -> Result<HardwareAsset> {
            let mut asset = found(tx.find_hardware(id)?, EntityKind::HardwareAsset, id.get())?;
            require_employee(tx, employee_id)?;

            asset.apply_input(input, today)?;
            if let SoftwareChange::Unlink = change {
                asset.unlink_software();
            }
            tx.update_hardware(&asset)?;

            if let SoftwareChange::Install(software) = change {
                resolver.attach(tx, SoftwareInstallation::new(software).on(id), now)?;
                asset = found(tx.find_hardware(id)?, EntityKind::HardwareAsset, id.get())?;
            }
            info!(hardware_id = %id, software_id = ?asset.software_id(), "hardware asset updated");
            Ok(asset)
        })
    }

    pub fn delete(&mut self, id: HardwareAssetId) -> Result<()> {
        self.store.transaction(|tx| -> Result<()> {
            found(tx.find_hardware(id)?, EntityKind::HardwareAsset, id.get())?;
            tx.delete_hardware(id)?;
            Ok(())
        })?;
        info!(hardware_id = %id, "hardware asset deleted");
        Ok(())
    }
}

fn require_employee<S: EmployeeRepository + ?Sized>(store: &S, id: EmployeeId) -> Result<()> {
    match store.find_employee(id)? {
        Some(_) => Ok(()),
        None => Err(RelationshipPreconditionError::MissingEmployee(id).into()),
    }
}
