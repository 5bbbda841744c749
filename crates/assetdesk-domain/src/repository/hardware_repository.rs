//! Hardware Asset Repository - Abstract persistence for HardwareAssets
//!
//! Writes touch only the hardware row. The employee and software it points
//! at are referenced by id and never rewritten through this trait.

use crate::model::hardware_asset::HardwareAsset;
use crate::model::ids::{EmployeeId, HardwareAssetId, SoftwareAssetId};
use crate::repository::RepositoryError;

pub trait HardwareAssetRepository {
    /// Store a new hardware asset and return it with its assigned id
    fn insert_hardware(
        &mut self,
        hardware: HardwareAsset,
    ) -> Result<HardwareAsset, RepositoryError>;

    /// Overwrite the stored hardware asset with the same id
    fn update_hardware(&mut self, hardware: &HardwareAsset) -> Result<(), RepositoryError>;

    fn delete_hardware(&mut self, id: HardwareAssetId) -> Result<(), RepositoryError>;

    fn find_hardware(&self, id: HardwareAssetId) -> Result<Option<HardwareAsset>, RepositoryError>;

    /// Hardware held by one employee, ordered by id
    fn hardware_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<HardwareAsset>, RepositoryError>;

    /// Hardware linked to one software package, ordered by id
    fn hardware_for_software(
        &self,
        software_id: SoftwareAssetId,
    ) -> Result<Vec<HardwareAsset>, RepositoryError>;
}
