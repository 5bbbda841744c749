//! Software Asset Repository - Abstract persistence for SoftwareAssets

use crate::model::ids::SoftwareAssetId;
use crate::model::software_asset::{SoftwareAsset, SoftwareKey};
use crate::repository::RepositoryError;

pub trait SoftwareAssetRepository {
    /// Store a new software asset and return it with its assigned id
    ///
    /// Implementations reject a second record for an existing
    /// [`SoftwareKey`] with [`RepositoryError::UniqueViolation`].
    fn insert_software(
        &mut self,
        software: SoftwareAsset,
    ) -> Result<SoftwareAsset, RepositoryError>;

    /// Overwrite the stored software asset with the same id
    fn update_software(&mut self, software: &SoftwareAsset) -> Result<(), RepositoryError>;

    fn delete_software(&mut self, id: SoftwareAssetId) -> Result<(), RepositoryError>;

    fn find_software(&self, id: SoftwareAssetId) -> Result<Option<SoftwareAsset>, RepositoryError>;

    /// Exact (name, version) lookup
    fn find_software_by_key(
        &self,
        key: &SoftwareKey,
    ) -> Result<Option<SoftwareAsset>, RepositoryError>;

    /// All software assets, ordered by id
    fn list_software(&self) -> Result<Vec<SoftwareAsset>, RepositoryError>;
}
