//! HardwareAsset - A physical device held by an employee
//!
//! A hardware asset may run one software package. The link is stored as the
//! software id plus the moment it was attached.

use std::net::IpAddr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EmployeeId, HardwareAssetId, SoftwareAssetId};
use crate::error::FieldValidationError;
use crate::validation::{self, TextRule};

/// Raw hardware fields as entered by a user
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareAssetInput {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub kind: String,
    pub ip_address: String,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
}

/// Association of a hardware asset with its software package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareLink {
    pub software_id: SoftwareAssetId,
    pub linked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareAsset {
    id: Option<HardwareAssetId>,
    name: String,
    model: String,
    manufacturer: String,
    kind: String,
    ip_address: IpAddr,
    purchase_date: Option<NaiveDate>,
    notes: Option<String>,
    employee_id: Option<EmployeeId>,
    software: Option<SoftwareLink>,
}

impl HardwareAsset {
    /// Create a new, not yet persisted HardwareAsset with its required fields
    pub fn new(
        name: &str,
        model: &str,
        manufacturer: &str,
        kind: &str,
        ip_address: &str,
    ) -> Result<Self, FieldValidationError> {
        Ok(Self {
            id: None,
            name: TextRule::AssetText.apply("hardware name", name)?,
            model: TextRule::AssetText.apply("model", model)?,
            manufacturer: TextRule::Manufacturer.apply("manufacturer", manufacturer)?,
            kind: TextRule::AssetText.apply("hardware type", kind)?,
            ip_address: validation::ip_address(ip_address)?,
            purchase_date: None,
            notes: None,
            employee_id: None,
            software: None,
        })
    }

    /// Build from raw input, validating every field
    ///
    /// `today` bounds the purchase date from above.
    pub fn from_input(
        input: &HardwareAssetInput,
        today: NaiveDate,
    ) -> Result<Self, FieldValidationError> {
        let mut asset = Self::new(
            &input.name,
            &input.model,
            &input.manufacturer,
            &input.kind,
            &input.ip_address,
        )?;
        asset.purchase_date = validation::purchase_date(input.purchase_date, today)?;
        asset.notes = validation::notes(input.notes.as_deref())?;
        asset.employee_id = input.employee_id;
        Ok(asset)
    }

    /// Builder: attach the identity assigned by storage
    pub fn with_id(mut self, id: HardwareAssetId) -> Self {
        self.id = Some(id);
        self
    }

    /// Builder: assign to an employee
    pub fn with_employee(mut self, employee_id: EmployeeId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    // ========== Getters ==========

    pub fn id(&self) -> Option<HardwareAssetId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn ip_address(&self) -> IpAddr {
        self.ip_address
    }

    pub fn purchase_date(&self) -> Option<NaiveDate> {
        self.purchase_date
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }

    pub fn software(&self) -> Option<&SoftwareLink> {
        self.software.as_ref()
    }

    pub fn software_id(&self) -> Option<SoftwareAssetId> {
        self.software.map(|link| link.software_id)
    }

    // ========== Mutations ==========

    pub fn set_name(&mut self, raw: &str) -> Result<(), FieldValidationError> {
        self.name = TextRule::AssetText.apply("hardware name", raw)?;
        Ok(())
    }

    pub fn set_model(&mut self, raw: &str) -> Result<(), FieldValidationError> {
        self.model = TextRule::AssetText.apply("model", raw)?;
        Ok(())
    }

    pub fn set_manufacturer(&mut self, raw: &str) -> Result<(), FieldValidationError> {
        self.manufacturer = TextRule::Manufacturer.apply("manufacturer", raw)?;
        Ok(())
    }

    pub fn set_kind(&mut self, raw: &str) -> Result<(), FieldValidationError> {
        self.kind = TextRule::AssetText.apply("hardware type", raw)?;
        Ok(())
    }

    pub fn set_ip_address(&mut self, raw: &str) -> Result<(), FieldValidationError> {
        self.ip_address = validation::ip_address(raw)?;
        Ok(())
    }

    pub fn set_purchase_date(
        &mut self,
        date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<(), FieldValidationError> {
        self.purchase_date = validation::purchase_date(date, today)?;
        Ok(())
    }

    pub fn set_notes(&mut self, raw: Option<&str>) -> Result<(), FieldValidationError> {
        self.notes = validation::notes(raw)?;
        Ok(())
    }

    pub fn assign_to(&mut self, employee_id: EmployeeId) {
        self.employee_id = Some(employee_id);
    }

    /// Point this asset at a software package, stamping the link time
    pub fn link_software(&mut self, software_id: SoftwareAssetId, at: DateTime<Utc>) {
        self.software = Some(SoftwareLink {
            software_id,
            linked_at: at,
        });
    }

    pub fn unlink_software(&mut self) {
        self.software = None;
    }

    /// Replace every editable field at once
    ///
    /// Identity and the software link are kept. All fields are validated
    /// before any is assigned.
    pub fn apply_input(
        &mut self,
        input: &HardwareAssetInput,
        today: NaiveDate,
    ) -> Result<(), FieldValidationError> {
        let candidate = Self::from_input(input, today)?;
        *self = Self {
            id: self.id,
            software: self.software,
            ..candidate
        };
        Ok(())
    }
}
