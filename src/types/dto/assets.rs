use serde::Deserialize;

use crate::errors::internal::ValidationError;

use super::fields::{optional_id, optional_text, required_id, required_text};

/// Create and update form for a device
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssetForm {
    pub hostname: String,
    pub customer_id: String,
    pub device_type_id: String,
    pub status_id: String,
    pub serial_number: String,
    pub description: String,
}

/// Validated device fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPayload {
    pub hostname: String,
    pub customer_id: i32,
    pub device_type_id: i32,
    pub status_id: i32,
    pub serial_number: Option<String>,
    pub description: Option<String>,
}

impl AssetForm {
    pub fn validate(&self) -> Result<AssetPayload, ValidationError> {
        Ok(AssetPayload {
            hostname: required_text("hostname", &self.hostname)?,
            customer_id: required_id("customer_id", &self.customer_id)?,
            device_type_id: required_id("device_type_id", &self.device_type_id)?,
            status_id: required_id("status_id", &self.status_id)?,
            serial_number: optional_text(&self.serial_number),
            description: optional_text(&self.description),
        })
    }
}

/// Filter form on `/assets`. Blank fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssetSearchForm {
    pub hostname: String,
    pub customer_id: String,
    pub device_type_id: String,
    pub status_id: String,
    pub serial_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetFilter {
    /// Substring match
    pub hostname: Option<String>,
    pub customer_id: Option<i32>,
    pub device_type_id: Option<i32>,
    pub status_id: Option<i32>,
    /// Substring match
    pub serial_number: Option<String>,
}

impl AssetSearchForm {
    pub fn validate(&self) -> Result<AssetFilter, ValidationError> {
        Ok(AssetFilter {
            hostname: optional_text(&self.hostname),
            customer_id: optional_id("customer_id", &self.customer_id)?,
            device_type_id: optional_id("device_type_id", &self.device_type_id)?,
            status_id: optional_id("status_id", &self.status_id)?,
            serial_number: optional_text(&self.serial_number),
        })
    }
}
