use serde::Deserialize;

use crate::errors::internal::ValidationError;

use super::fields::{optional_text, required_text};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CustomerForm {
    pub customer_name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerPayload {
    pub customer_name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
}

impl CustomerForm {
    pub fn validate(&self) -> Result<CustomerPayload, ValidationError> {
        Ok(CustomerPayload {
            customer_name: required_text("customer_name", &self.customer_name)?,
            contact_name: optional_text(&self.contact_name),
            contact_email: optional_text(&self.contact_email),
            contact_phone: optional_text(&self.contact_phone),
            address: optional_text(&self.address),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CustomerSearchForm {
    pub customer_name: String,
    pub contact_name: String,
    pub contact_email: String,
}

/// Substring filters over customers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub customer_name: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
}

impl CustomerSearchForm {
    pub fn into_filter(self) -> CustomerFilter {
        CustomerFilter {
            customer_name: optional_text(&self.customer_name),
            contact_name: optional_text(&self.contact_name),
            contact_email: optional_text(&self.contact_email),
        }
    }
}
