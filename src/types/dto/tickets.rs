use serde::Deserialize;

use crate::errors::internal::ValidationError;

use super::fields::{optional_id, optional_text, required_id, required_text};

/// Request form on `/contact`.
///
/// `customer_id` is only honoured for staff; customer users always raise
/// tickets against their own customer.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TicketForm {
    pub title: String,
    pub description: String,
    pub device_id: String,
    pub customer_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPayload {
    pub title: String,
    pub description: String,
    pub device_id: Option<i32>,
    pub customer_id: Option<i32>,
}

impl TicketForm {
    pub fn validate(&self) -> Result<TicketPayload, ValidationError> {
        Ok(TicketPayload {
            title: required_text("title", &self.title)?,
            description: self.description.trim().to_owned(),
            device_id: optional_id("device_id", &self.device_id)?,
            customer_id: optional_id("customer_id", &self.customer_id)?,
        })
    }
}

/// Filter form posted to `/user-requests`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TicketSearchForm {
    pub title: String,
    pub status_id: String,
    pub customer_id: String,
    pub device_id: String,
    pub assigned_to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    /// Substring match
    pub title: Option<String>,
    pub status_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub device_id: Option<i32>,
    pub assigned_to: Option<i32>,
    /// Only tickets nobody has picked up
    pub unassigned: bool,
}

impl TicketFilter {
    /// New tickets nobody is working on, shown on `/home`
    pub fn awaiting_pickup() -> Self {
        Self {
            status_id: Some(crate::types::internal::TicketStatus::New.id()),
            unassigned: true,
            ..Self::default()
        }
    }
}

impl TicketSearchForm {
    pub fn validate(&self) -> Result<TicketFilter, ValidationError> {
        Ok(TicketFilter {
            title: optional_text(&self.title),
            status_id: optional_id("status_id", &self.status_id)?,
            customer_id: optional_id("customer_id", &self.customer_id)?,
            device_id: optional_id("device_id", &self.device_id)?,
            assigned_to: optional_id("assigned_to", &self.assigned_to)?,
            unassigned: false,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NoteForm {
    pub body: String,
}

impl NoteForm {
    pub fn validate(&self) -> Result<String, ValidationError> {
        required_text("body", &self.body)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChangeDeviceForm {
    pub device_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChangeCustomerForm {
    pub customer_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChangeUserForm {
    pub user_id: String,
}

/// A single ticket edit from the ticket page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketChange {
    Device(i32),
    Customer(i32),
    User(i32),
}

impl ChangeDeviceForm {
    pub fn validate(&self) -> Result<TicketChange, ValidationError> {
        required_id("device_id", &self.device_id).map(TicketChange::Device)
    }
}

impl ChangeCustomerForm {
    pub fn validate(&self) -> Result<TicketChange, ValidationError> {
        required_id("customer_id", &self.customer_id).map(TicketChange::Customer)
    }
}

impl ChangeUserForm {
    pub fn validate(&self) -> Result<TicketChange, ValidationError> {
        required_id("user_id", &self.user_id).map(TicketChange::User)
    }
}
