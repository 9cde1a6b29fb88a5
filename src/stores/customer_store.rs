use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::types::db::customer::{self, ActiveModel, Entity as Customer};
use crate::types::dto::customers::{CustomerFilter, CustomerPayload};
use crate::types::internal::{AccessScope, RecordKind};

/// Customers. Staff only.
pub struct CustomerStore;

impl CustomerStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        filter: &CustomerFilter,
    ) -> Result<Vec<customer::Model>, InternalError> {
        scope.require_unrestricted("list customers")?;

        let mut condition = Condition::all();
        if let Some(name) = &filter.customer_name {
            condition = condition.add(customer::Column::CustomerName.contains(name));
        }
        if let Some(contact) = &filter.contact_name {
            condition = condition.add(customer::Column::ContactName.contains(contact));
        }
        if let Some(email) = &filter.contact_email {
            condition = condition.add(customer::Column::ContactEmail.contains(email));
        }

        Customer::find()
            .filter(condition)
            .order_by_asc(customer::Column::CustomerName)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_customers", e))
    }

    pub async fn find(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        customer_id: i32,
    ) -> Result<customer::Model, InternalError> {
        scope.require_unrestricted("view customer")?;

        Customer::find_by_id(customer_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_customer", e))?
            .ok_or(InternalError::not_found(RecordKind::Customer, customer_id))
    }

    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        payload: CustomerPayload,
    ) -> Result<customer::Model, InternalError> {
        scope.require_unrestricted("create customer")?;

        let new_customer = ActiveModel {
            customer_name: Set(payload.customer_name),
            contact_name: Set(payload.contact_name),
            contact_email: Set(payload.contact_email),
            contact_phone: Set(payload.contact_phone),
            address: Set(payload.address),
            ..Default::default()
        };

        let created = new_customer
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("create_customer", e))?;

        tracing::debug!("Created customer {} ({})", created.id, created.customer_name);
        Ok(created)
    }

    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        customer_id: i32,
        payload: CustomerPayload,
    ) -> Result<customer::Model, InternalError> {
        let existing = self.find(conn, scope, customer_id).await?;

        let mut active: ActiveModel = existing.into();
        active.customer_name = Set(payload.customer_name);
        active.contact_name = Set(payload.contact_name);
        active.contact_email = Set(payload.contact_email);
        active.contact_phone = Set(payload.contact_phone);
        active.address = Set(payload.address);

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_customer", e))
    }

    /// Delete a customer together with its devices, users and tickets
    pub async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        customer_id: i32,
    ) -> Result<(), InternalError> {
        scope.require_unrestricted("delete customer")?;

        let result = Customer::delete_by_id(customer_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_customer", e))?;

        if result.rows_affected == 0 {
            return Err(InternalError::not_found(RecordKind::Customer, customer_id));
        }
        tracing::debug!("Deleted customer {}", customer_id);
        Ok(())
    }
}

impl Default for CustomerStore {
    fn default() -> Self {
        Self::new()
    }
}
