use sea_orm::entity::prelude::*;

/// A support request raised by a user
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,

    /// None only for staff-raised requests that concern no customer
    pub customer_id: Option<i32>,
    pub device_id: Option<i32>,

    /// Requesting user
    pub created_by: Option<i32>,

    /// Staff member working the request
    pub assigned_to: Option<i32>,

    /// See `TicketStatus`
    pub status_id: i32,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
