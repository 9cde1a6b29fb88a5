use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_lookup_tables::RequestStatuses;
use crate::m20250301_000002_create_core_schema::{Customers, Devices, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserRequests::Title).string().not_null())
                    .col(ColumnDef::new(UserRequests::Description).text().not_null())
                    .col(ColumnDef::new(UserRequests::CustomerId).integer().null())
                    .col(ColumnDef::new(UserRequests::DeviceId).integer().null())
                    .col(ColumnDef::new(UserRequests::CreatedBy).integer().null())
                    .col(ColumnDef::new(UserRequests::AssignedTo).integer().null())
                    .col(
                        ColumnDef::new(UserRequests::StatusId)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(UserRequests::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(UserRequests::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_requests_customer_id")
                            .from(UserRequests::Table, UserRequests::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_requests_device_id")
                            .from(UserRequests::Table, UserRequests::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_requests_created_by")
                            .from(UserRequests::Table, UserRequests::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_requests_assigned_to")
                            .from(UserRequests::Table, UserRequests::AssignedTo)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_requests_status_id")
                            .from(UserRequests::Table, UserRequests::StatusId)
                            .to(RequestStatuses::Table, RequestStatuses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_requests_customer_id")
                    .table(UserRequests::Table)
                    .col(UserRequests::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_requests_status_id")
                    .table(UserRequests::Table)
                    .col(UserRequests::StatusId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notes::TicketId).integer().not_null())
                    .col(ColumnDef::new(Notes::Body).text().not_null())
                    .col(ColumnDef::new(Notes::CreatedBy).integer().null())
                    .col(
                        ColumnDef::new(Notes::IsSystem)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Notes::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notes_ticket_id")
                            .from(Notes::Table, Notes::TicketId)
                            .to(UserRequests::Table, UserRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notes_created_by")
                            .from(Notes::Table, Notes::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notes_ticket_id")
                    .table(Notes::Table)
                    .col(Notes::TicketId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserRequests {
    Table,
    Id,
    Title,
    Description,
    CustomerId,
    DeviceId,
    CreatedBy,
    AssignedTo,
    StatusId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notes {
    Table,
    Id,
    TicketId,
    Body,
    CreatedBy,
    IsSystem,
    CreatedAt,
}
