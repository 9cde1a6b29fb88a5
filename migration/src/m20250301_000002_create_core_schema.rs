use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_lookup_tables::{DeviceTypes, Statuses};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customers::CustomerName).string().not_null())
                    .col(ColumnDef::new(Customers::ContactName).string().null())
                    .col(ColumnDef::new(Customers::ContactEmail).string().null())
                    .col(ColumnDef::new(Customers::ContactPhone).string().null())
                    .col(ColumnDef::new(Customers::Address).text().null())
                    .to_owned(),
            )
            .await?;

        // Level 3 users belong to a customer and go away with it
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::AuthLevel).integer().not_null())
                    .col(ColumnDef::new(Users::CustomerId).integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_customer_id")
                            .from(Users::Table, Users::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_username")
                    .table(Users::Table)
                    .col(Users::Username)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Devices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Devices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Devices::Hostname).string().not_null())
                    .col(ColumnDef::new(Devices::CustomerId).integer().not_null())
                    .col(ColumnDef::new(Devices::DeviceTypeId).integer().not_null())
                    .col(ColumnDef::new(Devices::StatusId).integer().not_null())
                    .col(ColumnDef::new(Devices::SerialNumber).string().null())
                    .col(ColumnDef::new(Devices::Description).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_devices_customer_id")
                            .from(Devices::Table, Devices::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_devices_device_type_id")
                            .from(Devices::Table, Devices::DeviceTypeId)
                            .to(DeviceTypes::Table, DeviceTypes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_devices_status_id")
                            .from(Devices::Table, Devices::StatusId)
                            .to(Statuses::Table, Statuses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_devices_customer_id")
                    .table(Devices::Table)
                    .col(Devices::CustomerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Devices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Customers {
    Table,
    Id,
    CustomerName,
    ContactName,
    ContactEmail,
    ContactPhone,
    Address,
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    AuthLevel,
    CustomerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Devices {
    Table,
    Id,
    Hostname,
    CustomerId,
    DeviceTypeId,
    StatusId,
    SerialNumber,
    Description,
}
