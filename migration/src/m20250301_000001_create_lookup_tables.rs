use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Device types offered on the asset forms
const DEVICE_TYPES: [(i32, &str); 6] = [
    (1, "Laptop"),
    (2, "Desktop"),
    (3, "Server"),
    (4, "Printer"),
    (5, "Network"),
    (6, "Mobile"),
];

/// Asset lifecycle statuses
const ASSET_STATUSES: [(i32, &str); 3] = [(1, "Active"), (2, "In Repair"), (3, "Retired")];

/// Ticket states. The ids are part of the ticket state machine and must not change.
const REQUEST_STATUSES: [(i32, &str); 3] = [(1, "New"), (2, "In Progress"), (3, "Closed")];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DeviceTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeviceTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DeviceTypes::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Statuses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Statuses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Statuses::Value).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RequestStatuses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RequestStatuses::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RequestStatuses::Value).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        for (id, name) in DEVICE_TYPES {
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(DeviceTypes::Table)
                        .columns([DeviceTypes::Id, DeviceTypes::Name])
                        .values_panic([id.into(), name.into()])
                        .to_owned(),
                )
                .await?;
        }

        for (id, value) in ASSET_STATUSES {
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(Statuses::Table)
                        .columns([Statuses::Id, Statuses::Value])
                        .values_panic([id.into(), value.into()])
                        .to_owned(),
                )
                .await?;
        }

        for (id, value) in REQUEST_STATUSES {
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(RequestStatuses::Table)
                        .columns([RequestStatuses::Id, RequestStatuses::Value])
                        .values_panic([id.into(), value.into()])
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RequestStatuses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Statuses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DeviceTypes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum DeviceTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub(crate) enum Statuses {
    Table,
    Id,
    Value,
}

#[derive(DeriveIden)]
pub(crate) enum RequestStatuses {
    Table,
    Id,
    Value,
}
