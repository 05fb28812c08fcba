use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Orders::CartId).uuid().not_null())
                    .col(ColumnDef::new(Orders::UserId).uuid())
                    .col(ColumnDef::new(Orders::CustomerName).text())
                    .col(ColumnDef::new(Orders::CustomerEmail).text())
                    .col(ColumnDef::new(Orders::CustomerPhone).text())
                    .col(ColumnDef::new(Orders::CustomerAddress).text())
                    .col(ColumnDef::new(Orders::CustomerCity).text())
                    .col(ColumnDef::new(Orders::CustomerPostalCode).text())
                    .col(ColumnDef::new(Orders::PaymentMethod).text().not_null())
                    .col(ColumnDef::new(Orders::Total).double().not_null())
                    .col(
                        ColumnDef::new(Orders::Status)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Customer order listing filters by user_id; statistics scan created_at.
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_user_id")
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_created_at")
                    .table(Orders::Table)
                    .col(Orders::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    CartId,
    UserId,
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    CustomerAddress,
    CustomerCity,
    CustomerPostalCode,
    PaymentMethod,
    Total,
    Status,
    CreatedAt,
}
