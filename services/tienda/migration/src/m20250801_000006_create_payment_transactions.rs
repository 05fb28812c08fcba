use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentTransactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentTransactions::SessionId)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PaymentTransactions::UserId).uuid())
                    .col(ColumnDef::new(PaymentTransactions::CartId).uuid().not_null())
                    .col(
                        ColumnDef::new(PaymentTransactions::Amount)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentTransactions::Currency)
                            .text()
                            .not_null()
                            .default("eur"),
                    )
                    .col(
                        ColumnDef::new(PaymentTransactions::PaymentStatus)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(PaymentTransactions::Metadata)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentTransactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentTransactions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PaymentTransactions {
    Table,
    Id,
    SessionId,
    UserId,
    CartId,
    Amount,
    Currency,
    PaymentStatus,
    Metadata,
    CreatedAt,
}
