use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_sellers_table::Migration),
            Box::new(m20240301_000002_create_transactions_table::Migration),
        ]
    }
}

mod m20240301_000001_create_sellers_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000001_create_sellers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sellers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Sellers::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Sellers::Name).string_len(255).not_null())
                        .col(
                            ColumnDef::new(Sellers::ContactInfo)
                                .string_len(255)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Sellers::RegistrationDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sellers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Sellers {
        Table,
        Id,
        Name,
        ContactInfo,
        RegistrationDate,
    }
}

mod m20240301_000002_create_transactions_table {
    use sea_orm_migration::prelude::*;
    use sea_orm_migration::sea_orm::DatabaseBackend;

    /// `NUMERIC(19,2)` where the backend supports it. SQLite caps decimal
    /// precision at 16 digits.
    pub(super) fn amount_column(backend: DatabaseBackend) -> ColumnDef {
        let mut column = ColumnDef::new(Transactions::Amount);
        match backend {
            DatabaseBackend::Sqlite => column.decimal_len(16, 2),
            _ => column.decimal_len(19, 2),
        };
        column.not_null();
        column
    }

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000002_create_transactions_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Transactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Transactions::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Transactions::SellerId).integer().not_null())
                        .col(&mut amount_column(manager.get_database_backend()))
                        .col(
                            ColumnDef::new(Transactions::PaymentType)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Transactions::TransactionDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_transactions_seller_id")
                                .from(Transactions::Table, Transactions::SellerId)
                                .to(Sellers::Table, Sellers::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transactions_seller_id")
                        .table(Transactions::Table)
                        .col(Transactions::SellerId)
                        .to_owned(),
                )
                .await?;

            // range scans for period analytics
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transactions_transaction_date")
                        .table(Transactions::Table)
                        .col(Transactions::TransactionDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Transactions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Transactions {
        Table,
        Id,
        SellerId,
        Amount,
        PaymentType,
        TransactionDate,
    }

    #[derive(DeriveIden)]
    enum Sellers {
        Table,
        Id,
    }
}
