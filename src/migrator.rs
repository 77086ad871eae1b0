use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240501_000001_create_users_tables::Migration),
            Box::new(m20240501_000002_create_catalog_tables::Migration),
            Box::new(m20240501_000003_create_ledger_tables::Migration),
            Box::new(m20240501_000004_create_debt_tables::Migration),
            Box::new(m20240501_000005_create_budget_tables::Migration),
            Box::new(m20240501_000006_create_inventory_tables::Migration),
            Box::new(m20240501_000007_create_audit_tables::Migration),
            Box::new(m20240501_000008_create_order_tables::Migration),
            Box::new(m20240501_000009_create_payments_table::Migration),
            Box::new(m20240501_000010_create_tracking_tables::Migration),
            Box::new(m20240501_000011_create_reporting_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20240501_000001_create_users_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000001_create_users_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Users::Username)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::Email).string().null())
                        .col(ColumnDef::new(Users::Role).string().not_null())
                        .col(ColumnDef::new(Users::TelegramId).string().null())
                        .col(ColumnDef::new(Users::PhoneNumber).string().null())
                        .col(
                            ColumnDef::new(Users::IsVerified)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Users::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Users::DateJoined).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(UserActivity::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UserActivity::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UserActivity::UserId).uuid().not_null())
                        .col(ColumnDef::new(UserActivity::Action).string().not_null())
                        .col(ColumnDef::new(UserActivity::IpAddress).string().null())
                        .col(
                            ColumnDef::new(UserActivity::Timestamp)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_user_activity_user_id")
                        .table(UserActivity::Table)
                        .col(UserActivity::UserId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UserActivity::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Users {
        Table,
        Id,
        Username,
        Email,
        Role,
        TelegramId,
        PhoneNumber,
        IsVerified,
        IsActive,
        DateJoined,
    }

    #[derive(DeriveIden)]
    pub(super) enum UserActivity {
        Table,
        Id,
        UserId,
        Action,
        IpAddress,
        Timestamp,
    }
}

mod m20240501_000002_create_catalog_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000002_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Suppliers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Suppliers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Suppliers::Name).string().not_null())
                        .col(ColumnDef::new(Suppliers::ContactPerson).string().null())
                        .col(ColumnDef::new(Suppliers::Email).string().null())
                        .col(ColumnDef::new(Suppliers::Phone).string().null())
                        .col(ColumnDef::new(Suppliers::Address).string().null())
                        .col(ColumnDef::new(Suppliers::Website).string().null())
                        .col(ColumnDef::new(Suppliers::Description).string().null())
                        .col(
                            ColumnDef::new(Suppliers::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Suppliers::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Suppliers::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Products::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(ColumnDef::new(Products::Sku).string().null().unique_key())
                        .col(ColumnDef::new(Products::Description).string().null())
                        .col(ColumnDef::new(Products::PurchasePrice).decimal().null())
                        .col(ColumnDef::new(Products::SellingPrice).decimal().null())
                        .col(ColumnDef::new(Products::SupplierId).uuid().null())
                        .col(
                            ColumnDef::new(Products::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Products::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Products::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_supplier_id")
                        .table(Products::Table)
                        .col(Products::SupplierId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Suppliers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Suppliers {
        Table,
        Id,
        Name,
        ContactPerson,
        Email,
        Phone,
        Address,
        Website,
        Description,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Products {
        Table,
        Id,
        Name,
        Sku,
        Description,
        PurchasePrice,
        SellingPrice,
        SupplierId,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240501_000003_create_ledger_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000003_create_ledger_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Accounts::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Accounts::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Accounts::Name).string().not_null())
                        .col(ColumnDef::new(Accounts::AccountType).string().not_null())
                        .col(ColumnDef::new(Accounts::Currency).string().not_null())
                        .col(
                            ColumnDef::new(Accounts::Balance)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Accounts::Description).string().null())
                        .col(ColumnDef::new(Accounts::AccountNumber).string().null())
                        .col(
                            ColumnDef::new(Accounts::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Accounts::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Accounts::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Categories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Categories::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Categories::Name).string().not_null())
                        .col(ColumnDef::new(Categories::CategoryType).string().not_null())
                        .col(ColumnDef::new(Categories::Description).string().null())
                        .col(ColumnDef::new(Categories::ParentId).uuid().null())
                        .col(
                            ColumnDef::new(Categories::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Categories::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Transactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Transactions::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Transactions::TransactionType)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Transactions::Amount).decimal().not_null())
                        .col(ColumnDef::new(Transactions::Date).timestamp().not_null())
                        .col(
                            ColumnDef::new(Transactions::SourceAccountId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Transactions::DestinationAccountId)
                                .uuid()
                                .null(),
                        )
                        .col(ColumnDef::new(Transactions::CategoryId).uuid().null())
                        .col(ColumnDef::new(Transactions::Description).string().null())
                        .col(ColumnDef::new(Transactions::OrderId).uuid().null())
                        .col(ColumnDef::new(Transactions::SupplierId).uuid().null())
                        .col(ColumnDef::new(Transactions::CreatedBy).uuid().null())
                        .col(
                            ColumnDef::new(Transactions::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transactions_source_account_id")
                        .table(Transactions::Table)
                        .col(Transactions::SourceAccountId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transactions_destination_account_id")
                        .table(Transactions::Table)
                        .col(Transactions::DestinationAccountId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transactions_date")
                        .table(Transactions::Table)
                        .col(Transactions::Date)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transactions_category_id")
                        .table(Transactions::Table)
                        .col(Transactions::CategoryId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Transactions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Categories::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Accounts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Accounts {
        Table,
        Id,
        Name,
        AccountType,
        Currency,
        Balance,
        Description,
        AccountNumber,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Categories {
        Table,
        Id,
        Name,
        CategoryType,
        Description,
        ParentId,
        IsActive,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Transactions {
        Table,
        Id,
        TransactionType,
        Amount,
        Date,
        SourceAccountId,
        DestinationAccountId,
        CategoryId,
        Description,
        OrderId,
        SupplierId,
        CreatedBy,
        CreatedAt,
    }
}

mod m20240501_000004_create_debt_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000004_create_debt_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Debts::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Debts::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Debts::DebtType).string().not_null())
                        .col(ColumnDef::new(Debts::Amount).decimal().not_null())
                        .col(
                            ColumnDef::new(Debts::PaidAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Debts::Currency).string().not_null())
                        .col(ColumnDef::new(Debts::DateCreated).date().not_null())
                        .col(ColumnDef::new(Debts::DueDate).date().null())
                        .col(ColumnDef::new(Debts::Status).string().not_null())
                        .col(ColumnDef::new(Debts::UserId).uuid().null())
                        .col(ColumnDef::new(Debts::SupplierId).uuid().null())
                        .col(ColumnDef::new(Debts::OrderId).uuid().null())
                        .col(ColumnDef::new(Debts::Description).string().null())
                        .col(ColumnDef::new(Debts::Notes).string().null())
                        .col(ColumnDef::new(Debts::CreatedBy).uuid().null())
                        .col(ColumnDef::new(Debts::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Debts::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_debts_status")
                        .table(Debts::Table)
                        .col(Debts::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DebtPayments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DebtPayments::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(DebtPayments::DebtId).uuid().not_null())
                        .col(ColumnDef::new(DebtPayments::Amount).decimal().not_null())
                        .col(ColumnDef::new(DebtPayments::Date).date().not_null())
                        .col(ColumnDef::new(DebtPayments::TransactionId).uuid().null())
                        .col(ColumnDef::new(DebtPayments::Notes).string().null())
                        .col(ColumnDef::new(DebtPayments::CreatedBy).uuid().null())
                        .col(
                            ColumnDef::new(DebtPayments::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_debt_payments_debt_id")
                        .table(DebtPayments::Table)
                        .col(DebtPayments::DebtId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DebtPayments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Debts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Debts {
        Table,
        Id,
        DebtType,
        Amount,
        PaidAmount,
        Currency,
        DateCreated,
        DueDate,
        Status,
        UserId,
        SupplierId,
        OrderId,
        Description,
        Notes,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum DebtPayments {
        Table,
        Id,
        DebtId,
        Amount,
        Date,
        TransactionId,
        Notes,
        CreatedBy,
        CreatedAt,
    }
}

mod m20240501_000005_create_budget_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000005_create_budget_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Budgets::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Budgets::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Budgets::Name).string().not_null())
                        .col(ColumnDef::new(Budgets::Period).string().not_null())
                        .col(ColumnDef::new(Budgets::StartDate).date().not_null())
                        .col(ColumnDef::new(Budgets::EndDate).date().not_null())
                        .col(
                            ColumnDef::new(Budgets::IncomeBudget)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Budgets::ExpenseBudget)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Budgets::Description).string().null())
                        .col(
                            ColumnDef::new(Budgets::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Budgets::CreatedBy).uuid().null())
                        .col(ColumnDef::new(Budgets::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Budgets::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(BudgetCategories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BudgetCategories::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BudgetCategories::BudgetId).uuid().not_null())
                        .col(
                            ColumnDef::new(BudgetCategories::CategoryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BudgetCategories::Amount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .to_owned(),
                )
                .await?;

            // One line per category within a budget
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_budget_categories_budget_category")
                        .table(BudgetCategories::Table)
                        .col(BudgetCategories::BudgetId)
                        .col(BudgetCategories::CategoryId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BudgetCategories::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Budgets::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Budgets {
        Table,
        Id,
        Name,
        Period,
        StartDate,
        EndDate,
        IncomeBudget,
        ExpenseBudget,
        Description,
        IsActive,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum BudgetCategories {
        Table,
        Id,
        BudgetId,
        CategoryId,
        Amount,
    }
}

mod m20240501_000006_create_inventory_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000006_create_inventory_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Warehouses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Warehouses::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Warehouses::Name).string().not_null())
                        .col(ColumnDef::new(Warehouses::Address).string().null())
                        .col(ColumnDef::new(Warehouses::Description).string().null())
                        .col(ColumnDef::new(Warehouses::ContactPerson).string().null())
                        .col(ColumnDef::new(Warehouses::Phone).string().null())
                        .col(ColumnDef::new(Warehouses::Email).string().null())
                        .col(
                            ColumnDef::new(Warehouses::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Warehouses::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Warehouses::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InventoryItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryItems::ProductId).uuid().not_null())
                        .col(
                            ColumnDef::new(InventoryItems::WarehouseId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::ReservedQuantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::UnitCost)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(InventoryItems::Location).string().null())
                        .col(
                            ColumnDef::new(InventoryItems::LastUpdated)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // One stock record per product and warehouse
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_items_product_warehouse")
                        .table(InventoryItems::Table)
                        .col(InventoryItems::ProductId)
                        .col(InventoryItems::WarehouseId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_items_warehouse_id")
                        .table(InventoryItems::Table)
                        .col(InventoryItems::WarehouseId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InventoryMovements::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryMovements::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryMovements::MovementType)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryMovements::ProductId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryMovements::SourceWarehouseId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryMovements::DestinationWarehouseId)
                                .uuid()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InventoryMovements::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryMovements::UnitCost)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(InventoryMovements::OrderId).uuid().null())
                        .col(ColumnDef::new(InventoryMovements::Notes).string().null())
                        .col(ColumnDef::new(InventoryMovements::CreatedBy).uuid().null())
                        .col(
                            ColumnDef::new(InventoryMovements::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_movements_product_id")
                        .table(InventoryMovements::Table)
                        .col(InventoryMovements::ProductId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_movements_created_at")
                        .table(InventoryMovements::Table)
                        .col(InventoryMovements::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryMovements::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Warehouses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Warehouses {
        Table,
        Id,
        Name,
        Address,
        Description,
        ContactPerson,
        Phone,
        Email,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum InventoryItems {
        Table,
        Id,
        ProductId,
        WarehouseId,
        Quantity,
        ReservedQuantity,
        UnitCost,
        Location,
        LastUpdated,
    }

    #[derive(DeriveIden)]
    pub(super) enum InventoryMovements {
        Table,
        Id,
        MovementType,
        ProductId,
        SourceWarehouseId,
        DestinationWarehouseId,
        Quantity,
        UnitCost,
        OrderId,
        Notes,
        CreatedBy,
        CreatedAt,
    }
}

mod m20240501_000007_create_audit_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000007_create_audit_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StockAudits::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockAudits::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockAudits::WarehouseId).uuid().not_null())
                        .col(
                            ColumnDef::new(StockAudits::AuditNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(StockAudits::Status).string().not_null())
                        .col(ColumnDef::new(StockAudits::StartedAt).timestamp().null())
                        .col(ColumnDef::new(StockAudits::FinishedAt).timestamp().null())
                        .col(ColumnDef::new(StockAudits::Notes).string().null())
                        .col(ColumnDef::new(StockAudits::CreatedBy).uuid().null())
                        .col(
                            ColumnDef::new(StockAudits::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockAudits::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_audits_warehouse_id")
                        .table(StockAudits::Table)
                        .col(StockAudits::WarehouseId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StockCounts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockCounts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockCounts::AuditId).uuid().not_null())
                        .col(ColumnDef::new(StockCounts::ProductId).uuid().not_null())
                        .col(
                            ColumnDef::new(StockCounts::ExpectedQuantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(StockCounts::ActualQuantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(StockCounts::CountedBy).uuid().null())
                        .col(
                            ColumnDef::new(StockCounts::CountedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockCounts::Notes).string().null())
                        .to_owned(),
                )
                .await?;

            // One count line per product within an audit
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_counts_audit_product")
                        .table(StockCounts::Table)
                        .col(StockCounts::AuditId)
                        .col(StockCounts::ProductId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockCounts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(StockAudits::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum StockAudits {
        Table,
        Id,
        WarehouseId,
        AuditNumber,
        Status,
        StartedAt,
        FinishedAt,
        Notes,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum StockCounts {
        Table,
        Id,
        AuditId,
        ProductId,
        ExpectedQuantity,
        ActualQuantity,
        CountedBy,
        CountedAt,
        Notes,
    }
}

mod m20240501_000008_create_order_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000008_create_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Orders::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Orders::OrderNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Orders::Status).string().not_null())
                        .col(ColumnDef::new(Orders::CustomerName).string().not_null())
                        .col(ColumnDef::new(Orders::CustomerPhone).string().null())
                        .col(ColumnDef::new(Orders::CustomerEmail).string().null())
                        .col(ColumnDef::new(Orders::ShippingAddress).string().null())
                        .col(
                            ColumnDef::new(Orders::ShippingCost)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::TotalAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Orders::Currency).string().not_null())
                        .col(ColumnDef::new(Orders::Notes).string().null())
                        .col(ColumnDef::new(Orders::PaidAt).timestamp().null())
                        .col(ColumnDef::new(Orders::ShippedAt).timestamp().null())
                        .col(ColumnDef::new(Orders::DeliveredAt).timestamp().null())
                        .col(ColumnDef::new(Orders::CreatedBy).uuid().null())
                        .col(ColumnDef::new(Orders::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Orders::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_status")
                        .table(Orders::Table)
                        .col(Orders::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_created_at")
                        .table(Orders::Table)
                        .col(Orders::CreatedAt)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrderItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrderItems::OrderId).uuid().not_null())
                        .col(ColumnDef::new(OrderItems::ProductId).uuid().not_null())
                        .col(ColumnDef::new(OrderItems::Quantity).integer().not_null())
                        .col(ColumnDef::new(OrderItems::UnitPrice).decimal().not_null())
                        .col(
                            ColumnDef::new(OrderItems::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_order_items_order_id")
                        .table(OrderItems::Table)
                        .col(OrderItems::OrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrderHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrderHistory::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrderHistory::OrderId).uuid().not_null())
                        .col(ColumnDef::new(OrderHistory::OldStatus).string().null())
                        .col(ColumnDef::new(OrderHistory::NewStatus).string().not_null())
                        .col(ColumnDef::new(OrderHistory::Comment).string().null())
                        .col(ColumnDef::new(OrderHistory::ChangedBy).uuid().null())
                        .col(
                            ColumnDef::new(OrderHistory::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_order_history_order_id")
                        .table(OrderHistory::Table)
                        .col(OrderHistory::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderHistory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(OrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Orders {
        Table,
        Id,
        OrderNumber,
        Status,
        CustomerName,
        CustomerPhone,
        CustomerEmail,
        ShippingAddress,
        ShippingCost,
        TotalAmount,
        Currency,
        Notes,
        PaidAt,
        ShippedAt,
        DeliveredAt,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum OrderItems {
        Table,
        Id,
        OrderId,
        ProductId,
        Quantity,
        UnitPrice,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum OrderHistory {
        Table,
        Id,
        OrderId,
        OldStatus,
        NewStatus,
        Comment,
        ChangedBy,
        CreatedAt,
    }
}

mod m20240501_000009_create_payments_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000009_create_payments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Payments::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Payments::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Payments::OrderId).uuid().not_null())
                        .col(ColumnDef::new(Payments::Amount).decimal().not_null())
                        .col(ColumnDef::new(Payments::Method).string().not_null())
                        .col(ColumnDef::new(Payments::Status).string().not_null())
                        .col(ColumnDef::new(Payments::TransactionId).uuid().null())
                        .col(ColumnDef::new(Payments::Reference).string().null())
                        .col(ColumnDef::new(Payments::Notes).string().null())
                        .col(ColumnDef::new(Payments::CompletedAt).timestamp().null())
                        .col(ColumnDef::new(Payments::CreatedBy).uuid().null())
                        .col(ColumnDef::new(Payments::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Payments::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_payments_order_id")
                        .table(Payments::Table)
                        .col(Payments::OrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_payments_status")
                        .table(Payments::Table)
                        .col(Payments::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Payments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Payments {
        Table,
        Id,
        OrderId,
        Amount,
        Method,
        Status,
        TransactionId,
        Reference,
        Notes,
        CompletedAt,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240501_000010_create_tracking_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000010_create_tracking_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(TrackingCompanies::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TrackingCompanies::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(TrackingCompanies::Name).string().not_null())
                        .col(ColumnDef::new(TrackingCompanies::Code).string().null())
                        .col(ColumnDef::new(TrackingCompanies::Website).string().null())
                        .col(
                            ColumnDef::new(TrackingCompanies::TrackingUrlTemplate)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(TrackingCompanies::Phone).string().null())
                        .col(
                            ColumnDef::new(TrackingCompanies::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(TrackingCompanies::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TrackingCompanies::UpdatedAt)
                                .timestamp()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TrackingNumbers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TrackingNumbers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TrackingNumbers::TrackingNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(TrackingNumbers::CompanyId).uuid().null())
                        .col(ColumnDef::new(TrackingNumbers::OrderId).uuid().null())
                        .col(ColumnDef::new(TrackingNumbers::Status).string().not_null())
                        .col(
                            ColumnDef::new(TrackingNumbers::Description)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(TrackingNumbers::ShippedDate)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(TrackingNumbers::DeliveredDate)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(TrackingNumbers::IsArchived)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(TrackingNumbers::IsProblematic)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(TrackingNumbers::CreatedBy).uuid().null())
                        .col(
                            ColumnDef::new(TrackingNumbers::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TrackingNumbers::UpdatedAt)
                                .timestamp()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_tracking_numbers_status")
                        .table(TrackingNumbers::Table)
                        .col(TrackingNumbers::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_tracking_numbers_order_id")
                        .table(TrackingNumbers::Table)
                        .col(TrackingNumbers::OrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TrackingHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TrackingHistory::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TrackingHistory::TrackingNumberId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(TrackingHistory::OldStatus).string().null())
                        .col(
                            ColumnDef::new(TrackingHistory::NewStatus)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(TrackingHistory::Location).string().null())
                        .col(ColumnDef::new(TrackingHistory::Comment).string().null())
                        .col(ColumnDef::new(TrackingHistory::ChangedBy).uuid().null())
                        .col(
                            ColumnDef::new(TrackingHistory::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_tracking_history_tracking_number_id")
                        .table(TrackingHistory::Table)
                        .col(TrackingHistory::TrackingNumberId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TrackingNotifications::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TrackingNotifications::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TrackingNotifications::TrackingNumberId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TrackingNotifications::UserId)
                                .uuid()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(TrackingNotifications::Message)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TrackingNotifications::IsRead)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(TrackingNotifications::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_tracking_notifications_user_id")
                        .table(TrackingNotifications::Table)
                        .col(TrackingNotifications::UserId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TrackingNotifications::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(TrackingHistory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(TrackingNumbers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(TrackingCompanies::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum TrackingCompanies {
        Table,
        Id,
        Name,
        Code,
        Website,
        TrackingUrlTemplate,
        Phone,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum TrackingNumbers {
        Table,
        Id,
        TrackingNumber,
        CompanyId,
        OrderId,
        Status,
        Description,
        ShippedDate,
        DeliveredDate,
        IsArchived,
        IsProblematic,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum TrackingHistory {
        Table,
        Id,
        TrackingNumberId,
        OldStatus,
        NewStatus,
        Location,
        Comment,
        ChangedBy,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum TrackingNotifications {
        Table,
        Id,
        TrackingNumberId,
        UserId,
        Message,
        IsRead,
        CreatedAt,
    }
}

mod m20240501_000011_create_reporting_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000011_create_reporting_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ReportTemplates::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ReportTemplates::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ReportTemplates::Name).string().not_null())
                        .col(
                            ColumnDef::new(ReportTemplates::ReportKind)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReportTemplates::Description)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(ReportTemplates::Parameters).json().null())
                        .col(
                            ColumnDef::new(ReportTemplates::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(ReportTemplates::CreatedBy).uuid().null())
                        .col(
                            ColumnDef::new(ReportTemplates::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReportTemplates::UpdatedAt)
                                .timestamp()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Reports::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Reports::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Reports::TemplateId).uuid().not_null())
                        .col(ColumnDef::new(Reports::Name).string().not_null())
                        .col(ColumnDef::new(Reports::DateFrom).date().not_null())
                        .col(ColumnDef::new(Reports::DateTo).date().not_null())
                        .col(ColumnDef::new(Reports::Result).json().null())
                        .col(ColumnDef::new(Reports::GeneratedAt).timestamp().null())
                        .col(ColumnDef::new(Reports::CreatedBy).uuid().null())
                        .col(ColumnDef::new(Reports::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_reports_template_id")
                        .table(Reports::Table)
                        .col(Reports::TemplateId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ScheduledReports::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ScheduledReports::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ScheduledReports::TemplateId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ScheduledReports::Frequency)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ScheduledReports::RunAt).time().not_null())
                        .col(
                            ColumnDef::new(ScheduledReports::Recipients)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ScheduledReports::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(ScheduledReports::LastRunAt)
                                .timestamp()
                                .null(),
                        )
                        .col(ColumnDef::new(ScheduledReports::CreatedBy).uuid().null())
                        .col(
                            ColumnDef::new(ScheduledReports::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ScheduledReports::UpdatedAt)
                                .timestamp()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Dashboards::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Dashboards::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Dashboards::Name).string().not_null())
                        .col(ColumnDef::new(Dashboards::Description).string().null())
                        .col(ColumnDef::new(Dashboards::Layout).json().null())
                        .col(
                            ColumnDef::new(Dashboards::IsDefault)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Dashboards::OwnerId).uuid().null())
                        .col(
                            ColumnDef::new(Dashboards::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Dashboards::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Dashboards::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ScheduledReports::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Reports::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ReportTemplates::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ReportTemplates {
        Table,
        Id,
        Name,
        ReportKind,
        Description,
        Parameters,
        IsActive,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Reports {
        Table,
        Id,
        TemplateId,
        Name,
        DateFrom,
        DateTo,
        Result,
        GeneratedAt,
        CreatedBy,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum ScheduledReports {
        Table,
        Id,
        TemplateId,
        Frequency,
        RunAt,
        Recipients,
        IsActive,
        LastRunAt,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Dashboards {
        Table,
        Id,
        Name,
        Description,
        Layout,
        IsDefault,
        OwnerId,
        CreatedAt,
        UpdatedAt,
    }
}
