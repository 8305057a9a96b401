use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_products_table::Migration),
            Box::new(m20240301_000002_create_vehicles_table::Migration),
            Box::new(m20240301_000003_create_orders_table::Migration),
            Box::new(m20240301_000004_create_delivery_proofs_table::Migration),
            Box::new(m20240301_000005_create_backorder_records_table::Migration),
        ]
    }
}

mod m20240301_000001_create_products_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000001_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Products::OwnerId).uuid().not_null())
                        .col(
                            ColumnDef::new(Products::Sku)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Products::Name).string_len(255).not_null())
                        .col(ColumnDef::new(Products::Category).string_len(100).null())
                        // Integer code managed by ProductStatusConverter
                        .col(ColumnDef::new(Products::Status).integer().null())
                        .col(
                            ColumnDef::new(Products::StockQuantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Products::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Products::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_owner_id")
                        .table(Products::Table)
                        .col(Products::OwnerId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Products {
        Table,
        Id,
        OwnerId,
        Sku,
        Name,
        Category,
        Status,
        StockQuantity,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000002_create_vehicles_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000002_create_vehicles_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Vehicles::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Vehicles::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Vehicles::OwnerId).uuid().not_null())
                        .col(
                            ColumnDef::new(Vehicles::LicensePlate)
                                .string_len(20)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Vehicles::VehicleType)
                                .string_len(50)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Vehicles::CapacityKg).double().null())
                        .col(ColumnDef::new(Vehicles::VolumeM3).double().null())
                        .col(
                            ColumnDef::new(Vehicles::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_vehicles_owner_id")
                        .table(Vehicles::Table)
                        .col(Vehicles::OwnerId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Vehicles::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Vehicles {
        Table,
        Id,
        OwnerId,
        LicensePlate,
        VehicleType,
        CapacityKg,
        VolumeM3,
        CreatedAt,
    }
}

mod m20240301_000003_create_orders_table {

    use super::m20240301_000002_create_vehicles_table::Vehicles;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000003_create_orders_table"
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
                        .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(Orders::OrderNumber)
                                .string_len(32)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Orders::OwnerId).uuid().not_null())
                        .col(ColumnDef::new(Orders::CustomerName).string().not_null())
                        .col(ColumnDef::new(Orders::DeliveryAddress).string().not_null())
                        .col(ColumnDef::new(Orders::Status).string_len(32).not_null())
                        .col(ColumnDef::new(Orders::VehicleId).uuid().null())
                        .col(
                            ColumnDef::new(Orders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_vehicle_id")
                                .from(Orders::Table, Orders::VehicleId)
                                .to(Vehicles::Table, Vehicles::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_owner_id")
                        .table(Orders::Table)
                        .col(Orders::OwnerId)
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
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
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
        OwnerId,
        CustomerName,
        DeliveryAddress,
        Status,
        VehicleId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000004_create_delivery_proofs_table {

    use super::m20240301_000003_create_orders_table::Orders;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000004_create_delivery_proofs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(DeliveryProofs::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DeliveryProofs::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(DeliveryProofs::OrderId).uuid().not_null())
                        .col(
                            ColumnDef::new(DeliveryProofs::ProofType)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryProofs::FilePath)
                                .string_len(1024)
                                .not_null(),
                        )
                        .col(ColumnDef::new(DeliveryProofs::RecipientName).string().null())
                        .col(ColumnDef::new(DeliveryProofs::Notes).text().null())
                        .col(
                            ColumnDef::new(DeliveryProofs::CapturedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryProofs::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_delivery_proofs_order_id")
                                .from(DeliveryProofs::Table, DeliveryProofs::OrderId)
                                .to(Orders::Table, Orders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_delivery_proofs_order_id")
                        .table(DeliveryProofs::Table)
                        .col(DeliveryProofs::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DeliveryProofs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum DeliveryProofs {
        Table,
        Id,
        OrderId,
        ProofType,
        FilePath,
        RecipientName,
        Notes,
        CapturedAt,
        CreatedAt,
    }
}

mod m20240301_000005_create_backorder_records_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000005_create_backorder_records_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(BackorderRecords::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BackorderRecords::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(BackorderRecords::Sku)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(BackorderRecords::Category)
                                .string_len(100)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(BackorderRecords::NationalInv)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BackorderRecords::LeadTime).integer().null())
                        .col(
                            ColumnDef::new(BackorderRecords::InTransitQty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BackorderRecords::Forecast3Month)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BackorderRecords::Sales3Month)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BackorderRecords::MinBank)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BackorderRecords::Perf6MonthAvg)
                                .double()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(BackorderRecords::WentOnBackorder)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(BackorderRecords::BackorderProbability)
                                .double()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(BackorderRecords::RecordedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_backorder_records_category")
                        .table(BackorderRecords::Table)
                        .col(BackorderRecords::Category)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BackorderRecords::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum BackorderRecords {
        Table,
        Id,
        Sku,
        Category,
        NationalInv,
        LeadTime,
        InTransitQty,
        #[sea_orm(iden = "forecast_3_month")]
        Forecast3Month,
        #[sea_orm(iden = "sales_3_month")]
        Sales3Month,
        MinBank,
        #[sea_orm(iden = "perf_6_month_avg")]
        Perf6MonthAvg,
        WentOnBackorder,
        BackorderProbability,
        RecordedAt,
    }
}
