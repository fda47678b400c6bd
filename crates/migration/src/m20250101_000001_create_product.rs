//! Create `products` table.
//!
//! Monetary columns are NUMERIC(19, 4); the cost breakdown is nullable.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Products::Make, 255))
                    .col(string_len(Products::Model, 255))
                    .col(string_len_null(Products::Country, 128))
                    .col(string_len_null(Products::Gas, 128))
                    .col(string_len_null(Products::Scope, 255))
                    .col(text(Products::Description).default(""))
                    .col(integer(Products::Quantity).default(0))
                    .col(amount_null(Products::ExWorkCost))
                    .col(amount_null(Products::Vat))
                    .col(amount_null(Products::Fitting))
                    .col(amount_null(Products::Transport))
                    .col(amount_null(Products::CdVat))
                    .col(amount_null(Products::UnitCost))
                    .col(amount_null(Products::TotalCost))
                    .col(amount_null(Products::Levy))
                    .col(amount_null(Products::SubTotal))
                    .col(amount(Products::QuotedUnitPrice))
                    .col(amount(Products::TotalPrice))
                    .col(amount_null(Products::Difference))
                    .col(timestamp_with_time_zone(Products::CreatedAt))
                    .col(timestamp_with_time_zone(Products::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Products::Table).to_owned()).await
    }
}

fn amount(col: Products) -> ColumnDef {
    ColumnDef::new(col).decimal_len(19, 4).not_null().to_owned()
}

fn amount_null(col: Products) -> ColumnDef {
    ColumnDef::new(col).decimal_len(19, 4).null().to_owned()
}

#[derive(DeriveIden, Clone, Copy)]
enum Products {
    Table,
    Id,
    Make,
    Model,
    Country,
    Gas,
    Scope,
    Description,
    Quantity,
    ExWorkCost,
    Vat,
    Fitting,
    Transport,
    CdVat,
    UnitCost,
    TotalCost,
    Levy,
    SubTotal,
    QuotedUnitPrice,
    TotalPrice,
    Difference,
    CreatedAt,
    UpdatedAt,
}
