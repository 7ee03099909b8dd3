use sea_orm_migration::prelude::*;

use crate::m20250901_000001_create_catalog_tables::{BlindBoxItems, BlindBoxSeries, Users};

/// 订单 (状态机: pending -> paid -> completed, pending -> cancelled)
#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    OrderNumber,
    UserId,
    SeriesId,
    Quantity,
    UnitPrice,
    TotalAmount,
    Status,
    PaymentMethod,
    ResultItems,
    Remarks,
    CreatedAt,
    UpdatedAt,
    PaidAt,
    CompletedAt,
}

/// 用户库存 (每个用户每个款式一条记录)
#[derive(DeriveIden)]
enum UserInventory {
    Table,
    Id,
    UserId,
    ItemId,
    Quantity,
    IsDisplayed,
    IsFavorite,
    ObtainMethod,
    ObtainedAt,
    UpdatedAt,
}

/// 积分流水 (只追加)
#[derive(DeriveIden)]
enum PointsHistory {
    Table,
    Id,
    UserId,
    TransactionType,
    Amount,
    BalanceAfter,
    Description,
    RelatedOrderId,
    CreatedAt,
}

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
                    .col(
                        ColumnDef::new(Orders::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Orders::OrderNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Orders::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Orders::SeriesId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Orders::Quantity)
                            .integer()
                            .not_null()
                            .default(1)
                            .check(Expr::col(Orders::Quantity).gte(1)),
                    )
                    .col(ColumnDef::new(Orders::UnitPrice).big_integer().not_null())
                    .col(ColumnDef::new(Orders::TotalAmount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Orders::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Orders::PaymentMethod).string_len(20).null())
                    .col(ColumnDef::new(Orders::ResultItems).json_binary().null())
                    .col(ColumnDef::new(Orders::Remarks).text().null())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Orders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Orders::PaidAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Orders::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_user")
                            .from(Orders::Table, Orders::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_series")
                            .from(Orders::Table, Orders::SeriesId)
                            .to(BlindBoxSeries::Table, BlindBoxSeries::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_user_created")
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .col(Orders::CreatedAt)
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
            .create_table(
                Table::create()
                    .table(UserInventory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserInventory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserInventory::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserInventory::ItemId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserInventory::Quantity)
                            .big_integer()
                            .not_null()
                            .default(1)
                            .check(Expr::col(UserInventory::Quantity).gte(1)),
                    )
                    .col(
                        ColumnDef::new(UserInventory::IsDisplayed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserInventory::IsFavorite)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserInventory::ObtainMethod)
                            .string_len(100)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UserInventory::ObtainedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UserInventory::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_inventory_user")
                            .from(UserInventory::Table, UserInventory::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_inventory_item")
                            .from(UserInventory::Table, UserInventory::ItemId)
                            .to(BlindBoxItems::Table, BlindBoxItems::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // (user_id, item_id) 唯一: 重复抽中只累加数量
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_inventory_user_item_unique")
                    .table(UserInventory::Table)
                    .col(UserInventory::UserId)
                    .col(UserInventory::ItemId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PointsHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PointsHistory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PointsHistory::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PointsHistory::TransactionType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PointsHistory::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PointsHistory::BalanceAfter)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PointsHistory::Description)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PointsHistory::RelatedOrderId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PointsHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_points_history_user")
                            .from(PointsHistory::Table, PointsHistory::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_points_history_user_created")
                    .table(PointsHistory::Table)
                    .col(PointsHistory::UserId)
                    .col(PointsHistory::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：流水 -> 库存 -> 订单
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(PointsHistory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(UserInventory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Orders::Table).to_owned())
            .await?;

        Ok(())
    }
}
