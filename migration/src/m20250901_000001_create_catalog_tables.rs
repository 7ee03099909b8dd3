use sea_orm_migration::prelude::*;

/// 用户积分账户 (身份由外部认证服务签发，此处仅保存积分余额)
#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Username,
    Points,
    CreatedAt,
    UpdatedAt,
}

/// 盲盒系列
#[derive(DeriveIden)]
pub enum BlindBoxSeries {
    Table,
    Id,
    Name,
    Description,
    Category,
    CoverImage,
    Price,
    SoldCount,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

/// 盲盒款式 (抽取结果候选)
#[derive(DeriveIden)]
pub enum BlindBoxItems {
    Table,
    Id,
    SeriesId,
    Name,
    Description,
    Image,
    Rarity,
    DropWeightBp,
    ObtainedCount,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Users::Points)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Users::Points).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlindBoxSeries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlindBoxSeries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BlindBoxSeries::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(BlindBoxSeries::Description).text().null())
                    .col(
                        ColumnDef::new(BlindBoxSeries::Category)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlindBoxSeries::CoverImage)
                            .string_len(500)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BlindBoxSeries::Price)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlindBoxSeries::SoldCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BlindBoxSeries::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(BlindBoxSeries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BlindBoxSeries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 系列名称唯一 (种子数据依赖)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blind_box_series_name_unique")
                    .table(BlindBoxSeries::Table)
                    .col(BlindBoxSeries::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlindBoxItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlindBoxItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BlindBoxItems::SeriesId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BlindBoxItems::Name).string_len(100).not_null())
                    .col(ColumnDef::new(BlindBoxItems::Description).text().null())
                    .col(ColumnDef::new(BlindBoxItems::Image).string_len(500).null())
                    .col(
                        ColumnDef::new(BlindBoxItems::Rarity)
                            .string_len(20)
                            .not_null()
                            .default("common"),
                    )
                    // 概率权重 (basis points)，40.00 存为 4000
                    .col(
                        ColumnDef::new(BlindBoxItems::DropWeightBp)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(BlindBoxItems::DropWeightBp).gte(0)),
                    )
                    .col(
                        ColumnDef::new(BlindBoxItems::ObtainedCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BlindBoxItems::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(BlindBoxItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BlindBoxItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blind_box_items_series")
                            .from(BlindBoxItems::Table, BlindBoxItems::SeriesId)
                            .to(BlindBoxSeries::Table, BlindBoxSeries::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blind_box_items_series_active")
                    .table(BlindBoxItems::Table)
                    .col(BlindBoxItems::SeriesId)
                    .col(BlindBoxItems::IsActive)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(BlindBoxItems::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(BlindBoxSeries::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}
