use crate::entities::{item_entity as items, series_entity as series};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

/// 目录只读访问 + 统计字段累加
pub struct CatalogRepository;

impl CatalogRepository {
    pub async fn find_series<C: ConnectionTrait>(
        conn: &C,
        series_id: i64,
    ) -> Result<Option<series::Model>, DbErr> {
        series::Entity::find_by_id(series_id).one(conn).await
    }

    pub async fn find_active_series<C: ConnectionTrait>(
        conn: &C,
        series_id: i64,
    ) -> Result<Option<series::Model>, DbErr> {
        series::Entity::find_by_id(series_id)
            .filter(series::Column::IsActive.eq(true))
            .one(conn)
            .await
    }

    /// 系列下启用的款式，按 id 升序 (保证同一随机种子下结果稳定)
    pub async fn active_items<C: ConnectionTrait>(
        conn: &C,
        series_id: i64,
    ) -> Result<Vec<items::Model>, DbErr> {
        items::Entity::find()
            .filter(items::Column::SeriesId.eq(series_id))
            .filter(items::Column::IsActive.eq(true))
            .order_by_asc(items::Column::Id)
            .all(conn)
            .await
    }

    pub async fn find_item<C: ConnectionTrait>(
        conn: &C,
        item_id: i64,
    ) -> Result<Option<items::Model>, DbErr> {
        items::Entity::find_by_id(item_id).one(conn).await
    }

    pub async fn increment_obtained_count<C: ConnectionTrait>(
        conn: &C,
        item_id: i64,
        by: i64,
    ) -> Result<(), DbErr> {
        let result = items::Entity::update_many()
            .col_expr(
                items::Column::ObtainedCount,
                Expr::col(items::Column::ObtainedCount).add(by),
            )
            .col_expr(items::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(items::Column::Id.eq(item_id))
            .exec(conn)
            .await?;

        if result.rows_affected != 1 {
            return Err(DbErr::RecordNotUpdated);
        }
        Ok(())
    }

    pub async fn increment_sold_count<C: ConnectionTrait>(
        conn: &C,
        series_id: i64,
        by: i64,
    ) -> Result<(), DbErr> {
        let result = series::Entity::update_many()
            .col_expr(
                series::Column::SoldCount,
                Expr::col(series::Column::SoldCount).add(by),
            )
            .col_expr(series::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(series::Column::Id.eq(series_id))
            .exec(conn)
            .await?;

        if result.rows_affected != 1 {
            return Err(DbErr::RecordNotUpdated);
        }
        Ok(())
    }
}
