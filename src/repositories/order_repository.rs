use crate::entities::{DrawResult, OrderStatus, order_entity as orders};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

/// 条件更新时一并写入的字段
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub result_items: Option<DrawResult>,
}

impl StatusUpdate {
    pub fn to(status: OrderStatus) -> Self {
        Self {
            status,
            paid_at: None,
            completed_at: None,
            result_items: None,
        }
    }

    pub fn paid(at: DateTime<Utc>) -> Self {
        Self {
            paid_at: Some(at),
            ..Self::to(OrderStatus::Paid)
        }
    }

    pub fn completed(at: DateTime<Utc>, result: DrawResult) -> Self {
        Self {
            completed_at: Some(at),
            result_items: Some(result),
            ..Self::to(OrderStatus::Completed)
        }
    }
}

pub struct OrderRepository;

impl OrderRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        conn: &C,
        order_id: i64,
    ) -> Result<Option<orders::Model>, DbErr> {
        orders::Entity::find_by_id(order_id).one(conn).await
    }

    pub async fn insert<C: ConnectionTrait>(
        conn: &C,
        order: orders::ActiveModel,
    ) -> Result<orders::Model, DbErr> {
        order.insert(conn).await
    }

    pub async fn exists_order_number<C: ConnectionTrait>(
        conn: &C,
        order_number: &str,
    ) -> Result<bool, DbErr> {
        let count = orders::Entity::find()
            .filter(orders::Column::OrderNumber.eq(order_number))
            .count(conn)
            .await?;
        Ok(count > 0)
    }

    /// 按创建时间倒序分页，返回 (当前页, 总数)
    pub async fn list_by_user<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        status: Option<OrderStatus>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<orders::Model>, u64), DbErr> {
        let mut query = orders::Entity::find().filter(orders::Column::UserId.eq(user_id));
        if let Some(status) = status {
            query = query.filter(orders::Column::Status.eq(status));
        }

        let total = query.clone().count(conn).await?;
        let items = query
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(conn)
            .await?;

        Ok((items, total))
    }

    /// 状态 CAS: `UPDATE orders SET status = :to ... WHERE id = :id AND status = :expected`
    ///
    /// 返回 false 表示订单状态已被其他事务修改 (影响行数为 0)
    pub async fn compare_and_set_status<C: ConnectionTrait>(
        conn: &C,
        order_id: i64,
        expected: OrderStatus,
        update: StatusUpdate,
    ) -> Result<bool, DbErr> {
        let mut stmt = orders::Entity::update_many()
            .col_expr(orders::Column::Status, Expr::value(update.status))
            .col_expr(orders::Column::UpdatedAt, Expr::value(Utc::now()));

        if let Some(paid_at) = update.paid_at {
            stmt = stmt.col_expr(orders::Column::PaidAt, Expr::value(paid_at));
        }
        if let Some(completed_at) = update.completed_at {
            stmt = stmt.col_expr(orders::Column::CompletedAt, Expr::value(completed_at));
        }
        if let Some(result) = update.result_items {
            stmt = stmt.col_expr(orders::Column::ResultItems, Expr::value(result));
        }

        let result = stmt
            .filter(orders::Column::Id.eq(order_id))
            .filter(orders::Column::Status.eq(expected))
            .exec(conn)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
