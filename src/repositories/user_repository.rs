use crate::entities::user_entity as users;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

/// 积分余额读写，余额扣减均为条件更新
pub struct UserRepository;

impl UserRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(user_id).one(conn).await
    }

    pub async fn balance<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
    ) -> Result<Option<i64>, DbErr> {
        Ok(Self::find_by_id(conn, user_id).await?.map(|u| u.points))
    }

    /// `UPDATE users SET points = points - :amount WHERE id = :id AND points >= :amount`
    ///
    /// 返回 false 表示用户不存在或余额不足
    pub async fn debit_if_sufficient<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        amount: i64,
    ) -> Result<bool, DbErr> {
        let result = users::Entity::update_many()
            .col_expr(
                users::Column::Points,
                Expr::col(users::Column::Points).sub(amount),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(user_id))
            .filter(users::Column::Points.gte(amount))
            .exec(conn)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// 返回 false 表示用户不存在
    pub async fn credit<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        amount: i64,
    ) -> Result<bool, DbErr> {
        let result = users::Entity::update_many()
            .col_expr(
                users::Column::Points,
                Expr::col(users::Column::Points).add(amount),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(user_id))
            .exec(conn)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
