use crate::entities::points_history_entity as points;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

/// 积分流水：只提供追加与查询，不提供修改/删除
pub struct PointsHistoryRepository;

impl PointsHistoryRepository {
    pub async fn append<C: ConnectionTrait>(
        conn: &C,
        entry: points::ActiveModel,
    ) -> Result<points::Model, DbErr> {
        entry.insert(conn).await
    }

    pub async fn list_by_user<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<points::Model>, u64), DbErr> {
        let query = points::Entity::find().filter(points::Column::UserId.eq(user_id));

        let total = query.clone().count(conn).await?;
        let items = query
            .order_by_desc(points::Column::CreatedAt)
            .order_by_desc(points::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(conn)
            .await?;

        Ok((items, total))
    }
}
