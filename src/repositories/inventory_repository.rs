use crate::entities::{Rarity, inventory_entity as inventory, item_entity as items};
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

pub struct InventoryRepository;

impl InventoryRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        conn: &C,
        inventory_id: i64,
    ) -> Result<Option<inventory::Model>, DbErr> {
        inventory::Entity::find_by_id(inventory_id).one(conn).await
    }

    pub async fn find_by_user_item<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        item_id: i64,
    ) -> Result<Option<inventory::Model>, DbErr> {
        inventory::Entity::find()
            .filter(inventory::Column::UserId.eq(user_id))
            .filter(inventory::Column::ItemId.eq(item_id))
            .one(conn)
            .await
    }

    /// 单条 upsert: 不存在则以数量 1 插入，否则在唯一键 (user_id, item_id) 冲突时数量 +1
    pub async fn upsert_increment<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        item_id: i64,
        obtain_method: &str,
    ) -> Result<(), DbErr> {
        let now = Utc::now();
        let record = inventory::ActiveModel {
            user_id: Set(user_id),
            item_id: Set(item_id),
            quantity: Set(1),
            is_displayed: Set(false),
            is_favorite: Set(false),
            obtain_method: Set(Some(obtain_method.to_string())),
            obtained_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        inventory::Entity::insert(record)
            .on_conflict(
                OnConflict::columns([inventory::Column::UserId, inventory::Column::ItemId])
                    .value(
                        inventory::Column::Quantity,
                        Expr::col((inventory::Entity, inventory::Column::Quantity)).add(1),
                    )
                    .update_columns([
                        inventory::Column::ObtainMethod,
                        inventory::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;

        Ok(())
    }

    /// 按获得时间倒序分页，可按稀有度过滤，返回 (库存 + 款式, 总数)
    pub async fn list_by_user<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        rarity: Option<Rarity>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<(inventory::Model, Option<items::Model>)>, u64), DbErr> {
        let mut query = inventory::Entity::find()
            .join(JoinType::InnerJoin, inventory::Relation::Item.def())
            .filter(inventory::Column::UserId.eq(user_id));
        if let Some(rarity) = rarity {
            query = query.filter(items::Column::Rarity.eq(rarity));
        }

        let total = query.clone().count(conn).await?;
        let rows = query
            .select_also(items::Entity)
            .order_by_desc(inventory::Column::ObtainedAt)
            .order_by_desc(inventory::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(conn)
            .await?;

        Ok((rows, total))
    }

    pub async fn update<C: ConnectionTrait>(
        conn: &C,
        record: inventory::ActiveModel,
    ) -> Result<inventory::Model, DbErr> {
        record.update(conn).await
    }
}
