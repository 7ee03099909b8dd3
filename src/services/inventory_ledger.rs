use crate::entities::inventory_entity::OBTAIN_METHOD_BLIND_BOX;
use crate::error::AppResult;
use crate::repositories::{CatalogRepository, InventoryRepository};
use sea_orm::ConnectionTrait;

/// 库存账本: 每次抽中一个款式调用一次，顺序无关
pub struct InventoryLedger;

impl InventoryLedger {
    pub async fn apply_draw<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        item_id: i64,
    ) -> AppResult<()> {
        InventoryRepository::upsert_increment(conn, user_id, item_id, OBTAIN_METHOD_BLIND_BOX)
            .await?;
        CatalogRepository::increment_obtained_count(conn, item_id, 1).await?;
        Ok(())
    }
}
