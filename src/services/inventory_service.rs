use crate::entities::inventory_entity as inventory;
use crate::error::{AppError, AppResult};
use crate::models::{InventoryItemResponse, InventoryQuery, PaginatedResponse, PaginationParams};
use crate::repositories::{CatalogRepository, InventoryRepository};
use chrono::Utc;
use sea_orm::{DatabaseConnection, IntoActiveModel, Set};

/// 用户库存查询与展示标记
#[derive(Clone)]
pub struct InventoryService {
    pool: DatabaseConnection,
}

impl InventoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 获取库存（分页，可按稀有度过滤）
    pub async fn list_inventory(
        &self,
        user_id: i64,
        query: &InventoryQuery,
    ) -> AppResult<PaginatedResponse<InventoryItemResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let (rows, total) = InventoryRepository::list_by_user(
            &self.pool,
            user_id,
            query.rarity,
            params.get_offset(),
            params.get_limit(),
        )
        .await?;

        let data = rows.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(data, &params, total))
    }

    pub async fn update_favorite(
        &self,
        user_id: i64,
        inventory_id: i64,
        is_favorite: bool,
    ) -> AppResult<InventoryItemResponse> {
        let record = self.load_owned(user_id, inventory_id).await?;
        let mut active = record.into_active_model();
        active.is_favorite = Set(is_favorite);
        active.updated_at = Set(Utc::now());
        self.save(active).await
    }

    pub async fn update_display(
        &self,
        user_id: i64,
        inventory_id: i64,
        is_displayed: bool,
    ) -> AppResult<InventoryItemResponse> {
        let record = self.load_owned(user_id, inventory_id).await?;
        let mut active = record.into_active_model();
        active.is_displayed = Set(is_displayed);
        active.updated_at = Set(Utc::now());
        self.save(active).await
    }

    async fn load_owned(&self, user_id: i64, inventory_id: i64) -> AppResult<inventory::Model> {
        let record = InventoryRepository::find_by_id(&self.pool, inventory_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory item not found".to_string()))?;

        if record.user_id != user_id {
            return Err(AppError::Forbidden(
                "Inventory item does not belong to current user".to_string(),
            ));
        }
        Ok(record)
    }

    async fn save(&self, active: inventory::ActiveModel) -> AppResult<InventoryItemResponse> {
        let record = InventoryRepository::update(&self.pool, active).await?;
        let item = CatalogRepository::find_item(&self.pool, record.item_id).await?;
        Ok((record, item).into())
    }
}
