use crate::entities::{Rarity, inventory_entity, item_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InventoryItemResponse {
    pub id: i64,
    pub item_id: i64,
    pub series_id: Option<i64>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub rarity: Option<Rarity>,
    pub quantity: i64,
    pub is_displayed: bool,
    pub is_favorite: bool,
    pub obtain_method: Option<String>,
    pub obtained_at: DateTime<Utc>,
}

impl From<(inventory_entity::Model, Option<item_entity::Model>)> for InventoryItemResponse {
    fn from((record, item): (inventory_entity::Model, Option<item_entity::Model>)) -> Self {
        Self {
            id: record.id,
            item_id: record.item_id,
            series_id: item.as_ref().map(|i| i.series_id),
            name: item.as_ref().map(|i| i.name.clone()),
            image: item.as_ref().and_then(|i| i.image.clone()),
            rarity: item.as_ref().map(|i| i.rarity),
            quantity: record.quantity,
            is_displayed: record.is_displayed,
            is_favorite: record.is_favorite,
            obtain_method: record.obtain_method,
            obtained_at: record.obtained_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub rarity: Option<Rarity>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateFavoriteRequest {
    pub is_favorite: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateDisplayRequest {
    pub is_displayed: bool,
}
