use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 抽取获得的库存来源标记
pub const OBTAIN_METHOD_BLIND_BOX: &str = "blind_box_draw";

/// 用户库存实体
/// 说明:
/// - (user_id, item_id) 唯一，重复抽中同一款式只累加 quantity
/// - is_displayed / is_favorite 为用户自行切换的展示标记
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "user_inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub is_displayed: bool,
    pub is_favorite: bool,
    pub obtain_method: Option<String>,
    pub obtained_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::blind_box_items::Entity",
        from = "Column::ItemId",
        to = "super::blind_box_items::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Item,
}

impl Related<super::blind_box_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
