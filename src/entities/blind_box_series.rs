use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 盲盒系列 (只读目录)
/// - price: 单抽价格 (积分)
/// - sold_count: 已完成抽取的累计数量，仅统计用途
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "blind_box_series")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub cover_image: Option<String>,
    pub price: i64,
    pub sold_count: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::blind_box_items::Entity")]
    Items,
}

impl Related<super::blind_box_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
