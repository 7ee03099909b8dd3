use crate::entities::{DrawnItem, OrderStatus, PaymentMethod, Rarity, order_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub series_id: i64,
    /// 1..=10
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub order_id: i64,
    pub order_number: String,
    pub total_amount: i64,
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PayOrderResponse {
    pub order_id: i64,
    pub status: OrderStatus,
    pub paid_at: DateTime<Utc>,
    pub balance_after: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrawItemResponse {
    pub item_id: i64,
    pub name: String,
    pub rarity: Rarity,
    /// 百分比，如 40.0 表示 40%
    pub drop_weight: f64,
}

impl From<&DrawnItem> for DrawItemResponse {
    fn from(item: &DrawnItem) -> Self {
        Self {
            item_id: item.item_id,
            name: item.name.clone(),
            rarity: item.rarity,
            drop_weight: item.drop_weight_bp as f64 / 100.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CancelOrderResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub order_number: String,
    pub series_id: i64,
    pub quantity: i32,
    pub unit_price: i64,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub payment_method: Option<PaymentMethod>,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<order_entity::Model> for OrderResponse {
    fn from(m: order_entity::Model) -> Self {
        Self {
            id: m.id,
            order_number: m.order_number,
            series_id: m.series_id,
            quantity: m.quantity,
            unit_price: m.unit_price,
            total_amount: m.total_amount,
            status: m.status,
            payment_method: m.payment_method,
            created_at: m.created_at,
            paid_at: m.paid_at,
            completed_at: m.completed_at,
        }
    }
}

/// 订单详情，含系列名称与抽取结果
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub series_name: Option<String>,
    pub remarks: Option<String>,
    pub result_items: Vec<DrawItemResponse>,
}

impl OrderDetailResponse {
    pub fn new(model: order_entity::Model, series_name: Option<String>) -> Self {
        let result_items = model.drawn_items().iter().map(Into::into).collect();
        let remarks = model.remarks.clone();
        Self {
            order: model.into(),
            series_name,
            remarks,
            result_items,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<OrderStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_weight_as_percentage() {
        let item = DrawnItem {
            item_id: 1,
            name: "Hero".into(),
            rarity: Rarity::Common,
            drop_weight_bp: 4000,
        };
        let resp = DrawItemResponse::from(&item);
        assert_eq!(resp.drop_weight, 40.0);
        assert_eq!(
            serde_json::to_value(&resp).unwrap()["rarity"],
            serde_json::json!("common")
        );
    }
}
