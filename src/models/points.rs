use crate::entities::{PointsTransactionType, points_history_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PointsHistoryResponse {
    pub id: i64,
    pub transaction_type: PointsTransactionType,
    pub amount: i64,
    pub balance_after: i64,
    pub description: String,
    pub related_order_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<points_history_entity::Model> for PointsHistoryResponse {
    fn from(m: points_history_entity::Model) -> Self {
        Self {
            id: m.id,
            transaction_type: m.transaction_type,
            amount: m.amount,
            balance_after: m.balance_after,
            description: m.description,
            related_order_id: m.related_order_id,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PointsHistoryQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
