use crate::error::AppResult;
use crate::models::{
    PaginatedResponse, PaginationParams, PointsHistoryQuery, PointsHistoryResponse,
};
use crate::repositories::PointsHistoryRepository;
use crate::services::{PointsLedger, TransactionCoordinator};
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct PointsService {
    pool: DatabaseConnection,
    coordinator: TransactionCoordinator,
}

impl PointsService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self {
            coordinator: TransactionCoordinator::new(pool.clone()),
            pool,
        }
    }

    /// 积分流水（分页，最新在前）
    pub async fn get_history(
        &self,
        user_id: i64,
        query: &PointsHistoryQuery,
    ) -> AppResult<PaginatedResponse<PointsHistoryResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let (list, total) = PointsHistoryRepository::list_by_user(
            &self.pool,
            user_id,
            params.get_offset(),
            params.get_limit(),
        )
        .await?;

        let data = list.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(data, &params, total))
    }

    /// 发放积分 (充值、奖励)
    pub async fn grant_points(
        &self,
        user_id: i64,
        amount: i64,
        description: &str,
    ) -> AppResult<PointsHistoryResponse> {
        let description = description.to_string();
        let entry = self
            .coordinator
            .run("grant_points", move |txn| {
                Box::pin(async move {
                    PointsLedger::record_earn(txn, user_id, amount, &description).await
                })
            })
            .await?;

        log::info!(
            "Granted {} points to user {}, balance_after={}",
            amount,
            user_id,
            entry.balance_after
        );
        Ok(entry.into())
    }
}
