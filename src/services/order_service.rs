use crate::entities::{DrawResult, DrawnItem, OrderStatus, PaymentMethod, item_entity as items};
use crate::entities::{order_entity as orders, points_history_entity as points};
use crate::error::{AppError, AppResult};
use crate::models::{
    CancelOrderResponse, CreateOrderRequest, CreateOrderResponse, DrawItemResponse,
    OrderDetailResponse, OrderQuery, OrderResponse, PaginatedResponse, PaginationParams,
    PayOrderResponse,
};
use crate::repositories::{CatalogRepository, OrderRepository, StatusUpdate, UserRepository};
use crate::services::{
    InventoryLedger, OrderEvent, PointsLedger, TransactionCoordinator, WeightedDrawEngine,
    next_status,
};
use crate::utils::generate_order_number;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, Set};
use std::sync::{Arc, Mutex};

pub const MIN_QUANTITY: i32 = 1;
pub const MAX_QUANTITY: i32 = 10;

/// 订单号冲突时的最大重试次数
const ORDER_NUMBER_ATTEMPTS: usize = 5;

type SharedRng = Arc<Mutex<Box<dyn RngCore + Send>>>;

/// 盲盒订单: 创建 -> 支付 -> 抽取，或在支付前取消
///
/// 支付与抽取都在 `TransactionCoordinator` 内完成，并以状态 CAS 重新校验订单状态，
/// 同一订单并发抽取时只有一个请求能成功。
#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
    coordinator: TransactionCoordinator,
    rng: SharedRng,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self::with_rng(pool, StdRng::from_entropy())
    }

    /// 注入随机源，固定种子可复现抽取结果
    pub fn with_rng<R: RngCore + Send + 'static>(pool: DatabaseConnection, rng: R) -> Self {
        Self {
            coordinator: TransactionCoordinator::new(pool.clone()),
            pool,
            rng: Arc::new(Mutex::new(Box::new(rng))),
        }
    }

    /// 创建待支付订单，不涉及积分
    pub async fn create_order(
        &self,
        user_id: i64,
        request: CreateOrderRequest,
    ) -> AppResult<CreateOrderResponse> {
        if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&request.quantity) {
            return Err(AppError::ValidationError(format!(
                "Quantity must be between {MIN_QUANTITY} and {MAX_QUANTITY}"
            )));
        }

        let series = CatalogRepository::find_active_series(&self.pool, request.series_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Series not found or inactive".to_string()))?;

        if UserRepository::find_by_id(&self.pool, user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let total_amount = series
            .price
            .checked_mul(request.quantity as i64)
            .ok_or_else(|| AppError::ValidationError("Order amount overflows".to_string()))?;

        let now = Utc::now();
        let order_number = self.next_order_number(now).await?;

        let order = orders::ActiveModel {
            order_number: Set(order_number),
            user_id: Set(user_id),
            series_id: Set(series.id),
            quantity: Set(request.quantity),
            unit_price: Set(series.price),
            total_amount: Set(total_amount),
            status: Set(OrderStatus::Pending),
            payment_method: Set(Some(PaymentMethod::Points)),
            result_items: Set(None),
            remarks: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            paid_at: Set(None),
            completed_at: Set(None),
            ..Default::default()
        };
        let order = OrderRepository::insert(&self.pool, order).await?;

        log::info!(
            "Order {} created: user={}, series={}, quantity={}, total={}",
            order.order_number,
            user_id,
            order.series_id,
            order.quantity,
            order.total_amount
        );

        Ok(CreateOrderResponse {
            order_id: order.id,
            order_number: order.order_number,
            total_amount: order.total_amount,
            status: order.status,
        })
    }

    /// 积分支付
    ///
    /// 事务外先做一次校验以返回精确错误；事务内状态 CAS 与条件扣款再次校验
    pub async fn pay_order(&self, user_id: i64, order_id: i64) -> AppResult<PayOrderResponse> {
        let order = self.load_owned_order(user_id, order_id).await?;
        next_status(order.status, OrderEvent::Pay)?;

        let series = CatalogRepository::find_series(&self.pool, order.series_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Series not found".to_string()))?;

        let available = UserRepository::balance(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        if available < order.total_amount {
            return Err(AppError::InsufficientFunds {
                required: order.total_amount,
                available,
            });
        }

        let paid_at = Utc::now();
        let amount = order.total_amount;
        let description = format!("Blind box purchase: {}", series.name);

        let entry = self
            .coordinator
            .run("pay_order", move |txn| {
                Box::pin(Self::settle_payment(
                    txn,
                    user_id,
                    order_id,
                    amount,
                    description,
                    paid_at,
                ))
            })
            .await?;

        log::info!(
            "Order {} paid: user={}, amount={}, balance_after={}",
            order.order_number,
            user_id,
            amount,
            entry.balance_after
        );

        Ok(PayOrderResponse {
            order_id,
            status: OrderStatus::Paid,
            paid_at,
            balance_after: entry.balance_after,
        })
    }

    /// 执行抽取
    ///
    /// 先在事务外完成全部随机抽取 (权重错误时不会产生任何写入)，
    /// 再在事务内认领订单 (paid -> completed)、写入结果、累加库存和统计
    pub async fn execute_draw(
        &self,
        user_id: i64,
        order_id: i64,
    ) -> AppResult<Vec<DrawItemResponse>> {
        let order = self.load_owned_order(user_id, order_id).await?;
        next_status(order.status, OrderEvent::Complete)?;

        let candidates = CatalogRepository::active_items(&self.pool, order.series_id).await?;
        if candidates.is_empty() {
            return Err(AppError::InvalidState(
                "Series has no active items to draw".to_string(),
            ));
        }

        let engine = WeightedDrawEngine::new(candidates.into_iter().map(|item| {
            let weight = item.drop_weight_bp;
            (item, weight)
        }))?;

        let drawn: Vec<DrawnItem> = self
            .draw_items(&engine, order.quantity as usize)?
            .into_iter()
            .map(|item| DrawnItem {
                item_id: item.id,
                name: item.name,
                rarity: item.rarity,
                drop_weight_bp: item.drop_weight_bp,
            })
            .collect();

        let completed_at = Utc::now();
        let result = DrawResult(drawn.clone());
        let series_id = order.series_id;
        let quantity = order.quantity as i64;

        self.coordinator
            .run("execute_draw", move |txn| {
                Box::pin(Self::settle_draw(
                    txn,
                    user_id,
                    order_id,
                    series_id,
                    quantity,
                    result,
                    completed_at,
                ))
            })
            .await?;

        log::info!(
            "Order {} drawn: user={}, items={:?}",
            order.order_number,
            user_id,
            drawn.iter().map(|d| d.item_id).collect::<Vec<_>>()
        );

        Ok(drawn.iter().map(DrawItemResponse::from).collect())
    }

    /// 取消待支付订单，不影响积分与库存
    pub async fn cancel_order(
        &self,
        user_id: i64,
        order_id: i64,
    ) -> AppResult<CancelOrderResponse> {
        let order = self.load_owned_order(user_id, order_id).await?;

        Self::transition(
            &self.pool,
            order_id,
            order.status,
            OrderEvent::Cancel,
            StatusUpdate::to(OrderStatus::Cancelled),
        )
        .await?;

        log::info!("Order {} cancelled by user {}", order.order_number, user_id);

        Ok(CancelOrderResponse {
            message: "Order cancelled".to_string(),
        })
    }

    pub async fn get_order(&self, user_id: i64, order_id: i64) -> AppResult<OrderDetailResponse> {
        let order = self.load_owned_order(user_id, order_id).await?;
        let series_name = CatalogRepository::find_series(&self.pool, order.series_id)
            .await?
            .map(|s| s.name);
        Ok(OrderDetailResponse::new(order, series_name))
    }

    pub async fn list_orders(
        &self,
        user_id: i64,
        query: &OrderQuery,
    ) -> AppResult<PaginatedResponse<OrderResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let (list, total) = OrderRepository::list_by_user(
            &self.pool,
            user_id,
            query.status,
            params.get_offset(),
            params.get_limit(),
        )
        .await?;

        let data = list.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(data, &params, total))
    }

    async fn load_owned_order(&self, user_id: i64, order_id: i64) -> AppResult<orders::Model> {
        let order = OrderRepository::find_by_id(&self.pool, order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        if order.user_id != user_id {
            return Err(AppError::Forbidden(
                "Order does not belong to current user".to_string(),
            ));
        }

        Ok(order)
    }

    async fn next_order_number(&self, now: DateTime<Utc>) -> AppResult<String> {
        for _ in 0..ORDER_NUMBER_ATTEMPTS {
            let candidate = {
                let mut rng = self.lock_rng()?;
                generate_order_number(&mut *rng, now)
            };
            if !OrderRepository::exists_order_number(&self.pool, &candidate).await? {
                return Ok(candidate);
            }
        }
        Err(AppError::InternalError(
            "Failed to allocate a unique order number".to_string(),
        ))
    }

    fn draw_items(
        &self,
        engine: &WeightedDrawEngine<items::Model>,
        count: usize,
    ) -> AppResult<Vec<items::Model>> {
        let mut rng = self.lock_rng()?;
        Ok(engine.draw_many(&mut *rng, count))
    }

    fn lock_rng(&self) -> AppResult<std::sync::MutexGuard<'_, Box<dyn RngCore + Send>>> {
        self.rng
            .lock()
            .map_err(|_| AppError::InternalError("Random source poisoned".to_string()))
    }

    /// 状态 CAS；影响行数为 0 时重新读取订单给出精确的拒绝原因
    async fn transition<C: ConnectionTrait>(
        conn: &C,
        order_id: i64,
        from: OrderStatus,
        event: OrderEvent,
        update: StatusUpdate,
    ) -> AppResult<()> {
        let to = next_status(from, event)?;
        let update = StatusUpdate { status: to, ..update };

        if OrderRepository::compare_and_set_status(conn, order_id, from, update).await? {
            return Ok(());
        }

        let current = OrderRepository::find_by_id(conn, order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
        next_status(current.status, event)?;
        Err(AppError::InvalidState(
            "Order status changed concurrently".to_string(),
        ))
    }

    async fn settle_payment(
        txn: &DatabaseTransaction,
        user_id: i64,
        order_id: i64,
        amount: i64,
        description: String,
        paid_at: DateTime<Utc>,
    ) -> AppResult<points::Model> {
        Self::transition(
            txn,
            order_id,
            OrderStatus::Pending,
            OrderEvent::Pay,
            StatusUpdate::paid(paid_at),
        )
        .await?;

        PointsLedger::record_spend(txn, user_id, amount, &description, Some(order_id)).await
    }

    async fn settle_draw(
        txn: &DatabaseTransaction,
        user_id: i64,
        order_id: i64,
        series_id: i64,
        quantity: i64,
        result: DrawResult,
        completed_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let item_ids: Vec<i64> = result.0.iter().map(|d| d.item_id).collect();

        Self::transition(
            txn,
            order_id,
            OrderStatus::Paid,
            OrderEvent::Complete,
            StatusUpdate::completed(completed_at, result),
        )
        .await?;

        for item_id in item_ids {
            InventoryLedger::apply_draw(txn, user_id, item_id).await?;
        }

        CatalogRepository::increment_sold_count(txn, series_id, quantity).await?;
        Ok(())
    }
}
