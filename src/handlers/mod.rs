pub mod inventory;
pub mod order;
pub mod points;

pub use inventory::inventory_config;
pub use order::order_config;
pub use points::points_config;

use crate::error::{AppError, AppResult};
use crate::models::ApiResponse;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;

/// 从请求扩展中获取用户ID（中间件在鉴权后注入）
pub(crate) fn current_user_id(req: &HttpRequest) -> AppResult<i64> {
    req.extensions()
        .get::<i64>()
        .copied()
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

/// 成功时包装为 `{"success": true, "data": ...}`，失败时交给 `ResponseError`
pub(crate) fn respond<T: Serialize>(result: AppResult<T>) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::success(data)),
        Err(e) => e.error_response(),
    }
}
