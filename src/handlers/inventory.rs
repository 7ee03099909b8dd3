use super::{current_user_id, respond};
use crate::models::*;
use crate::services::InventoryService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/inventory",
    tag = "inventory",
    params(InventoryQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取库存成功", body = InventoryPage),
        (status = 401, description = "未授权")
    )
)]
/// 分页获取用户库存（按获得时间倒序）
pub async fn list_inventory(
    service: web::Data<InventoryService>,
    req: HttpRequest,
    query: web::Query<InventoryQuery>,
) -> Result<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    Ok(respond(service.list_inventory(user_id, &query).await))
}

#[utoipa::path(
    put,
    path = "/inventory/{id}/favorite",
    tag = "inventory",
    params(
        ("id" = i64, Path, description = "库存记录ID")
    ),
    request_body = UpdateFavoriteRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新成功", body = InventoryItemResponse),
        (status = 403, description = "非本人库存"),
        (status = 404, description = "库存记录不存在")
    )
)]
pub async fn update_favorite(
    service: web::Data<InventoryService>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateFavoriteRequest>,
) -> Result<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    Ok(respond(
        service
            .update_favorite(user_id, path.into_inner(), body.is_favorite)
            .await,
    ))
}

#[utoipa::path(
    put,
    path = "/inventory/{id}/display",
    tag = "inventory",
    params(
        ("id" = i64, Path, description = "库存记录ID")
    ),
    request_body = UpdateDisplayRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新成功", body = InventoryItemResponse),
        (status = 403, description = "非本人库存"),
        (status = 404, description = "库存记录不存在")
    )
)]
pub async fn update_display(
    service: web::Data<InventoryService>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateDisplayRequest>,
) -> Result<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    Ok(respond(
        service
            .update_display(user_id, path.into_inner(), body.is_displayed)
            .await,
    ))
}

pub fn inventory_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/inventory")
            .route("", web::get().to(list_inventory))
            .route("/{id}/favorite", web::put().to(update_favorite))
            .route("/{id}/display", web::put().to(update_display)),
    );
}
