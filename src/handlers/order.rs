use super::{current_user_id, respond};
use crate::models::*;
use crate::services::OrderService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/orders",
    tag = "order",
    request_body = CreateOrderRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建订单成功", body = CreateOrderResponse),
        (status = 400, description = "数量不合法"),
        (status = 401, description = "未授权"),
        (status = 404, description = "系列或用户不存在")
    )
)]
pub async fn create_order(
    service: web::Data<OrderService>,
    req: HttpRequest,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    Ok(respond(service.create_order(user_id, body.into_inner()).await))
}

#[utoipa::path(
    post,
    path = "/orders/{id}/pay",
    tag = "order",
    params(
        ("id" = i64, Path, description = "订单ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "支付成功", body = PayOrderResponse),
        (status = 400, description = "积分不足"),
        (status = 403, description = "非本人订单"),
        (status = 404, description = "订单不存在"),
        (status = 409, description = "订单状态不允许支付"),
        (status = 503, description = "事务失败，可重试")
    )
)]
pub async fn pay_order(
    service: web::Data<OrderService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    Ok(respond(service.pay_order(user_id, path.into_inner()).await))
}

#[utoipa::path(
    post,
    path = "/orders/{id}/draw",
    tag = "order",
    params(
        ("id" = i64, Path, description = "订单ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "抽取结果 (按抽取顺序)", body = [DrawItemResponse]),
        (status = 403, description = "非本人订单"),
        (status = 404, description = "订单不存在"),
        (status = 409, description = "订单未支付、已抽取或系列无可抽款式"),
        (status = 500, description = "掉落权重配置错误"),
        (status = 503, description = "事务失败，可重试")
    )
)]
/// 订单必须已支付；同一订单只能抽取一次
pub async fn execute_draw(
    service: web::Data<OrderService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    Ok(respond(service.execute_draw(user_id, path.into_inner()).await))
}

#[utoipa::path(
    put,
    path = "/orders/{id}/cancel",
    tag = "order",
    params(
        ("id" = i64, Path, description = "订单ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "取消成功", body = CancelOrderResponse),
        (status = 403, description = "非本人订单"),
        (status = 404, description = "订单不存在"),
        (status = 409, description = "仅待支付订单可取消")
    )
)]
pub async fn cancel_order(
    service: web::Data<OrderService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    Ok(respond(service.cancel_order(user_id, path.into_inner()).await))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "order",
    params(
        ("id" = i64, Path, description = "订单ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取订单详情成功", body = OrderDetailResponse),
        (status = 403, description = "非本人订单"),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn get_order(
    service: web::Data<OrderService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    Ok(respond(service.get_order(user_id, path.into_inner()).await))
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "order",
    params(OrderQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取订单列表成功", body = OrderPage),
        (status = 401, description = "未授权")
    )
)]
pub async fn list_orders(
    service: web::Data<OrderService>,
    req: HttpRequest,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    Ok(respond(service.list_orders(user_id, &query).await))
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(create_order))
            .route("", web::get().to(list_orders))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}/pay", web::post().to(pay_order))
            .route("/{id}/draw", web::post().to(execute_draw))
            .route("/{id}/cancel", web::put().to(cancel_order)),
    );
}
