use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{OrderStatus, PaymentMethod, PointsTransactionType, Rarity};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::order::create_order,
        handlers::order::pay_order,
        handlers::order::execute_draw,
        handlers::order::cancel_order,
        handlers::order::get_order,
        handlers::order::list_orders,
        handlers::inventory::list_inventory,
        handlers::inventory::update_favorite,
        handlers::inventory::update_display,
        handlers::points::get_history,
    ),
    components(
        schemas(
            OrderStatus,
            PaymentMethod,
            PointsTransactionType,
            Rarity,
            CreateOrderRequest,
            CreateOrderResponse,
            PayOrderResponse,
            DrawItemResponse,
            CancelOrderResponse,
            OrderResponse,
            OrderDetailResponse,
            OrderQuery,
            OrderPage,
            InventoryItemResponse,
            InventoryQuery,
            InventoryPage,
            UpdateFavoriteRequest,
            UpdateDisplayRequest,
            PointsHistoryResponse,
            PointsHistoryQuery,
            PointsHistoryPage,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "order", description = "Blind box order API"),
        (name = "inventory", description = "User inventory API"),
        (name = "points", description = "Points ledger API"),
    ),
    info(
        title = "Blind Box Backend API",
        version = "1.0.0",
        description = "Blind box purchase and draw REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        for path in [
            "/orders",
            "/orders/{id}",
            "/orders/{id}/pay",
            "/orders/{id}/draw",
            "/orders/{id}/cancel",
            "/inventory",
            "/points/history",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
