use super::{current_user_id, respond};
use crate::models::*;
use crate::services::PointsService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/points/history",
    tag = "points",
    params(PointsHistoryQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取积分流水成功", body = PointsHistoryPage),
        (status = 401, description = "未授权")
    )
)]
pub async fn get_history(
    service: web::Data<PointsService>,
    req: HttpRequest,
    query: web::Query<PointsHistoryQuery>,
) -> Result<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    Ok(respond(service.get_history(user_id, &query).await))
}

pub fn points_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/points").route("/history", web::get().to(get_history)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::inventory_config;
    use crate::middlewares::AuthMiddleware;
    use crate::services::{InventoryLedger, InventoryService};
    use crate::test_support;
    use crate::utils::{JwtService, issue_test_token};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_history_and_inventory_over_http() {
        let db = test_support::setup_db().await;
        let user = test_support::create_user(&db, "alice", 0).await;
        let other = test_support::create_user(&db, "mallory", 0).await;
        let (_, items) = test_support::create_standard_series(&db, 99).await;
        InventoryLedger::apply_draw(&db, user.id, items[2].id).await.unwrap();

        let points_service = PointsService::new(db.clone());
        points_service.grant_points(user.id, 120, "Top up").await.unwrap();

        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(JwtService::new("secret")))
                .app_data(web::Data::new(points_service))
                .app_data(web::Data::new(InventoryService::new(db.clone())))
                .service(
                    web::scope("/api/v1")
                        .configure(points_config)
                        .configure(inventory_config),
                ),
        )
        .await;
        let auth = (
            "Authorization",
            format!("Bearer {}", issue_test_token("secret", user.id, "access")),
        );

        let req = test::TestRequest::get()
            .uri("/api/v1/points/history")
            .insert_header(auth.clone())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["data"][0]["transaction_type"], "earn");
        assert_eq!(body["data"]["data"][0]["balance_after"], 120);

        let req = test::TestRequest::get()
            .uri("/api/v1/inventory?rarity=epic")
            .insert_header(auth.clone())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["total"], 1);
        let inventory_id = body["data"]["data"][0]["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/inventory/{inventory_id}/favorite"))
            .insert_header(auth.clone())
            .set_json(serde_json::json!({"is_favorite": true}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["is_favorite"], true);

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/inventory/{inventory_id}/display"))
            .insert_header((
                "Authorization",
                format!("Bearer {}", issue_test_token("secret", other.id, "access")),
            ))
            .set_json(serde_json::json!({"is_displayed": true}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
