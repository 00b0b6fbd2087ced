//! Order API handlers.
//!
//! ```text
//! POST /api/v1/orders               Checkout a priced order (public)
//! GET  /api/v1/orders               Open orders for the console (staff)
//! GET  /api/v1/orders/history       Completed orders (staff)
//! POST /api/v1/orders/{id}/complete Mark an order completed (staff)
//! ```
//!
//! Wire shapes follow the original console: snake_case fields, listings
//! wrapped in an `orders` envelope, prices in cents.

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::cart::Selection;
use crate::domain::menu::MenuItemId;
use crate::domain::order::{Order, OrderId, OrderStatus};
use crate::domain::ports::CheckoutRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// One cart entry in a checkout submission.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SelectionPayload {
    /// Menu item identifier.
    pub id: u32,
    /// Desired quantity; zero entries are treated as absent.
    pub quantity: u32,
}

/// Checkout request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CheckoutPayload {
    pub customer_name: String,
    pub table_number: String,
    #[serde(default)]
    pub observation: Option<String>,
    pub items: Vec<SelectionPayload>,
}

impl From<CheckoutPayload> for CheckoutRequest {
    fn from(value: CheckoutPayload) -> Self {
        CheckoutRequest {
            customer_name: value.customer_name,
            table_number: value.table_number,
            observation: value.observation,
            selections: value
                .items
                .into_iter()
                .map(|item| Selection {
                    item_id: MenuItemId::new(item.id),
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// One line of a served order, with its checkout-time snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LineItemDto {
    pub menu_item_id: u32,
    pub menu_item_name: String,
    /// Unit price in cents, frozen at checkout.
    pub unit_price: i64,
    pub quantity: u32,
    /// Derived line total in cents.
    pub total_price: i64,
}

/// A persisted order as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrderDto {
    pub id: u64,
    pub customer_name: String,
    pub table_number: String,
    pub observation: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<LineItemDto>,
    /// Derived order total in cents.
    pub order_total: i64,
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().value(),
            customer_name: order.customer_name().to_owned(),
            table_number: order.table_number().to_owned(),
            observation: order.observation().to_owned(),
            status: order.status(),
            created_at: order.created_at(),
            items: order
                .line_items()
                .iter()
                .map(|line| LineItemDto {
                    menu_item_id: line.menu_item_id().value(),
                    menu_item_name: line.menu_item_name().to_owned(),
                    unit_price: line.unit_price().cents(),
                    quantity: line.quantity().value(),
                    total_price: line.total_price().cents(),
                })
                .collect(),
            order_total: order.order_total().cents(),
        }
    }
}

/// Listing envelope for the console and history views.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrdersResponse {
    pub orders: Vec<OrderDto>,
}

impl From<Vec<Order>> for OrdersResponse {
    fn from(orders: Vec<Order>) -> Self {
        Self {
            orders: orders.iter().map(OrderDto::from).collect(),
        }
    }
}

/// Submit a checkout and persist the priced order.
///
/// Pricing is authoritative on the server: the client sends ids and
/// quantities only, never prices.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CheckoutPayload,
    responses(
        (status = 201, description = "Order created", body = OrderDto),
        (status = 400, description = "Validation failed or no items selected", body = crate::domain::Error),
        (status = 422, description = "A selection references an unknown menu item", body = crate::domain::Error),
        (status = 503, description = "Catalog or store unavailable", body = crate::domain::Error)
    ),
    tags = ["orders"],
    operation_id = "checkout",
    security([])
)]
#[post("/orders")]
pub async fn checkout(
    state: web::Data<HttpState>,
    payload: web::Json<CheckoutPayload>,
) -> ApiResult<HttpResponse> {
    let order = state
        .orders
        .checkout(CheckoutRequest::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(OrderDto::from(&order)))
}

/// List open orders for the staff console, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "Open orders", body = OrdersResponse),
        (status = 401, description = "Staff capability required", body = crate::domain::Error)
    ),
    tags = ["orders"],
    operation_id = "listOpenOrders"
)]
#[get("/orders")]
pub async fn list_open(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<OrdersResponse>> {
    let ctx = session.request_context()?;
    let orders = state.orders_query.list_open(&ctx).await?;
    Ok(web::Json(OrdersResponse::from(orders)))
}

/// List completed orders for the history view, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/orders/history",
    responses(
        (status = 200, description = "Completed orders", body = OrdersResponse),
        (status = 401, description = "Staff capability required", body = crate::domain::Error)
    ),
    tags = ["orders"],
    operation_id = "listOrderHistory"
)]
#[get("/orders/history")]
pub async fn list_history(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<OrdersResponse>> {
    let ctx = session.request_context()?;
    let orders = state.orders_query.list_history(&ctx).await?;
    Ok(web::Json(OrdersResponse::from(orders)))
}

/// Move an open order to completed.
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/complete",
    params(
        ("id" = u64, Path, description = "Order identifier")
    ),
    responses(
        (status = 200, description = "Order completed", body = OrderDto),
        (status = 401, description = "Staff capability required", body = crate::domain::Error),
        (status = 404, description = "Order does not exist", body = crate::domain::Error),
        (status = 409, description = "Order is already completed", body = crate::domain::Error)
    ),
    tags = ["orders"],
    operation_id = "completeOrder"
)]
#[post("/orders/{id}/complete")]
pub async fn complete(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<web::Json<OrderDto>> {
    let ctx = session.request_context()?;
    let order = state
        .orders
        .complete(&ctx, OrderId::new(path.into_inner()))
        .await?;
    Ok(web::Json(OrderDto::from(&order)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::staff::{LoginRequest, login};
    use crate::inbound::http::test_utils::{seeded_state, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(seeded_state()))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(login)
                    .service(checkout)
                    .service(list_history)
                    .service(list_open)
                    .service(complete),
            )
    }

    async fn login_and_get_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> actix_web::cookie::Cookie<'static> {
        let login_res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(&LoginRequest {
                    username: "admin".into(),
                    password: "password".into(),
                })
                .to_request(),
        )
        .await;
        assert!(login_res.status().is_success());
        login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    fn checkout_body() -> Value {
        // Seeded catalog: item 1 costs 3200 cents, item 4 costs 300 cents.
        json!({
            "customer_name": "Ana",
            "table_number": "4",
            "items": [
                { "id": 1, "quantity": 1 },
                { "id": 4, "quantity": 2 }
            ]
        })
    }

    async fn submit_checkout(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> Value {
        let res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/orders")
                .set_json(checkout_body())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        actix_test::read_body_json(res).await
    }

    #[actix_web::test]
    async fn checkout_returns_the_priced_order() {
        let app = actix_test::init_service(test_app()).await;
        let body = submit_checkout(&app).await;

        assert_eq!(body["status"], "open");
        assert_eq!(body["customer_name"], "Ana");
        assert_eq!(body["items"][0]["unit_price"], 3200);
        assert_eq!(body["items"][1]["total_price"], 600);
        assert_eq!(body["order_total"], 3800);
    }

    #[actix_web::test]
    async fn checkout_with_unknown_item_is_unprocessable() {
        let app = actix_test::init_service(test_app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/orders")
                .set_json(json!({
                    "customer_name": "Ana",
                    "table_number": "4",
                    "items": [ { "id": 999, "quantity": 1 } ]
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "unknown_item");
    }

    #[actix_web::test]
    async fn checkout_without_items_is_a_bad_request() {
        let app = actix_test::init_service(test_app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/orders")
                .set_json(json!({
                    "customer_name": "Ana",
                    "table_number": "4",
                    "items": [ { "id": 1, "quantity": 0 } ]
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "empty_order");
    }

    #[actix_web::test]
    async fn listings_require_a_staff_session() {
        let app = actix_test::init_service(test_app()).await;
        for uri in ["/api/v1/orders", "/api/v1/orders/history"] {
            let res = actix_test::call_service(
                &app,
                actix_test::TestRequest::get().uri(uri).to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "uri: {uri}");
        }
    }

    #[actix_web::test]
    async fn completion_requires_a_staff_session() {
        let app = actix_test::init_service(test_app()).await;
        let created = submit_checkout(&app).await;
        let id = created["id"].as_u64().expect("order id");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/orders/{id}/complete"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn completed_orders_move_from_console_to_history() {
        let app = actix_test::init_service(test_app()).await;
        let created = submit_checkout(&app).await;
        let id = created["id"].as_u64().expect("order id");
        let cookie = login_and_get_cookie(&app).await;

        let open: Value = actix_test::read_body_json(
            actix_test::call_service(
                &app,
                actix_test::TestRequest::get()
                    .uri("/api/v1/orders")
                    .cookie(cookie.clone())
                    .to_request(),
            )
            .await,
        )
        .await;
        assert_eq!(open["orders"].as_array().expect("array").len(), 1);
        assert_eq!(open["orders"][0]["status"], "open");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/orders/{id}/complete"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let completed: Value = actix_test::read_body_json(res).await;
        assert_eq!(completed["status"], "completed");

        let open: Value = actix_test::read_body_json(
            actix_test::call_service(
                &app,
                actix_test::TestRequest::get()
                    .uri("/api/v1/orders")
                    .cookie(cookie.clone())
                    .to_request(),
            )
            .await,
        )
        .await;
        assert!(open["orders"].as_array().expect("array").is_empty());

        let history: Value = actix_test::read_body_json(
            actix_test::call_service(
                &app,
                actix_test::TestRequest::get()
                    .uri("/api/v1/orders/history")
                    .cookie(cookie)
                    .to_request(),
            )
            .await,
        )
        .await;
        let orders = history["orders"].as_array().expect("array");
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0]["status"], "completed");
        assert_eq!(orders[0]["order_total"], 3800);
    }

    #[actix_web::test]
    async fn repeat_completion_is_a_conflict() {
        let app = actix_test::init_service(test_app()).await;
        let created = submit_checkout(&app).await;
        let id = created["id"].as_u64().expect("order id");
        let cookie = login_and_get_cookie(&app).await;

        let first = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/orders/{id}/complete"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/orders/{id}/complete"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(second).await;
        assert_eq!(body["code"], "invalid_transition");
        assert_eq!(body["details"]["status"], "completed");
    }

    #[actix_web::test]
    async fn completing_a_missing_order_is_not_found() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_and_get_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/orders/404/complete")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
