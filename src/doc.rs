//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct that generates the OpenAPI specification
//! for the REST API: every HTTP endpoint from the inbound layer, the DTO
//! schemas, and the session cookie security scheme. Swagger UI serves the
//! document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Comanda backend API",
        description = "Checkout, order lifecycle, and staff console endpoints."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::staff::login,
        crate::inbound::http::staff::logout,
        crate::inbound::http::menu::list_menu,
        crate::inbound::http::menu::list_categories,
        crate::inbound::http::orders::checkout,
        crate::inbound::http::orders::list_open,
        crate::inbound::http::orders::list_history,
        crate::inbound::http::orders::complete,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::MenuItem,
        crate::inbound::http::staff::LoginRequest,
        crate::inbound::http::orders::CheckoutPayload,
        crate::inbound::http::orders::SelectionPayload,
        crate::inbound::http::orders::LineItemDto,
        crate::inbound::http::orders::OrderDto,
        crate::inbound::http::orders::OrdersResponse,
    ))
)]
pub struct ApiDoc;
