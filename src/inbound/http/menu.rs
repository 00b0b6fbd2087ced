//! Menu read handlers.
//!
//! ```text
//! GET /api/v1/menu        Full menu for browsing
//! GET /api/v1/categories  Distinct category names
//! ```
//!
//! Pure passthrough reads onto the external catalog; no staff capability
//! required. Menu maintenance itself lives outside the core.

use actix_web::{get, web};

use crate::domain::MenuItem;
use crate::domain::Error;
use crate::domain::ports::CatalogError;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn map_catalog_error(error: CatalogError) -> Error {
    match error {
        CatalogError::Unavailable { message } => {
            Error::service_unavailable(format!("menu catalog unavailable: {message}"))
        }
    }
}

/// Serve the full menu.
#[utoipa::path(
    get,
    path = "/api/v1/menu",
    responses(
        (status = 200, description = "Menu items", body = [MenuItem]),
        (status = 503, description = "Catalog unavailable", body = Error)
    ),
    tags = ["menu"],
    operation_id = "listMenu",
    security([])
)]
#[get("/menu")]
pub async fn list_menu(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<MenuItem>>> {
    let items = state.catalog.list_items().await.map_err(map_catalog_error)?;
    Ok(web::Json(items))
}

/// Serve the distinct category names, in menu order.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Category names", body = [String]),
        (status = 503, description = "Catalog unavailable", body = Error)
    ),
    tags = ["menu"],
    operation_id = "listCategories",
    security([])
)]
#[get("/categories")]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<String>>> {
    let items = state.catalog.list_items().await.map_err(map_catalog_error)?;
    let mut categories: Vec<String> = Vec::new();
    for item in items {
        if !categories.contains(&item.category) {
            categories.push(item.category);
        }
    }
    Ok(web::Json(categories))
}
