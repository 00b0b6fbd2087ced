//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{OrderCommandService, OrderQueryService};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::menu::{list_categories, list_menu};
use crate::inbound::http::orders::{checkout, complete, list_history, list_open};
use crate::inbound::http::staff::{login, logout};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::access::SessionAccessGate;
use crate::outbound::catalog::StaticMenuCatalog;
use crate::outbound::persistence::InMemoryOrderStore;

/// Wire the lifecycle services over the in-process adapters.
fn build_http_state() -> HttpState {
    let store = Arc::new(InMemoryOrderStore::new());
    let catalog = Arc::new(StaticMenuCatalog::sample());
    let gate = Arc::new(SessionAccessGate);
    HttpState::new(HttpStatePorts {
        orders: Arc::new(OrderCommandService::new(
            Arc::clone(&store),
            Arc::clone(&catalog),
            Arc::clone(&gate),
        )),
        orders_query: Arc::new(OrderQueryService::new(store, gate)),
        catalog,
    })
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(logout)
        .service(list_menu)
        .service(list_categories)
        .service(checkout)
        .service(list_history)
        .service(list_open)
        .service(complete);

    #[cfg_attr(not(debug_assertions), allow(unused_mut))]
    let mut app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}

/// Build and start the HTTP server; readiness flips once the bind succeeds.
pub fn run(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;

    let health_state = web::Data::new(HealthState::new());
    let http_state = web::Data::new(build_http_state());
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        key,
        cookie_secure,
        same_site,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
