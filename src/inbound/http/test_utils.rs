//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::{OrderCommandService, OrderQueryService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::access::SessionAccessGate;
use crate::outbound::catalog::StaticMenuCatalog;
use crate::outbound::persistence::InMemoryOrderStore;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build handler state over a fresh store and the sample catalog.
pub fn seeded_state() -> HttpState {
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
