//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: persisting the staff identity at login,
//! deriving a [`RequestContext`], and purging at logout.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::Error;
use crate::domain::ports::{RequestContext, StaffId};

pub(crate) const STAFF_ID_KEY: &str = "staff_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated staff member's identity in the cookie.
    pub fn persist_staff(&self, staff_id: &StaffId) -> Result<(), Error> {
        self.0
            .insert(STAFF_ID_KEY, staff_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the staff identity from the session, if present.
    pub fn staff_id(&self) -> Result<Option<StaffId>, Error> {
        let id = self
            .0
            .get::<String>(STAFF_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match StaffId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid staff id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Build the request context handed to domain operations.
    pub fn request_context(&self) -> Result<RequestContext, Error> {
        Ok(match self.staff_id()? {
            Some(id) => RequestContext::staff(id),
            None => RequestContext::anonymous(),
        })
    }

    /// Drop the session entirely, ending the staff login.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(crate::inbound::http::test_utils::test_session_middleware())
    }

    #[actix_web::test]
    async fn round_trips_staff_id() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        let id = StaffId::new("admin").expect("fixture id");
                        session.persist_staff(&id)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let ctx = session.request_context()?;
                        let id = ctx
                            .staff_id()
                            .ok_or_else(|| Error::unauthorized("login required"))?;
                        Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, "admin");
    }

    #[actix_web::test]
    async fn missing_staff_yields_anonymous_context() {
        let app = test::init_service(session_test_app().route(
            "/ctx",
            web::get().to(|session: SessionContext| async move {
                let ctx = session.request_context()?;
                Ok::<_, Error>(HttpResponse::Ok().body(format!("{}", ctx.staff_id().is_some())))
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/ctx").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "false");
    }

    #[actix_web::test]
    async fn tampered_staff_id_is_treated_as_anonymous() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set-blank",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(STAFF_ID_KEY, "   ")
                            .expect("set blank staff id");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/ctx",
                    web::get().to(|session: SessionContext| async move {
                        let ctx = session.request_context()?;
                        Ok::<_, Error>(
                            HttpResponse::Ok().body(format!("{}", ctx.staff_id().is_some())),
                        )
                    }),
                ),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-blank").to_request(),
        )
        .await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/ctx").cookie(cookie).to_request(),
        )
        .await;
        let body = test::read_body(res).await;
        assert_eq!(body, "false");
    }
}
