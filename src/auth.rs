use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::Header;
use actix_web::{web, Error, HttpResponse, ResponseError};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use tracing::warn;

use crate::error::ApiError;
use crate::routes::AppState;

/// Byte comparison whose running time does not depend on where the inputs differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// True when `presented` matches the configured token. An empty configured
/// token matches nothing.
pub fn token_matches(presented: &str, expected: &str) -> bool {
    !expected.is_empty() && constant_time_eq(presented.as_bytes(), expected.as_bytes())
}

/// Middleware gating a scope behind `Authorization: Bearer <API_TOKEN>`.
/// The expected token is read from the `AppState` registered on the app.
#[derive(Clone, Copy, Default)]
pub struct RequireApiToken;

impl<S, B> Transform<S, ServiceRequest> for RequireApiToken
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireApiTokenMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireApiTokenMiddleware { service: Rc::new(service) }))
    }
}

pub struct RequireApiTokenMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireApiTokenMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        Box::pin(async move {
            let authorized = match req.app_data::<web::Data<AppState>>() {
                Some(state) => Authorization::<Bearer>::parse(&req)
                    .map(|auth| token_matches(auth.into_scheme().token(), &state.settings.api_token))
                    .unwrap_or(false),
                None => {
                    let (http_req, _) = req.into_parts();
                    let res = HttpResponse::from_error(ApiError::Internal("application state not configured".into()));
                    return Ok(ServiceResponse::new(http_req, res).map_into_right_body());
                }
            };

            if !authorized {
                warn!(path = %req.path(), "Unauthorized request to path");
                let (http_req, _) = req.into_parts();
                let res = ApiError::Unauthorized.error_response();
                return Ok(ServiceResponse::new(http_req, res).map_into_right_body());
            }

            let res = svc.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
