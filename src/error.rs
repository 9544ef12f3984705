use actix_web::dev::ServiceResponse;
use actix_web::http::{header, StatusCode};
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use tracing::error;

use crate::repo::RepoError;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized request")] Unauthorized,
    #[error("{0}")] BadRequest(String),
    #[error("{0}")] NotFound(String),
    #[error("internal error: {0}")] Internal(String),
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            e @ RepoError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            RepoError::Validation(msg) => ApiError::BadRequest(msg),
            RepoError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());
        if matches!(self, ApiError::Unauthorized) {
            res.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        res.json(ApiErrorBody { error: self.to_string() })
    }
}

const GENERIC_SERVER_ERROR: &str = "server error";

/// Last handler in the chain: every 500 is logged, and in production its
/// body is replaced so no internal detail reaches the client.
pub fn mask_internal_errors<B: 'static>(production: bool) -> ErrorHandlers<B> {
    ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, move |res: ServiceResponse<B>| {
        let detail = res.response().error().map(|e| e.to_string()).unwrap_or_default();
        error!(path = %res.request().path(), %detail, "request failed");
        if !production {
            return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
        }
        let (req, _) = res.into_parts();
        let masked = HttpResponse::InternalServerError()
            .json(ApiErrorBody { error: GENERIC_SERVER_ERROR.to_string() });
        Ok(ErrorHandlerResponse::Response(ServiceResponse::new(req, masked).map_into_right_body()))
    })
}
