//! JSON rendering of domain errors.
//!
//! Internal failures are logged in full and reach the client as a generic
//! message carrying only the trace id. Extractor failures on bodies, paths
//! and query strings are reshaped into `invalid_request` errors so every
//! rejection shares one payload shape.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for storefront handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn redacted(error: &Error) -> Error {
    let generic = Error::internal(REDACTED_MESSAGE);
    match error.trace_id() {
        Some(id) => generic.with_trace_id(id),
        None => generic,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self.code() {
            ErrorCode::InternalError => {
                error!(message = %self.message(), trace_id = ?self.trace_id(), "request failed");
                redacted(self)
            }
            code => {
                debug!(?code, message = %self.message(), "request rejected");
                self.clone()
            }
        };

        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(body)
    }
}

/// `JsonConfig` error handler: malformed or mistyped request bodies.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid request body: {err}")).into()
}

/// `PathConfig` error handler: path segments that do not parse, such as a
/// non-numeric cart item id.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid path parameter: {err}")).into()
}

/// `QueryConfig` error handler.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}")).into()
}
