use poem::error::{MethodNotAllowedError, NotFoundError, ParseJsonError};
use poem::http::StatusCode;
use poem::web::Json;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};
use serde_json::json;

use crate::prelude::*;

/// Maps endpoint errors onto the JSON error contract.
///
/// Everything unexpected becomes an opaque 500: internal details are logged,
/// never sent to the client.
pub struct ErrorMiddleware;

impl<E: Endpoint<Output = Response>> Middleware<E> for ErrorMiddleware {
    type Output = ErrorMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ErrorMiddlewareImpl { ep }
    }
}

pub struct ErrorMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint<Output = Response>> Endpoint for ErrorMiddlewareImpl<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        match self.ep.call(request).await {
            Err(error) if error.is::<NotFoundError>() => {
                info!(?method, ?uri, "{:#}", error);
                Ok(error_response(StatusCode::NOT_FOUND, "not found"))
            }
            Err(error) if error.is::<MethodNotAllowedError>() => {
                info!(?method, ?uri, "{:#}", error);
                Ok(error_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed"))
            }
            Err(error) if error.is::<ParseJsonError>() => {
                info!(?method, ?uri, "{:#}", error);
                Ok(error_response(StatusCode::BAD_REQUEST, &error.to_string()))
            }
            Err(error) => {
                error!(?method, ?uri, "{:#}", error);
                Ok(error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error"))
            }
            result => result,
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    Json(json!({ "error": message })).with_status(status).into_response()
}
