use crate::config::lambda::CorsConfig;
use lambda_http::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, Response};
use serde::Serialize;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

pub fn text_response(
    cors: &CorsConfig,
    status: StatusCode,
    body: impl Into<String>,
) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain")
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, cors.allowed_origin.as_str())
        .header(ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type")
        .body(Body::Text(body.into()))
        .map_err(Box::new)?;
    Ok(response)
}

pub fn json_response<T: Serialize>(
    cors: &CorsConfig,
    status: StatusCode,
    value: &T,
) -> Result<Response<Body>, Error> {
    let body = match serde_json::to_string(value) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            return internal_error(cors);
        }
    };

    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, cors.allowed_origin.as_str())
        .header(ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type")
        .body(Body::Text(body))
        .map_err(Box::new)?;
    Ok(response)
}

pub fn internal_error(cors: &CorsConfig) -> Result<Response<Body>, Error> {
    text_response(cors, StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}
