use crate::config::lambda::CorsConfig;
use crate::core::import_file_parser::{ImportFileParser, ImportReport};
use crate::core::upload_url::UploadUrlIssuer;
use crate::domain::ports::{ObjectStore, RecordQueue, UploadUrlSigner};
use crate::handlers::http::{internal_error, text_response};
use crate::utils::error::CatalogError;
use aws_lambda_events::event::s3::S3Event;
use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, Request, RequestExt, Response};

pub const FILE_NAME_PARAM: &str = "name";

/// `GET /import?name=<file>`: answers with a presigned PUT URL as plain text.
pub async fn import_products_file<G: UploadUrlSigner>(
    issuer: &UploadUrlIssuer<G>,
    cors: &CorsConfig,
    event: Request,
) -> Result<Response<Body>, Error> {
    let params = event.query_string_parameters();
    let file_name = match params.first(FILE_NAME_PARAM).map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => return text_response(cors, StatusCode::BAD_REQUEST, "File name is required"),
    };

    match issuer.issue(file_name).await {
        Ok(url) => text_response(cors, StatusCode::OK, url),
        Err(e @ CatalogError::ValidationError { .. }) => {
            tracing::info!(error = %e, file_name, "Rejected upload file name");
            text_response(cors, StatusCode::BAD_REQUEST, "File name is required")
        }
        Err(e) => {
            tracing::error!(error = %e, file_name, "Failed to issue upload URL");
            internal_error(cors)
        }
    }
}

/// S3 `ObjectCreated` trigger. Per-record failures are already logged by the parser, so the
/// invocation itself always succeeds and S3 never redelivers a partially handled batch.
pub async fn import_file_parser<S: ObjectStore, Q: RecordQueue>(
    parser: &ImportFileParser<S, Q>,
    event: S3Event,
) -> ImportReport {
    parser.process_event(&event).await
}
