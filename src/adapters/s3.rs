use crate::domain::ports::{ObjectBody, ObjectStore, UploadUrlSigner};
use crate::utils::error::{CatalogError, Result};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client as S3Client;
use std::time::Duration;
use url::form_urlencoded;

/// Object storage and upload-URL signing backed by a single S3 client.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

/// `CopySource` must be URL-encoded; each path segment is encoded on its own so `/` survives.
pub fn encode_copy_source(bucket: &str, key: &str) -> String {
    let encoded_key = key
        .split('/')
        .map(|segment| {
            form_urlencoded::byte_serialize(segment.as_bytes())
                .collect::<String>()
                .replace('+', "%20")
        })
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}", bucket, encoded_key)
}

impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectBody> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                GetObjectError::NoSuchKey(_) => {
                    CatalogError::not_found(format!("s3://{}/{}", bucket, key))
                }
                err => CatalogError::upstream("S3", DisplayErrorContext(err)),
            })?;

        Ok(Box::pin(resp.body.into_async_read()))
    }

    async fn copy_object(&self, bucket: &str, source_key: &str, dest_key: &str) -> Result<()> {
        self.client
            .copy_object()
            .bucket(bucket)
            .copy_source(encode_copy_source(bucket, source_key))
            .key(dest_key)
            .send()
            .await
            .map_err(|err| CatalogError::upstream("S3", DisplayErrorContext(err)))?;
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| CatalogError::upstream("S3", DisplayErrorContext(err)))?;
        Ok(())
    }
}

impl UploadUrlSigner for S3ObjectStore {
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(|e| {
            CatalogError::InvalidConfigValueError {
                field: "signed_url_expires_in".to_string(),
                value: expires_in.as_secs().to_string(),
                reason: e.to_string(),
            }
        })?;

        let request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|err| CatalogError::upstream("S3", DisplayErrorContext(err)))?;

        Ok(request.uri().to_string())
    }
}
