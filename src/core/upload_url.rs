use crate::config::lambda::ImportConfig;
use crate::domain::ports::UploadUrlSigner;
use crate::utils::error::{CatalogError, Result};
use std::time::Duration;
use uuid::Uuid;

pub const UPLOAD_CONTENT_TYPE: &str = "text/csv";

/// Issues presigned PUT URLs for import files under the upload folder.
pub struct UploadUrlIssuer<G: UploadUrlSigner> {
    signer: G,
    bucket: String,
    upload_folder: String,
    expires_in: Duration,
}

impl<G: UploadUrlSigner> UploadUrlIssuer<G> {
    pub fn new(signer: G, config: &ImportConfig) -> Self {
        Self {
            signer,
            bucket: config.bucket_name.clone(),
            upload_folder: config.upload_folder.clone(),
            expires_in: Duration::from_secs(config.signed_url_expires_in),
        }
    }

    /// `<upload_folder>/<uuid>-<file_name>`; the uuid keeps concurrent uploads of the same name apart.
    pub fn upload_key(&self, file_name: &str) -> Result<String> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(CatalogError::validation("file name is required"));
        }
        if file_name.contains(['/', '\\']) {
            return Err(CatalogError::validation(format!(
                "file name must not contain path separators: {}",
                file_name
            )));
        }
        Ok(format!(
            "{}/{}-{}",
            self.upload_folder,
            Uuid::new_v4(),
            file_name
        ))
    }

    pub async fn issue(&self, file_name: &str) -> Result<String> {
        let key = self.upload_key(file_name)?;
        let url = self
            .signer
            .presign_put(&self.bucket, &key, UPLOAD_CONTENT_TYPE, self.expires_in)
            .await?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            expires_in = self.expires_in.as_secs(),
            "Issued upload URL"
        );
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockSigner {
        requests: Arc<Mutex<Vec<(String, String, String, Duration)>>>,
    }

    impl UploadUrlSigner for MockSigner {
        async fn presign_put(
            &self,
            bucket: &str,
            key: &str,
            content_type: &str,
            expires_in: Duration,
        ) -> Result<String> {
            self.requests.lock().await.push((
                bucket.to_string(),
                key.to_string(),
                content_type.to_string(),
                expires_in,
            ));
            Ok(format!("https://{}.s3.amazonaws.com/{}?X-Amz-Signature=abc", bucket, key))
        }
    }

    fn config() -> ImportConfig {
        ImportConfig {
            bucket_name: "import-bucket".to_string(),
            upload_folder: "uploaded".to_string(),
            copy_folder: "parsed".to_string(),
            signed_url_expires_in: 120,
            region: None,
            queue_url: None,
        }
    }

    #[tokio::test]
    async fn test_issue_signs_unique_key_under_upload_folder() {
        let signer = MockSigner::default();
        let issuer = UploadUrlIssuer::new(signer.clone(), &config());

        let first = issuer.issue("report.csv").await.unwrap();
        let second = issuer.issue("report.csv").await.unwrap();

        assert!(first.contains("/uploaded/"));
        assert!(first.ends_with("-report.csv?X-Amz-Signature=abc"));
        assert_ne!(first, second);

        let requests = signer.requests.lock().await;
        let (bucket, key, content_type, expires_in) = &requests[0];
        assert_eq!(bucket, "import-bucket");
        assert_eq!(content_type, "text/csv");
        assert_eq!(*expires_in, Duration::from_secs(120));

        let unique = key
            .strip_prefix("uploaded/")
            .and_then(|rest| rest.strip_suffix("-report.csv"))
            .unwrap();
        assert!(Uuid::parse_str(unique).is_ok());
    }

    #[tokio::test]
    async fn test_blank_or_nested_names_are_rejected() {
        let signer = MockSigner::default();
        let issuer = UploadUrlIssuer::new(signer.clone(), &config());

        for name in ["", "   ", "../report.csv", "a\\b.csv"] {
            let result = issuer.issue(name).await;
            assert!(
                matches!(result, Err(CatalogError::ValidationError { .. })),
                "{:?} should be rejected",
                name
            );
        }
        assert!(signer.requests.lock().await.is_empty());
    }
}
