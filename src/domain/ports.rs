use crate::domain::model::{NotificationAttribute, Product};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::io::AsyncRead;

/// Readable handle to a stored object's bytes.
pub type ObjectBody = Pin<Box<dyn AsyncRead + Send>>;

pub trait ObjectStore: Send + Sync {
    fn get_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> impl Future<Output = Result<ObjectBody>> + Send;

    fn copy_object(
        &self,
        bucket: &str,
        source_key: &str,
        dest_key: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    fn delete_object(&self, bucket: &str, key: &str) -> impl Future<Output = Result<()>> + Send;
}

pub trait RecordQueue: Send + Sync {
    fn send(&self, body: String) -> impl Future<Output = Result<()>> + Send;
}

pub trait UploadUrlSigner: Send + Sync {
    fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> impl Future<Output = Result<String>> + Send;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>>;
    async fn create(&self, product: Product) -> Result<Product>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, message: String, attributes: Vec<NotificationAttribute>)
        -> Result<()>;
}
