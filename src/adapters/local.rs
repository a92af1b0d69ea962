use crate::domain::ports::{ObjectBody, ObjectStore, RecordQueue};
use crate::utils::error::{CatalogError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Object store over a directory tree: `<base>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    base_path: PathBuf,
}

impl LocalObjectStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(CatalogError::validation(format!(
                "object key escapes the bucket: {}",
                key
            )));
        }
        Ok(self.base_path.join(bucket).join(relative))
    }
}

fn not_found_or_io(err: std::io::Error, bucket: &str, key: &str) -> CatalogError {
    if err.kind() == ErrorKind::NotFound {
        CatalogError::not_found(format!("{}/{}", bucket, key))
    } else {
        CatalogError::IoError(err)
    }
}

impl ObjectStore for LocalObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectBody> {
        let path = self.object_path(bucket, key)?;
        let file = fs::File::open(&path)
            .await
            .map_err(|e| not_found_or_io(e, bucket, key))?;
        Ok(Box::pin(file))
    }

    async fn copy_object(&self, bucket: &str, source_key: &str, dest_key: &str) -> Result<()> {
        let source = self.object_path(bucket, source_key)?;
        let dest = self.object_path(bucket, dest_key)?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::copy(&source, &dest)
            .await
            .map_err(|e| not_found_or_io(e, bucket, source_key))?;
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        let path = self.object_path(bucket, key)?;
        fs::remove_file(&path)
            .await
            .map_err(|e| not_found_or_io(e, bucket, key))?;
        Ok(())
    }
}

/// Queue that writes each message to stdout as one line.
#[derive(Debug, Default)]
pub struct StdoutQueue;

impl StdoutQueue {
    pub fn new() -> Self {
        Self
    }
}

impl RecordQueue for StdoutQueue {
    async fn send(&self, body: String) -> Result<()> {
        println!("{}", body);
        Ok(())
    }
}
