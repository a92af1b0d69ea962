use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{
    validate_folder_prefix, validate_non_empty_string, validate_range, validate_s3_bucket_name,
    validate_url, Validate,
};
use std::env;
use std::fmt;

const MAX_SIGNED_URL_EXPIRY_SECS: u64 = 604_800;

fn required<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| CatalogError::MissingConfigError {
            field: name.to_string(),
        })
}

fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub bucket_name: String,
    pub upload_folder: String,
    pub copy_folder: String,
    pub signed_url_expires_in: u64,
    pub region: Option<String>,
    pub queue_url: Option<String>,
}

impl ImportConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let expires_raw = optional(&lookup, "IMPORT_SERVICE_SIGNED_URL_EXPIRES_IN")
            .unwrap_or_else(|| "60".to_string());
        let signed_url_expires_in = expires_raw.trim().parse::<u64>().map_err(|_| {
            CatalogError::InvalidConfigValueError {
                field: "IMPORT_SERVICE_SIGNED_URL_EXPIRES_IN".to_string(),
                value: expires_raw.clone(),
                reason: "expected a whole number of seconds".to_string(),
            }
        })?;

        Ok(Self {
            bucket_name: required(&lookup, "IMPORT_SERVICE_S3_BUCKET_NAME")?,
            upload_folder: optional(&lookup, "IMPORT_SERVICE_S3_BUCKET_UPLOAD_FOLDER")
                .unwrap_or_else(|| "uploaded".to_string()),
            copy_folder: optional(&lookup, "IMPORT_SERVICE_S3_BUCKET_COPY_FOLDER")
                .unwrap_or_else(|| "parsed".to_string()),
            signed_url_expires_in,
            region: optional(&lookup, "IMPORT_SERVICE_S3_BUCKET_REGION"),
            queue_url: optional(&lookup, "SQS_QUEUE_URL"),
        })
    }

    /// The file parser cannot run without a destination queue; the URL issuer never needs one.
    pub fn require_queue_url(&self) -> Result<&str> {
        self.queue_url
            .as_deref()
            .ok_or_else(|| CatalogError::MissingConfigError {
                field: "SQS_QUEUE_URL".to_string(),
            })
    }
}

impl Validate for ImportConfig {
    fn validate(&self) -> Result<()> {
        validate_s3_bucket_name("IMPORT_SERVICE_S3_BUCKET_NAME", &self.bucket_name)?;
        validate_folder_prefix("IMPORT_SERVICE_S3_BUCKET_UPLOAD_FOLDER", &self.upload_folder)?;
        validate_folder_prefix("IMPORT_SERVICE_S3_BUCKET_COPY_FOLDER", &self.copy_folder)?;

        if self.upload_folder == self.copy_folder {
            return Err(CatalogError::InvalidConfigValueError {
                field: "IMPORT_SERVICE_S3_BUCKET_COPY_FOLDER".to_string(),
                value: self.copy_folder.clone(),
                reason: "copy folder must differ from the upload folder".to_string(),
            });
        }

        validate_range(
            "IMPORT_SERVICE_SIGNED_URL_EXPIRES_IN",
            self.signed_url_expires_in,
            1,
            MAX_SIGNED_URL_EXPIRY_SECS,
        )?;

        if let Some(queue_url) = &self.queue_url {
            validate_url("SQS_QUEUE_URL", queue_url)?;
        }

        tracing::info!(bucket = %self.bucket_name, "Import configuration validation passed");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    DynamoDb,
    Memory,
}

#[derive(Debug, Clone)]
pub struct ProductConfig {
    pub product_table: String,
    pub stock_table: String,
    pub topic_arn: Option<String>,
    pub data_source: DataSourceKind,
}

impl ProductConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_source = match optional(&lookup, "PRODUCT_DATA_SOURCE")
            .map(|value| value.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("dynamodb") => DataSourceKind::DynamoDb,
            Some("memory") => DataSourceKind::Memory,
            Some(other) => {
                return Err(CatalogError::InvalidConfigValueError {
                    field: "PRODUCT_DATA_SOURCE".to_string(),
                    value: other.to_string(),
                    reason: "expected 'dynamodb' or 'memory'".to_string(),
                })
            }
        };

        Ok(Self {
            product_table: optional(&lookup, "PRODUCT_TABLE_NAME")
                .unwrap_or_else(|| "products".to_string()),
            stock_table: optional(&lookup, "STOCK_TABLE_NAME")
                .unwrap_or_else(|| "stocks".to_string()),
            topic_arn: optional(&lookup, "CREATE_PRODUCT_TOPIC_ARN"),
            data_source,
        })
    }
}

impl Validate for ProductConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("PRODUCT_TABLE_NAME", &self.product_table)?;
        validate_non_empty_string("STOCK_TABLE_NAME", &self.stock_table)?;

        if self.product_table == self.stock_table {
            return Err(CatalogError::InvalidConfigValueError {
                field: "STOCK_TABLE_NAME".to_string(),
                value: self.stock_table.clone(),
                reason: "stock table must differ from the product table".to_string(),
            });
        }

        if let Some(arn) = &self.topic_arn {
            if !arn.starts_with("arn:") {
                return Err(CatalogError::InvalidConfigValueError {
                    field: "CREATE_PRODUCT_TOPIC_ARN".to_string(),
                    value: arn.clone(),
                    reason: "expected an ARN".to_string(),
                });
            }
        }

        tracing::info!(data_source = ?self.data_source, "Product configuration validation passed");
        Ok(())
    }
}

#[derive(Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            username: required(&lookup, "BASIC_AUTH_USERNAME")?,
            password: required(&lookup, "BASIC_AUTH_PASSWORD")?,
        })
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<()> {
        // Tokens are split at the first ':', so such a username could never authenticate.
        if self.username.contains(':') {
            return Err(CatalogError::InvalidConfigValueError {
                field: "BASIC_AUTH_USERNAME".to_string(),
                value: self.username.clone(),
                reason: "username must not contain ':'".to_string(),
            });
        }

        tracing::info!(username = %self.username, "Authorizer configuration validation passed");
        Ok(())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "*".to_string(),
        }
    }
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        optional(&lookup, "ALLOWED_ORIGINS")
            .and_then(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .find(|origin| !origin.is_empty())
                    .map(str::to_string)
            })
            .map(|allowed_origin| Self { allowed_origin })
            .unwrap_or_default()
    }
}
