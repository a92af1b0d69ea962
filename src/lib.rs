pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod handlers;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliCommand, CliConfig};

pub use crate::config::lambda::{AuthConfig, CorsConfig, ImportConfig, ProductConfig};
pub use crate::core::{
    import_file_parser::ImportFileParser, product_service::ProductService,
    upload_url::UploadUrlIssuer,
};
pub use crate::utils::error::{CatalogError, Result};
