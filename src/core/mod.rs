pub mod authorizer;
pub mod csv_records;
pub mod import_file_parser;
pub mod product_service;
pub mod upload_url;

pub use crate::domain::model::{CreateProductDto, ImportRecord, Product};
pub use crate::domain::ports::{ObjectStore, ProductRepository, RecordQueue};
pub use crate::utils::error::Result;
