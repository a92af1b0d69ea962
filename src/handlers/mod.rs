// Presentation layer: translate Lambda events into service calls and service results into responses.

pub mod authorizer;
pub mod catalog_batch;
pub mod http;
pub mod import;
pub mod products;

pub use authorizer::basic_authorizer;
pub use catalog_batch::{catalog_batch_process, BatchSummary};
pub use import::{import_file_parser, import_products_file};
pub use products::{create_product, get_product_by_id, get_products};
