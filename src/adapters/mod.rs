// Adapters layer: concrete implementations of the domain ports for AWS and for local runs.

pub mod dynamodb;
pub mod local;
pub mod memory;
pub mod s3;
pub mod sns;
pub mod sqs;

pub use dynamodb::DynamoProductRepository;
pub use local::{LocalObjectStore, StdoutQueue};
pub use memory::InMemoryProductRepository;
pub use s3::S3ObjectStore;
pub use sns::SnsNotifier;
pub use sqs::SqsRecordQueue;
