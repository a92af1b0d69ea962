//! Composition root: builds configured services for each Lambda entry point.

use crate::adapters::{
    DynamoProductRepository, InMemoryProductRepository, S3ObjectStore, SnsNotifier,
    SqsRecordQueue,
};
use crate::config::lambda::{DataSourceKind, ImportConfig, ProductConfig};
use crate::core::import_file_parser::ImportFileParser;
use crate::core::product_service::ProductService;
use crate::core::upload_url::UploadUrlIssuer;
use crate::domain::ports::{Notifier, ProductRepository};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::sync::Arc;

pub async fn load_aws_config(region: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }
    loader.load().await
}

pub async fn s3_client(config: &ImportConfig) -> aws_sdk_s3::Client {
    let sdk_config = load_aws_config(config.region.as_deref()).await;
    aws_sdk_s3::Client::new(&sdk_config)
}

pub async fn product_service_from_env() -> Result<ProductService> {
    let config = ProductConfig::from_env()?;
    config.validate()?;
    product_service(&config).await
}

pub async fn product_service(config: &ProductConfig) -> Result<ProductService> {
    let needs_aws = config.data_source == DataSourceKind::DynamoDb || config.topic_arn.is_some();
    let sdk_config = if needs_aws {
        Some(load_aws_config(None).await)
    } else {
        None
    };

    let repository: Arc<dyn ProductRepository> = match (&config.data_source, &sdk_config) {
        (DataSourceKind::DynamoDb, Some(sdk_config)) => Arc::new(DynamoProductRepository::new(
            aws_sdk_dynamodb::Client::new(sdk_config),
            config.product_table.clone(),
            config.stock_table.clone(),
        )),
        _ => {
            tracing::info!("Serving products from the in-memory sample data source");
            Arc::new(InMemoryProductRepository::with_sample_data())
        }
    };

    let notifier: Option<Arc<dyn Notifier>> = match (&config.topic_arn, &sdk_config) {
        (Some(topic_arn), Some(sdk_config)) => Some(Arc::new(SnsNotifier::new(
            aws_sdk_sns::Client::new(sdk_config),
            topic_arn.clone(),
        ))),
        _ => None,
    };

    tracing::info!(
        data_source = ?config.data_source,
        notifications = notifier.is_some(),
        "Product service configured"
    );
    Ok(ProductService::new(repository, notifier))
}

pub async fn import_file_parser_from_env() -> Result<ImportFileParser<S3ObjectStore, SqsRecordQueue>> {
    let config = ImportConfig::from_env()?;
    config.validate()?;
    let queue_url = config.require_queue_url()?.to_string();

    let sdk_config = load_aws_config(config.region.as_deref()).await;
    let store = S3ObjectStore::new(aws_sdk_s3::Client::new(&sdk_config));
    let queue = SqsRecordQueue::new(aws_sdk_sqs::Client::new(&sdk_config), queue_url);

    Ok(ImportFileParser::new(store, queue, &config))
}

pub async fn upload_url_issuer_from_env() -> Result<UploadUrlIssuer<S3ObjectStore>> {
    let config = ImportConfig::from_env()?;
    config.validate()?;

    let store = S3ObjectStore::new(s3_client(&config).await);
    Ok(UploadUrlIssuer::new(store, &config))
}
