use crate::core::product_service::ProductService;
use crate::utils::error::CatalogError;
use aws_lambda_events::event::sqs::SqsEvent;
use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Creates one product per queued message. Bad messages are skipped, upstream failures are
/// counted; neither stops the rest of the batch.
pub async fn catalog_batch_process(service: &ProductService, event: SqsEvent) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for message in event.records {
        let message_id = message.message_id.unwrap_or_default();
        let Some(body) = message.body else {
            tracing::warn!(message_id = %message_id, "Skipping message without a body");
            summary.skipped += 1;
            continue;
        };

        match service.create_from_message(&body).await {
            Ok(product) => {
                tracing::info!(message_id = %message_id, product_id = %product.id, "Imported product");
                summary.created += 1;
            }
            Err(e) if e.is_client_error() => {
                tracing::warn!(message_id = %message_id, error = %e, "Skipping invalid product message");
                summary.skipped += 1;
            }
            Err(e) => {
                log_failure(&message_id, &e);
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        created = summary.created,
        skipped = summary.skipped,
        failed = summary.failed,
        "Catalog batch processed"
    );
    summary
}

fn log_failure(message_id: &str, err: &CatalogError) {
    tracing::error!(message_id = %message_id, error = %err, category = ?err.category(), "Failed to import product");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProductRepository;
    use crate::domain::model::Product;
    use crate::domain::ports::ProductRepository;
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use aws_lambda_events::event::sqs::SqsMessage;
    use std::sync::Arc;

    fn message(id: &str, body: Option<&str>) -> SqsMessage {
        let mut message = SqsMessage::default();
        message.message_id = Some(id.to_string());
        message.body = body.map(str::to_string);
        message
    }

    fn event(messages: Vec<SqsMessage>) -> SqsEvent {
        let mut event = SqsEvent::default();
        event.records = messages;
        event
    }

    #[tokio::test]
    async fn test_each_message_is_handled_independently() {
        let repository = Arc::new(InMemoryProductRepository::new());
        let service = ProductService::new(repository.clone(), None);

        let summary = catalog_batch_process(
            &service,
            event(vec![
                message("1", Some(r#"{"title":"Rug","description":"Wool","price":"250","count":"4"}"#)),
                message("2", Some("{not json")),
                message("3", Some(r#"{"title":"","description":"","price":"1","count":"1"}"#)),
                message("4", None),
                message("5", Some(r#"{"title":"Mat","description":"Cotton","price":12.5,"count":2}"#)),
            ]),
        )
        .await;

        assert_eq!(
            summary,
            BatchSummary {
                created: 2,
                skipped: 3,
                failed: 0
            }
        );
        let titles: Vec<String> = repository
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Rug", "Mat"]);
    }

    struct FailingRepository;

    #[async_trait]
    impl ProductRepository for FailingRepository {
        async fn list(&self) -> Result<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: &str) -> Result<Option<Product>> {
            Ok(None)
        }

        async fn create(&self, _product: Product) -> Result<Product> {
            Err(CatalogError::upstream("DynamoDB", "ProvisionedThroughputExceededException"))
        }
    }

    #[tokio::test]
    async fn test_upstream_failure_is_counted_not_raised() {
        let service = ProductService::new(Arc::new(FailingRepository), None);

        let summary = catalog_batch_process(
            &service,
            event(vec![message(
                "1",
                Some(r#"{"title":"Rug","description":"Wool","price":1,"count":1}"#),
            )]),
        )
        .await;

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.created, 0);
    }
}
