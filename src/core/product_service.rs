use crate::domain::model::{CreateProductDto, NotificationAttribute, Product};
use crate::domain::ports::{Notifier, ProductRepository};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use std::sync::Arc;
use uuid::Uuid;

/// Message attribute subscribers filter on to route by inventory level.
pub const COUNT_ATTRIBUTE: &str = "count";

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>, notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub async fn get_products(&self) -> Result<Vec<Product>> {
        let products = self.repository.list().await?;
        tracing::debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    pub async fn get_product_by_id(&self, id: &str) -> Result<Option<Product>> {
        self.repository.find_by_id(id).await
    }

    #[tracing::instrument(skip_all, fields(title = %dto.title))]
    pub async fn create_product(&self, dto: CreateProductDto) -> Result<Product> {
        dto.validate()?;

        let product = Product::from_dto(Uuid::new_v4().to_string(), dto);
        let product = self.repository.create(product).await?;
        tracing::info!(product_id = %product.id, count = product.count, "Created product");

        if let Some(notifier) = &self.notifier {
            if let Err(e) = self.notify_created(notifier.as_ref(), &product).await {
                tracing::warn!(
                    error = %e,
                    product_id = %product.id,
                    "Product created but the notification was not published"
                );
            }
        }

        Ok(product)
    }

    /// Queue path: the body is a JSON product payload, typically a forwarded CSV row.
    pub async fn create_from_message(&self, body: &str) -> Result<Product> {
        let dto: CreateProductDto = serde_json::from_str(body)
            .map_err(|e| CatalogError::malformed_event(format!("invalid product message: {}", e)))?;
        self.create_product(dto).await
    }

    async fn notify_created(&self, notifier: &dyn Notifier, product: &Product) -> Result<()> {
        let message = serde_json::to_string(product)?;
        notifier
            .publish(
                message,
                vec![NotificationAttribute::number(
                    COUNT_ATTRIBUTE,
                    f64::from(product.count),
                )],
            )
            .await
    }
}
