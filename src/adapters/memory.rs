use crate::domain::model::Product;
use crate::domain::ports::ProductRepository;
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Repository kept entirely in process memory; contents are lost with the instance.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    pub fn with_sample_data() -> Self {
        Self::with_products(sample_products())
    }
}

pub fn sample_products() -> Vec<Product> {
    [
        ("f47ac10b-58cc-4372-a567-0e02b2c3d479", "Product 1", 10.99, 100),
        ("c9eb182b-1c3e-4c3b-8c3e-1c3e4c3b8c3e", "Product 2", 15.49, 200),
        ("a0eebc3e-1c3e-4c3b-8c3e-1c3e4c3b8c3e", "Product 3", 20.0, 150),
        ("d3c3b8c3-e1c3-4c3b-8c3e-1c3e4c3b8c3e", "Product 4", 25.75, 50),
    ]
    .into_iter()
    .map(|(id, title, price, count)| Product {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("Description for {}", title),
        price,
        count,
    })
    .collect()
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, product: Product) -> Result<Product> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.id == product.id) {
            return Err(CatalogError::validation(format!(
                "product {} already exists",
                product.id
            )));
        }
        products.push(product.clone());
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_data_lookup() {
        let repository = InMemoryProductRepository::with_sample_data();

        assert_eq!(repository.list().await.unwrap().len(), 4);

        let product = repository
            .find_by_id("c9eb182b-1c3e-4c3b-8c3e-1c3e4c3b8c3e")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.title, "Product 2");
        assert_eq!(product.count, 200);

        assert!(repository.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let repository = InMemoryProductRepository::new();
        let product = sample_products().remove(0);

        repository.create(product.clone()).await.unwrap();
        assert!(repository.create(product).await.is_err());
        assert_eq!(repository.list().await.unwrap().len(), 1);
    }
}
