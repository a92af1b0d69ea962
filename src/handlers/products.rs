use crate::config::lambda::CorsConfig;
use crate::core::product_service::ProductService;
use crate::domain::model::CreateProductDto;
use crate::handlers::http::{internal_error, json_response, text_response};
use crate::utils::error::CatalogError;
use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, Request, RequestExt, Response};

pub const PRODUCT_ID_PARAM: &str = "productId";

pub async fn get_products(
    service: &ProductService,
    cors: &CorsConfig,
    _event: Request,
) -> Result<Response<Body>, Error> {
    match service.get_products().await {
        Ok(products) => json_response(cors, StatusCode::OK, &products),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list products");
            internal_error(cors)
        }
    }
}

pub async fn get_product_by_id(
    service: &ProductService,
    cors: &CorsConfig,
    event: Request,
) -> Result<Response<Body>, Error> {
    let params = event.path_parameters();
    let product_id = match params.first(PRODUCT_ID_PARAM).map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => return text_response(cors, StatusCode::BAD_REQUEST, "Product Id is not valid"),
    };

    match service.get_product_by_id(product_id).await {
        Ok(Some(product)) => json_response(cors, StatusCode::OK, &product),
        Ok(None) => {
            tracing::info!(product_id, "Product not found");
            text_response(cors, StatusCode::NOT_FOUND, "Product not found")
        }
        Err(e) => {
            tracing::error!(error = %e, product_id, "Failed to load product");
            internal_error(cors)
        }
    }
}

pub async fn create_product(
    service: &ProductService,
    cors: &CorsConfig,
    event: Request,
) -> Result<Response<Body>, Error> {
    let dto: CreateProductDto = match serde_json::from_slice(event.body().as_ref()) {
        Ok(dto) => dto,
        Err(e) => {
            tracing::info!(error = %e, "Rejected unparsable product payload");
            return text_response(cors, StatusCode::BAD_REQUEST, "Product is not valid");
        }
    };

    match service.create_product(dto).await {
        Ok(product) => json_response(cors, StatusCode::CREATED, &product),
        Err(e @ CatalogError::ValidationError { .. }) => {
            tracing::info!(error = %e, "Rejected invalid product");
            text_response(cors, StatusCode::BAD_REQUEST, "Product is not valid")
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create product");
            internal_error(cors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{sample_products, InMemoryProductRepository};
    use crate::domain::model::Product;
    use crate::domain::ports::ProductRepository;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct BrokenRepository;

    #[async_trait]
    impl ProductRepository for BrokenRepository {
        async fn list(&self) -> crate::utils::error::Result<Vec<Product>> {
            Err(CatalogError::upstream("DynamoDB", "ResourceNotFoundException: table missing"))
        }

        async fn find_by_id(&self, _id: &str) -> crate::utils::error::Result<Option<Product>> {
            Err(CatalogError::upstream("DynamoDB", "ResourceNotFoundException: table missing"))
        }

        async fn create(&self, _product: Product) -> crate::utils::error::Result<Product> {
            Err(CatalogError::upstream("DynamoDB", "TransactionCanceledException"))
        }
    }

    fn sample_service() -> ProductService {
        ProductService::new(Arc::new(InMemoryProductRepository::with_sample_data()), None)
    }

    fn broken_service() -> ProductService {
        ProductService::new(Arc::new(BrokenRepository), None)
    }

    fn request(body: Body) -> Request {
        lambda_http::http::Request::builder()
            .uri("/products")
            .body(body)
            .unwrap()
    }

    fn by_id(id: Option<&str>) -> Request {
        let params: HashMap<String, String> = id
            .map(|id| HashMap::from([(PRODUCT_ID_PARAM.to_string(), id.to_string())]))
            .unwrap_or_default();
        request(Body::Empty).with_path_parameters(params)
    }

    fn text(response: &Response<Body>) -> String {
        match response.body() {
            Body::Text(text) => text.clone(),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_products_lists_everything() {
        let cors = CorsConfig::default();
        let response = get_products(&sample_service(), &cors, request(Body::Empty))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let products: Vec<Product> = serde_json::from_str(&text(&response)).unwrap();
        assert_eq!(products, sample_products());
    }

    #[tokio::test]
    async fn test_get_product_by_id_statuses() {
        let cors = CorsConfig::default();
        let service = sample_service();
        let known = sample_products()[0].clone();

        let found = get_product_by_id(&service, &cors, by_id(Some(&known.id))).await.unwrap();
        assert_eq!(found.status(), StatusCode::OK);
        assert_eq!(serde_json::from_str::<Product>(&text(&found)).unwrap(), known);

        let missing = get_product_by_id(&service, &cors, by_id(Some("missing"))).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(text(&missing), "Product not found");

        for id in [None, Some(""), Some("  ")] {
            let invalid = get_product_by_id(&service, &cors, by_id(id)).await.unwrap();
            assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
            assert_eq!(text(&invalid), "Product Id is not valid");
        }
    }

    #[tokio::test]
    async fn test_create_product_statuses() {
        let cors = CorsConfig::default();
        let service = ProductService::new(Arc::new(InMemoryProductRepository::new()), None);

        let created = create_product(
            &service,
            &cors,
            request(Body::from(
                r#"{"title":"Rug","description":"Wool","price":250,"count":4}"#,
            )),
        )
        .await
        .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let product: Product = serde_json::from_str(&text(&created)).unwrap();
        assert_eq!(product.title, "Rug");
        assert_eq!(product.count, 4);

        for body in [
            "not json",
            r#"{"title":"Rug","price":1,"count":1}"#,
            r#"{"title":"","description":"Wool","price":1,"count":1}"#,
            r#"{"title":"Rug","description":"Wool","price":-1,"count":1}"#,
        ] {
            let rejected = create_product(&service, &cors, request(Body::from(body)))
                .await
                .unwrap();
            assert_eq!(rejected.status(), StatusCode::BAD_REQUEST, "{}", body);
            assert_eq!(text(&rejected), "Product is not valid");
        }

        assert_eq!(service.get_products().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failures_are_generic_500() {
        let cors = CorsConfig::default();
        let service = broken_service();

        let list = get_products(&service, &cors, request(Body::Empty)).await.unwrap();
        let lookup = get_product_by_id(&service, &cors, by_id(Some("abc"))).await.unwrap();
        let create = create_product(
            &service,
            &cors,
            request(Body::from(
                r#"{"title":"Rug","description":"Wool","price":1,"count":1}"#,
            )),
        )
        .await
        .unwrap();

        for response in [list, lookup, create] {
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(text(&response), "Internal server error");
        }
    }
}
