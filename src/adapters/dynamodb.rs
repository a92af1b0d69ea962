use crate::domain::model::Product;
use crate::domain::ports::ProductRepository;
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, Put, TransactWriteItem};
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::HashMap;

type Item = HashMap<String, AttributeValue>;

/// Products and their stock counts live in two tables joined by id at read time.
/// Writes go through one transaction so a product never exists without its stock row.
#[derive(Debug, Clone)]
pub struct DynamoProductRepository {
    client: DynamoClient,
    product_table: String,
    stock_table: String,
}

impl DynamoProductRepository {
    pub fn new(client: DynamoClient, product_table: String, stock_table: String) -> Self {
        Self {
            client,
            product_table,
            stock_table,
        }
    }

    async fn scan_all(&self, table: &str) -> Result<Vec<Item>> {
        self.client
            .scan()
            .table_name(table)
            .into_paginator()
            .items()
            .send()
            .collect::<std::result::Result<Vec<_>, _>>()
            .await
            .map_err(|err| CatalogError::upstream("DynamoDB", DisplayErrorContext(err)))
    }
}

fn string_attr(item: &Item, name: &str) -> Result<String> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .cloned()
        .ok_or_else(|| CatalogError::DecodeError {
            message: format!("missing string attribute '{}'", name),
        })
}

fn number_attr(item: &Item, name: &str) -> Result<f64> {
    let raw = item
        .get(name)
        .and_then(|value| value.as_n().ok())
        .ok_or_else(|| CatalogError::DecodeError {
            message: format!("missing number attribute '{}'", name),
        })?;
    raw.parse::<f64>().map_err(|_| CatalogError::DecodeError {
        message: format!("attribute '{}' is not a number: {}", name, raw),
    })
}

fn product_item(product: &Product) -> Item {
    HashMap::from([
        ("id".to_string(), AttributeValue::S(product.id.clone())),
        ("title".to_string(), AttributeValue::S(product.title.clone())),
        (
            "description".to_string(),
            AttributeValue::S(product.description.clone()),
        ),
        ("price".to_string(), AttributeValue::N(product.price.to_string())),
    ])
}

fn stock_item(product: &Product) -> Item {
    HashMap::from([
        ("product_id".to_string(), AttributeValue::S(product.id.clone())),
        ("count".to_string(), AttributeValue::N(product.count.to_string())),
    ])
}

/// Decodes a product row; the count comes from the stock table and starts at zero.
fn product_from_item(item: &Item) -> Result<Product> {
    Ok(Product {
        id: string_attr(item, "id")?,
        title: string_attr(item, "title")?,
        description: item
            .get("description")
            .and_then(|value| value.as_s().ok())
            .cloned()
            .unwrap_or_default(),
        price: number_attr(item, "price")?,
        count: 0,
    })
}

fn stock_from_item(item: &Item) -> Result<(String, u32)> {
    let product_id = string_attr(item, "product_id")?;
    let count = number_attr(item, "count")?;
    if count < 0.0 || count.fract() != 0.0 || count > u32::MAX as f64 {
        return Err(CatalogError::DecodeError {
            message: format!("stock count for {} is out of range: {}", product_id, count),
        });
    }
    Ok((product_id, count as u32))
}

/// A stock row that fails to decode is logged and ignored, leaving that product at zero.
fn lenient_stock(item: &Item) -> Option<(String, u32)> {
    match stock_from_item(item) {
        Ok(stock) => Some(stock),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring undecodable stock row");
            None
        }
    }
}

/// Joins product rows with stock rows by id; products without stock count as zero.
fn join_stock(product_items: &[Item], stock_items: &[Item]) -> Result<Vec<Product>> {
    let stock: HashMap<String, u32> = stock_items.iter().filter_map(lenient_stock).collect();

    product_items
        .iter()
        .map(|item| {
            let mut product = product_from_item(item)?;
            product.count = stock.get(&product.id).copied().unwrap_or(0);
            Ok(product)
        })
        .collect()
}

/// Both puts of a product creation; committed together or not at all.
fn transact_items(
    product_table: &str,
    stock_table: &str,
    product: &Product,
) -> Result<Vec<TransactWriteItem>> {
    let product_put = Put::builder()
        .table_name(product_table)
        .set_item(Some(product_item(product)))
        .condition_expression("attribute_not_exists(id)")
        .build()
        .map_err(|e| CatalogError::upstream("DynamoDB", e))?;

    let stock_put = Put::builder()
        .table_name(stock_table)
        .set_item(Some(stock_item(product)))
        .build()
        .map_err(|e| CatalogError::upstream("DynamoDB", e))?;

    Ok(vec![
        TransactWriteItem::builder().put(product_put).build(),
        TransactWriteItem::builder().put(stock_put).build(),
    ])
}

#[async_trait]
impl ProductRepository for DynamoProductRepository {
    async fn list(&self) -> Result<Vec<Product>> {
        let product_items = self.scan_all(&self.product_table).await?;
        if product_items.is_empty() {
            return Ok(Vec::new());
        }

        let stock_items = self.scan_all(&self.stock_table).await?;
        tracing::debug!(
            products = product_items.len(),
            stocks = stock_items.len(),
            "Joining product and stock rows"
        );

        join_stock(&product_items, &stock_items)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let product_output = self
            .client
            .get_item()
            .table_name(&self.product_table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|err| CatalogError::upstream("DynamoDB", DisplayErrorContext(err)))?;

        let Some(item) = product_output.item() else {
            return Ok(None);
        };
        let mut product = product_from_item(item)?;

        let stock_output = self
            .client
            .get_item()
            .table_name(&self.stock_table)
            .key("product_id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|err| CatalogError::upstream("DynamoDB", DisplayErrorContext(err)))?;

        product.count = stock_output
            .item()
            .and_then(lenient_stock)
            .map_or(0, |(_, count)| count);
        Ok(Some(product))
    }

    async fn create(&self, product: Product) -> Result<Product> {
        let items = transact_items(&self.product_table, &self.stock_table, &product)?;

        self.client
            .transact_write_items()
            .set_transact_items(Some(items))
            .send()
            .await
            .map_err(|err| CatalogError::upstream("DynamoDB", DisplayErrorContext(err)))?;

        tracing::debug!(product_id = %product.id, "Product and stock written in one transaction");
        Ok(product)
    }
}
