use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub count: u32,
}

impl Product {
    /// Assigns `id` to an already validated DTO.
    pub fn from_dto(id: String, dto: CreateProductDto) -> Self {
        Self {
            id,
            title: dto.title,
            description: dto.description,
            price: dto.price,
            count: dto.count as u32,
        }
    }
}

/// Payload accepted by product creation, on both the HTTP and the queue path.
///
/// `price` and `count` accept a JSON number or a numeric string, so rows forwarded
/// verbatim from a CSV import deserialize the same way as hand-written requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductDto {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "lenient_number")]
    pub price: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub count: f64,
}

impl Validate for CreateProductDto {
    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::validation("title cannot be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CatalogError::validation(format!(
                "price must be a non-negative number, got {}",
                self.price
            )));
        }
        if !self.count.is_finite() || self.count < 0.0 {
            return Err(CatalogError::validation(format!(
                "count must be a non-negative number, got {}",
                self.count
            )));
        }
        if self.count.fract() != 0.0 || self.count > u32::MAX as f64 {
            return Err(CatalogError::validation(format!(
                "count must be a whole number of items, got {}",
                self.count
            )));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected a number, got '{}'", text))),
    }
}

/// One CSV row of an import file, kept as text until product creation coerces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub count: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
}

/// Named attribute attached to a published notification, used by subscribers for filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationAttribute {
    pub name: String,
    pub value: AttributeValue,
}

impl NotificationAttribute {
    pub fn number(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value: AttributeValue::Number(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(title: &str, price: f64, count: f64) -> CreateProductDto {
        CreateProductDto {
            title: title.to_string(),
            description: "Hand woven".to_string(),
            price,
            count,
        }
    }

    #[test]
    fn test_dto_accepts_numbers_and_numeric_strings() {
        let from_numbers: CreateProductDto = serde_json::from_str(
            r#"{"title":"Rug","description":"Wool","price":10.99,"count":3}"#,
        )
        .unwrap();
        let from_strings: CreateProductDto = serde_json::from_str(
            r#"{"title":"Rug","description":"Wool","price":"10.99","count":" 3 "}"#,
        )
        .unwrap();

        assert_eq!(from_numbers, from_strings);
        assert_eq!(from_numbers.price, 10.99);
        assert_eq!(from_numbers.count, 3.0);
    }

    #[test]
    fn test_dto_rejects_non_numeric_text() {
        let result: std::result::Result<CreateProductDto, _> = serde_json::from_str(
            r#"{"title":"Rug","description":"Wool","price":"cheap","count":1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_dto_requires_description() {
        let result: std::result::Result<CreateProductDto, _> =
            serde_json::from_str(r#"{"title":"Rug","price":1,"count":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rules() {
        assert!(dto("Rug", 0.0, 0.0).validate().is_ok());
        assert!(dto("Rug", 250.0, 12.0).validate().is_ok());
        assert!(dto("", 1.0, 1.0).validate().is_err());
        assert!(dto("   ", 1.0, 1.0).validate().is_err());
        assert!(dto("Rug", -0.01, 1.0).validate().is_err());
        assert!(dto("Rug", 1.0, -1.0).validate().is_err());
        assert!(dto("Rug", 1.0, 1.5).validate().is_err());
        assert!(dto("Rug", f64::NAN, 1.0).validate().is_err());
        assert!(dto("Rug", 1.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_product_from_dto() {
        let product = Product::from_dto("id-1".to_string(), dto("Rug", 5.5, 7.0));
        assert_eq!(product.id, "id-1");
        assert_eq!(product.count, 7);
        assert_eq!(product.price, 5.5);
    }

    #[test]
    fn test_import_record_defaults_missing_fields() {
        let record: ImportRecord = serde_json::from_str(r#"{"title":"Rug"}"#).unwrap();
        assert_eq!(record.title, "Rug");
        assert!(record.count.is_empty());
    }
}
