use crate::domain::model::CreateProductDto;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Product catalog seed data, loaded from a TOML file by the `seed` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedFile {
    pub seed: Option<SeedInfo>,
    #[serde(default)]
    pub products: Vec<CreateProductDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedInfo {
    pub name: String,
    pub description: Option<String>,
}

impl SeedFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CatalogError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn name(&self) -> &str {
        self.seed.as_ref().map(|s| s.name.as_str()).unwrap_or("unnamed")
    }
}

impl Validate for SeedFile {
    fn validate(&self) -> Result<()> {
        if self.products.is_empty() {
            return Err(CatalogError::ConfigError {
                message: "seed file contains no [[products]]".to_string(),
            });
        }

        for (index, product) in self.products.iter().enumerate() {
            product.validate().map_err(|e| CatalogError::InvalidConfigValueError {
                field: format!("products[{}]", index),
                value: product.title.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}
