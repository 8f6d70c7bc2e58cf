use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::slug::slugify;
use crate::ConfigError;

/// One category and its subcategories as declared in the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandConfig {
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// The `config/catalog.yaml` document: reference data that products point
/// at by id after seeding.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub categories: Vec<CategoryConfig>,
    pub brands: Vec<BrandConfig>,
}

/// Load and validate the reference catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_catalog(path: &Path) -> Result<CatalogFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: CatalogFile = serde_yaml::from_str(&content)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &CatalogFile) -> Result<(), ConfigError> {
    let mut seen_category_slugs = HashSet::new();
    let mut seen_subcategory_slugs = HashSet::new();
    let mut seen_brand_slugs = HashSet::new();

    for category in &catalog.categories {
        if category.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }
        let slug = slugify(&category.name);
        if !seen_category_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category slug: '{}' (from category '{}')",
                slug, category.name
            )));
        }

        for subcategory in &category.subcategories {
            if subcategory.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "subcategory of '{}' must be non-empty",
                    category.name
                )));
            }
            let slug = slugify(subcategory);
            if !seen_subcategory_slugs.insert(slug.clone()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate subcategory slug: '{slug}' (from subcategory '{subcategory}')"
                )));
            }
        }
    }

    for brand in &catalog.brands {
        if brand.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand name must be non-empty".to_string(),
            ));
        }
        let slug = slugify(&brand.name);
        if !seen_brand_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand slug: '{}' (from brand '{}')",
                slug, brand.name
            )));
        }
    }

    Ok(())
}
