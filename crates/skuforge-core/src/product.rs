use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a product at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Published,
    Scheduled,
}

impl ProductStatus {
    /// Parse the wire representation; returns `None` for anything that is
    /// not `draft`, `published`, or `scheduled`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ProductStatus::Draft),
            "published" => Some(ProductStatus::Published),
            "scheduled" => Some(ProductStatus::Scheduled),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Draft => write!(f, "draft"),
            ProductStatus::Published => write!(f, "published"),
            ProductStatus::Scheduled => write!(f, "scheduled"),
        }
    }
}

/// A product submission as it arrives on the wire, before validation.
///
/// `status` and `scheduled_at` are raw strings here; `validate_submission`
/// turns them into [`ProductStatus`] and `DateTime<Utc>` on the way to
/// [`NewProduct`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSubmission {
    pub name: String,
    pub description: String,
    pub category_id: i64,
    #[serde(default)]
    pub subcategory_id: Option<i64>,
    #[serde(default)]
    pub brand_id: Option<i64>,
    pub base_price: Decimal,
    #[serde(default)]
    pub crossing_price: Option<Decimal>,
    pub variant_types: Vec<VariantTypeInput>,
    #[serde(default)]
    pub color_variants: Vec<ColorVariantInput>,
    #[serde(default)]
    pub specifications: Vec<SpecificationGroup>,
    pub images: Vec<String>,
    pub status: String,
    #[serde(default)]
    pub scheduled_at: Option<String>,
}

/// One independent variant axis (e.g. "Storage") and its options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantTypeInput {
    pub type_name: String,
    pub options: Vec<VariantOptionInput>,
}

/// One value on an axis, carrying its price delta and stock count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantOptionInput {
    pub name: String,
    #[serde(default)]
    pub price_adjustment: Decimal,
    #[serde(default)]
    pub stock: i32,
}

/// An optional, price-neutral color with its own images and stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorVariantInput {
    pub color_name: String,
    #[serde(default)]
    pub color_code: Option<String>,
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: i32,
}

/// A named group of key/value specification rows, persisted as JSONB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificationGroup {
    pub group_name: String,
    pub details: Vec<SpecificationDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificationDetail {
    pub key: String,
    pub value: String,
}

/// A fully validated, normalized product ready for persistence.
///
/// Strings are trimmed, the status is typed, and `scheduled_at` is parsed.
/// Produced only by `validate_submission`; the orchestrator in
/// `skuforge-db` takes this as its input.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category_id: i64,
    pub subcategory_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub base_price: Decimal,
    pub crossing_price: Option<Decimal>,
    pub variant_types: Vec<NewVariantType>,
    pub color_variants: Vec<NewColorVariant>,
    pub specifications: Vec<SpecificationGroup>,
    pub images: Vec<String>,
    pub status: ProductStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewVariantType {
    pub type_name: String,
    pub options: Vec<NewVariantOption>,
}

#[derive(Debug, Clone)]
pub struct NewVariantOption {
    pub name: String,
    pub price_adjustment: Decimal,
    pub stock: i32,
}

#[derive(Debug, Clone)]
pub struct NewColorVariant {
    pub color_name: String,
    pub color_code: Option<String>,
    pub images: Vec<String>,
    pub stock: i32,
}
