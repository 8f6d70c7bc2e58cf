//! Database operations for products and their variant tables.
//!
//! `create_product` is the write path: one transaction that persists the
//! product row, its axis and color rows, and the full cross-product of
//! combinations as `product_variants` rows. Everything else here is
//! read-back.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

use skuforge_core::product::{NewProduct, ProductStatus};
use skuforge_core::{
    cartesian_product, combination_count, final_price, final_stock, slugify, SkuGenerator,
};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category_id: i64,
    pub subcategory_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub base_price: Decimal,
    pub crossing_price: Option<Decimal>,
    pub images: Value,
    pub specifications: Option<Value>,
    pub status: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One product in the admin listing, with its materialized variant count.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductSummaryRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub status: String,
    pub base_price: Decimal,
    pub variant_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VariantTypeRow {
    pub id: i64,
    pub product_id: i64,
    pub type_name: String,
    pub position: i32,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VariantOptionRow {
    pub id: i64,
    pub variant_type_id: i64,
    pub name: String,
    pub price_adjustment: Decimal,
    pub stock: i32,
    pub position: i32,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ColorVariantRow {
    pub id: i64,
    pub product_id: i64,
    pub color_name: String,
    pub color_code: Option<String>,
    pub images: Value,
    pub stock: i32,
}

/// One materialized combination. `variant_option_ids` is a JSON array of
/// `variant_options.id` values in axis order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductVariantRow {
    pub id: i64,
    pub product_id: i64,
    pub sku: String,
    pub variant_option_ids: Value,
    pub color_variant_id: Option<i64>,
    pub final_price: Decimal,
    pub stock: i32,
}

/// What `create_product` hands back on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedProduct {
    pub id: i64,
    pub slug: String,
    pub variant_count: usize,
}

/// One axis with its options, in declared order.
#[derive(Debug, Clone)]
pub struct ProductAxis {
    pub variant_type: VariantTypeRow,
    pub options: Vec<VariantOptionRow>,
}

/// A product with everything it owns, as returned by [`get_product_detail`].
#[derive(Debug, Clone)]
pub struct ProductDetail {
    pub product: ProductRow,
    pub axes: Vec<ProductAxis>,
    pub color_variants: Vec<ColorVariantRow>,
    pub variants: Vec<ProductVariantRow>,
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

// Option/color identities captured from RETURNING inside the transaction;
// they are not visible outside it until commit.
struct InsertedOption {
    id: i64,
    name: String,
    price_adjustment: Decimal,
    stock: i32,
}

struct InsertedColor {
    id: i64,
    name: String,
    stock: i32,
}

// Parallel columns for the UNNEST bulk insert of variant rows.
struct StagedVariants {
    skus: Vec<String>,
    option_ids: Vec<Value>,
    color_ids: Vec<Option<i64>>,
    prices: Vec<Decimal>,
    stocks: Vec<i32>,
}

impl StagedVariants {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            skus: Vec::with_capacity(capacity),
            option_ids: Vec::with_capacity(capacity),
            color_ids: Vec::with_capacity(capacity),
            prices: Vec::with_capacity(capacity),
            stocks: Vec::with_capacity(capacity),
        }
    }

    fn push(
        &mut self,
        sku: String,
        option_ids: Value,
        color_id: Option<i64>,
        price: Decimal,
        stock: i32,
    ) {
        self.skus.push(sku);
        self.option_ids.push(option_ids);
        self.color_ids.push(color_id);
        self.prices.push(price);
        self.stocks.push(stock);
    }

    fn len(&self) -> usize {
        self.skus.len()
    }

    fn is_empty(&self) -> bool {
        self.skus.is_empty()
    }
}

/// Persist a validated product and materialize the full cross-product of
/// its variant axes (times colors, when present) as priced, stocked,
/// SKU-keyed rows.
///
/// Runs as one transaction: product row, axis and option rows, color rows,
/// then a single bulk insert of every combination. Any failure rolls the
/// whole submission back; there is no partial product.
///
/// The combination count is checked against `max_variants` before the
/// transaction opens, so over-limit submissions never touch the database.
///
/// Slugs are derived from the name and suffixed `-2`, `-3`, … past existing
/// rows, so submitting the same payload twice creates two distinct
/// products.
///
/// # Errors
///
/// Returns [`DbError::TooManyVariants`] when the combination count exceeds
/// `max_variants`, or [`DbError::Sqlx`] if any statement fails.
pub async fn create_product(
    pool: &PgPool,
    product: &NewProduct,
    max_variants: u64,
) -> Result<CreatedProduct, DbError> {
    let axis_sizes: Vec<usize> = product
        .variant_types
        .iter()
        .map(|axis| axis.options.len())
        .collect();
    let requested = combination_count(&axis_sizes, product.color_variants.len());
    if requested > max_variants {
        return Err(DbError::TooManyVariants {
            requested,
            limit: max_variants,
        });
    }

    let mut tx = pool.begin().await?;

    let slug = next_free_slug(&mut tx, &slugify(&product.name)).await?;
    let published_at = (product.status == ProductStatus::Published).then(Utc::now);
    let specifications = (!product.specifications.is_empty()).then(|| Json(&product.specifications));

    let product_id: i64 = sqlx::query_scalar(
        "INSERT INTO products \
           (name, slug, description, category_id, subcategory_id, brand_id, \
            base_price, crossing_price, images, specifications, status, \
            scheduled_at, published_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
         RETURNING id",
    )
    .bind(&product.name)
    .bind(&slug)
    .bind(&product.description)
    .bind(product.category_id)
    .bind(product.subcategory_id)
    .bind(product.brand_id)
    .bind(product.base_price)
    .bind(product.crossing_price)
    .bind(Json(&product.images))
    .bind(specifications)
    .bind(product.status.to_string())
    .bind(product.scheduled_at)
    .bind(published_at)
    .fetch_one(&mut *tx)
    .await
    .map_err(classify_insert_error)?;

    let mut axes: Vec<Vec<InsertedOption>> = Vec::with_capacity(product.variant_types.len());
    for (position, axis) in product.variant_types.iter().enumerate() {
        let variant_type_id: i64 = sqlx::query_scalar(
            "INSERT INTO variant_types (product_id, type_name, position) \
             VALUES ($1, $2, $3) \
             RETURNING id",
        )
        .bind(product_id)
        .bind(&axis.type_name)
        .bind(position as i32)
        .fetch_one(&mut *tx)
        .await?;

        let mut inserted = Vec::with_capacity(axis.options.len());
        for (option_position, option) in axis.options.iter().enumerate() {
            let option_id: i64 = sqlx::query_scalar(
                "INSERT INTO variant_options \
                   (variant_type_id, name, price_adjustment, stock, position) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING id",
            )
            .bind(variant_type_id)
            .bind(&option.name)
            .bind(option.price_adjustment)
            .bind(option.stock)
            .bind(option_position as i32)
            .fetch_one(&mut *tx)
            .await?;
            inserted.push(InsertedOption {
                id: option_id,
                name: option.name.clone(),
                price_adjustment: option.price_adjustment,
                stock: option.stock,
            });
        }
        axes.push(inserted);
    }

    let mut colors: Vec<InsertedColor> = Vec::with_capacity(product.color_variants.len());
    for color in &product.color_variants {
        let color_id: i64 = sqlx::query_scalar(
            "INSERT INTO color_variants (product_id, color_name, color_code, images, stock) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(product_id)
        .bind(&color.color_name)
        .bind(&color.color_code)
        .bind(Json(&color.images))
        .bind(color.stock)
        .fetch_one(&mut *tx)
        .await?;
        colors.push(InsertedColor {
            id: color_id,
            name: color.color_name.clone(),
            stock: color.stock,
        });
    }

    let option_refs: Vec<Vec<&InsertedOption>> =
        axes.iter().map(|axis| axis.iter().collect()).collect();
    let tuples = cartesian_product(&option_refs);

    let mut generator = SkuGenerator::new(product_id);
    let mut staged = StagedVariants::with_capacity(tuples.len() * colors.len().max(1));
    for tuple in &tuples {
        let option_names: Vec<&str> = tuple.iter().map(|o| o.name.as_str()).collect();
        let adjustments: Vec<Decimal> = tuple.iter().map(|o| o.price_adjustment).collect();
        let stocks: Vec<i32> = tuple.iter().map(|o| o.stock).collect();
        let option_ids = Value::Array(tuple.iter().map(|o| Value::from(o.id)).collect());
        let price = final_price(product.base_price, &adjustments);

        if colors.is_empty() {
            staged.push(
                generator.generate(&option_names, None),
                option_ids,
                None,
                price,
                final_stock(&stocks, None),
            );
        } else {
            for color in &colors {
                staged.push(
                    generator.generate(&option_names, Some(&color.name)),
                    option_ids.clone(),
                    Some(color.id),
                    price,
                    final_stock(&stocks, Some(color.stock)),
                );
            }
        }
    }

    if !staged.is_empty() {
        sqlx::query(
            "INSERT INTO product_variants \
               (product_id, sku, variant_option_ids, color_variant_id, final_price, stock) \
             SELECT $1, * FROM UNNEST(\
                  $2::text[], $3::jsonb[], $4::bigint[], $5::numeric[], $6::int[])",
        )
        .bind(product_id)
        .bind(&staged.skus)
        .bind(&staged.option_ids)
        .bind(&staged.color_ids)
        .bind(&staged.prices)
        .bind(&staged.stocks)
        .execute(&mut *tx)
        .await
        .map_err(classify_insert_error)?;
    }

    tx.commit().await?;

    Ok(CreatedProduct {
        id: product_id,
        slug,
        variant_count: staged.len(),
    })
}

// A 23505 on the slug or sku constraint means a concurrent submission
// claimed the key between our reads and this insert.
fn classify_insert_error(error: sqlx::Error) -> DbError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.code().as_deref() == Some("23505") {
            return DbError::UniqueViolation {
                constraint: db_error.constraint().unwrap_or("unknown").to_string(),
            };
        }
    }
    DbError::Sqlx(error)
}

// products.slug is VARCHAR(500); the base is capped below that so the
// `-{n}` suffix of a repeat submission still fits.
const SLUG_BASE_MAX_LEN: usize = 490;

/// Find the first unclaimed slug in `base`, `base-2`, `base-3`, …
///
/// Slugs only contain `[a-z0-9-]`, so interpolating `base` into the LIKE
/// pattern is safe and truncation never splits a character.
async fn next_free_slug(
    tx: &mut Transaction<'_, Postgres>,
    base: &str,
) -> Result<String, DbError> {
    let base = if base.len() > SLUG_BASE_MAX_LEN {
        base[..SLUG_BASE_MAX_LEN].trim_end_matches('-')
    } else {
        base
    };

    let existing: Vec<String> = sqlx::query_scalar::<_, String>(
        "SELECT slug FROM products WHERE slug = $1 OR slug LIKE $1 || '-%'",
    )
    .bind(base)
    .fetch_all(&mut **tx)
    .await?;

    if !existing.iter().any(|slug| slug == base) {
        return Ok(base.to_string());
    }

    let taken: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let mut n = 2u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.contains(candidate.as_str()) {
            return Ok(candidate);
        }
        n += 1;
    }
}

// ---------------------------------------------------------------------------
// Read-back
// ---------------------------------------------------------------------------

/// Returns the newest products first, with their variant counts.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_products(pool: &PgPool, limit: i64) -> Result<Vec<ProductSummaryRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductSummaryRow>(
        "SELECT p.id, p.name, p.slug, p.status, p.base_price, \
                COUNT(v.id) AS variant_count, p.created_at \
         FROM products p \
         LEFT JOIN product_variants v ON v.product_id = p.id \
         GROUP BY p.id \
         ORDER BY p.created_at DESC, p.id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns one product with its axes, colors, and materialized variants,
/// or `None` if the id is unknown.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any query fails.
pub async fn get_product_detail(
    pool: &PgPool,
    product_id: i64,
) -> Result<Option<ProductDetail>, DbError> {
    let product = sqlx::query_as::<_, ProductRow>(
        "SELECT id, name, slug, description, category_id, subcategory_id, brand_id, \
                base_price, crossing_price, images, specifications, status, \
                scheduled_at, published_at, created_at, updated_at \
         FROM products \
         WHERE id = $1",
    )
    .bind(product_id)
    .fetch_optional(pool)
    .await?;

    let Some(product) = product else {
        return Ok(None);
    };

    let type_rows = sqlx::query_as::<_, VariantTypeRow>(
        "SELECT id, product_id, type_name, position \
         FROM variant_types \
         WHERE product_id = $1 \
         ORDER BY position, id",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    let type_ids: Vec<i64> = type_rows.iter().map(|row| row.id).collect();
    let option_rows = sqlx::query_as::<_, VariantOptionRow>(
        "SELECT id, variant_type_id, name, price_adjustment, stock, position \
         FROM variant_options \
         WHERE variant_type_id = ANY($1) \
         ORDER BY variant_type_id, position, id",
    )
    .bind(&type_ids)
    .fetch_all(pool)
    .await?;

    let mut options_by_type: HashMap<i64, Vec<VariantOptionRow>> = HashMap::new();
    for option in option_rows {
        options_by_type
            .entry(option.variant_type_id)
            .or_default()
            .push(option);
    }
    let axes = type_rows
        .into_iter()
        .map(|variant_type| {
            let options = options_by_type.remove(&variant_type.id).unwrap_or_default();
            ProductAxis {
                variant_type,
                options,
            }
        })
        .collect();

    let color_variants = sqlx::query_as::<_, ColorVariantRow>(
        "SELECT id, product_id, color_name, color_code, images, stock \
         FROM color_variants \
         WHERE product_id = $1 \
         ORDER BY id",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    let variants = sqlx::query_as::<_, ProductVariantRow>(
        "SELECT id, product_id, sku, variant_option_ids, color_variant_id, final_price, stock \
         FROM product_variants \
         WHERE product_id = $1 \
         ORDER BY id",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(Some(ProductDetail {
        product,
        axes,
        color_variants,
        variants,
    }))
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
