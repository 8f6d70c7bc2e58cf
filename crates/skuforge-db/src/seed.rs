//! Seeding of the reference catalog from `config/catalog.yaml`.

use skuforge_core::catalog::CatalogFile;
use skuforge_core::slugify;
use sqlx::PgPool;

use crate::DbError;

/// Row counts processed by one seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub subcategories: usize,
    pub brands: usize,
}

/// Upsert the reference catalog into the database, keyed by slug.
///
/// All upserts run inside a single transaction; if any operation fails the
/// entire batch is rolled back. Re-running after a config edit updates
/// names and logos in place.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_catalog(pool: &PgPool, catalog: &CatalogFile) -> Result<SeedSummary, DbError> {
    let mut tx = pool.begin().await?;
    let mut summary = SeedSummary {
        categories: 0,
        subcategories: 0,
        brands: 0,
    };

    for category in &catalog.categories {
        let slug = slugify(&category.name);

        let category_id: i64 = sqlx::query_scalar(
            "INSERT INTO categories (name, slug) \
             VALUES ($1, $2) \
             ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id",
        )
        .bind(&category.name)
        .bind(&slug)
        .fetch_one(&mut *tx)
        .await?;
        summary.categories += 1;

        for subcategory in &category.subcategories {
            let sub_slug = slugify(subcategory);
            sqlx::query(
                "INSERT INTO subcategories (category_id, name, slug) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (slug) DO UPDATE SET \
                     name = EXCLUDED.name, \
                     category_id = EXCLUDED.category_id",
            )
            .bind(category_id)
            .bind(subcategory)
            .bind(&sub_slug)
            .execute(&mut *tx)
            .await?;
            summary.subcategories += 1;
        }
    }

    for brand in &catalog.brands {
        let slug = slugify(&brand.name);
        sqlx::query(
            "INSERT INTO brands (name, slug, logo_url) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (slug) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 logo_url = EXCLUDED.logo_url",
        )
        .bind(&brand.name)
        .bind(&slug)
        .bind(&brand.logo_url)
        .execute(&mut *tx)
        .await?;
        summary.brands += 1;
    }

    tx.commit().await?;
    Ok(summary)
}

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;
