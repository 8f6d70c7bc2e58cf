use super::*;
use crate::catalog::{list_brands, list_categories, list_subcategories};
use skuforge_core::catalog::{BrandConfig, CategoryConfig};

fn sample_catalog() -> CatalogFile {
    CatalogFile {
        categories: vec![
            CategoryConfig {
                name: "Smartphones".into(),
                subcategories: vec!["Android Phones".into(), "iPhones".into()],
            },
            CategoryConfig {
                name: "Audio".into(),
                subcategories: vec!["Headphones".into()],
            },
        ],
        brands: vec![
            BrandConfig {
                name: "Samsung".into(),
                logo_url: Some("https://cdn.example.com/logos/samsung.svg".into()),
            },
            BrandConfig {
                name: "Anker".into(),
                logo_url: None,
            },
        ],
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn seed_inserts_every_catalog_entry(pool: PgPool) {
    let summary = seed_catalog(&pool, &sample_catalog())
        .await
        .expect("seed_catalog failed");

    assert_eq!(
        summary,
        SeedSummary {
            categories: 2,
            subcategories: 3,
            brands: 2,
        }
    );

    let categories = list_categories(&pool).await.expect("list failed");
    assert_eq!(categories.len(), 2);
    let brands = list_brands(&pool).await.expect("list failed");
    assert_eq!(brands.len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn reseeding_does_not_duplicate_rows(pool: PgPool) {
    let catalog = sample_catalog();
    seed_catalog(&pool, &catalog).await.expect("first seed");
    seed_catalog(&pool, &catalog).await.expect("second seed");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 2, "categories must be keyed by slug");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subcategories")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 3);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn reseeding_updates_names_and_logos_in_place(pool: PgPool) {
    let mut catalog = sample_catalog();
    seed_catalog(&pool, &catalog).await.expect("first seed");

    // Same slugs, edited display name and logo.
    catalog.categories[1].name = "AUDIO".into();
    catalog.brands[1].logo_url = Some("https://cdn.example.com/logos/anker.svg".into());
    seed_catalog(&pool, &catalog).await.expect("second seed");

    let name: String = sqlx::query_scalar("SELECT name FROM categories WHERE slug = 'audio'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "AUDIO");

    let logo: Option<String> = sqlx::query_scalar("SELECT logo_url FROM brands WHERE slug = 'anker'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(
        logo.as_deref(),
        Some("https://cdn.example.com/logos/anker.svg")
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn listings_are_ordered_by_name(pool: PgPool) {
    seed_catalog(&pool, &sample_catalog())
        .await
        .expect("seed_catalog failed");

    let categories = list_categories(&pool).await.expect("list failed");
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Audio", "Smartphones"]);

    let brands = list_brands(&pool).await.expect("list failed");
    let names: Vec<&str> = brands.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Anker", "Samsung"]);
    assert!(brands[1].logo_url.is_some());
    assert!(brands[0].logo_url.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn subcategories_filter_by_parent_category(pool: PgPool) {
    seed_catalog(&pool, &sample_catalog())
        .await
        .expect("seed_catalog failed");

    let categories = list_categories(&pool).await.expect("list failed");
    let smartphones = categories
        .iter()
        .find(|c| c.slug == "smartphones")
        .expect("smartphones category should exist");
    let audio = categories
        .iter()
        .find(|c| c.slug == "audio")
        .expect("audio category should exist");

    let phone_subs = list_subcategories(&pool, smartphones.id)
        .await
        .expect("list failed");
    let names: Vec<&str> = phone_subs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Android Phones", "iPhones"]);

    let audio_subs = list_subcategories(&pool, audio.id)
        .await
        .expect("list failed");
    assert_eq!(audio_subs.len(), 1);
    assert_eq!(audio_subs[0].slug, "headphones");
}
