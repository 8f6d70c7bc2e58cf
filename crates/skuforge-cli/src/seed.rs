//! `seed` command: load the catalog YAML and upsert the reference tables.

use std::path::Path;

pub(crate) async fn run_seed(catalog_path: &Path) -> anyhow::Result<()> {
    let catalog = skuforge_core::catalog::load_catalog(catalog_path)?;

    let pool = skuforge_db::connect_pool_from_env().await?;
    let applied = skuforge_db::run_migrations(&pool).await?;
    if applied > 0 {
        println!("applied {applied} pending migration(s)");
    }

    let summary = skuforge_db::seed_catalog(&pool, &catalog).await?;
    println!(
        "seeded {} categories, {} subcategories, {} brands from {}",
        summary.categories,
        summary.subcategories,
        summary.brands,
        catalog_path.display()
    );
    Ok(())
}
