//! `create` command: validate a JSON submission and run the product
//! creation transaction.

use std::path::Path;

use skuforge_core::{combination_count, validate_submission, ProductSubmission};

const DEFAULT_MAX_VARIANTS: u64 = 500;

pub(crate) async fn run_create(file: &Path, dry_run: bool) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
    let submission: ProductSubmission = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("{} is not a valid submission: {e}", file.display()))?;

    let product = match validate_submission(&submission) {
        Ok(product) => product,
        Err(errors) => {
            for violation in &errors.violations {
                eprintln!("  {}: {}", violation.field, violation.message);
            }
            anyhow::bail!(
                "submission failed validation with {} violation(s)",
                errors.violations.len()
            );
        }
    };

    let axis_sizes: Vec<usize> = product
        .variant_types
        .iter()
        .map(|axis| axis.options.len())
        .collect();
    let combinations = combination_count(&axis_sizes, product.color_variants.len());

    if dry_run {
        println!(
            "'{}' validates; {} axes x {} colors would materialize {} variant(s)",
            product.name,
            product.variant_types.len(),
            product.color_variants.len(),
            combinations
        );
        return Ok(());
    }

    let max_variants = std::env::var("SKUFORGE_MAX_VARIANTS_PER_PRODUCT")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_VARIANTS);

    let pool = skuforge_db::connect_pool_from_env().await?;
    let created = skuforge_db::create_product(&pool, &product, max_variants).await?;
    println!(
        "created product {} (slug '{}') with {} variant(s)",
        created.id, created.slug, created.variant_count
    );
    Ok(())
}
