//! `show` and `list` commands: read-only product inspection.

pub(crate) async fn run_show(product_id: i64) -> anyhow::Result<()> {
    let pool = skuforge_db::connect_pool_from_env().await?;
    let detail = skuforge_db::get_product_detail(&pool, product_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("product {product_id} not found"))?;

    let product = &detail.product;
    println!("{} (#{}) [{}]", product.name, product.id, product.status);
    println!("  slug:       {}", product.slug);
    println!("  base price: {}", product.base_price);
    if let Some(crossing) = product.crossing_price {
        println!("  crossing:   {crossing}");
    }

    for axis in &detail.axes {
        let options: Vec<String> = axis
            .options
            .iter()
            .map(|o| {
                let sign = if o.price_adjustment.is_sign_negative() {
                    ""
                } else {
                    "+"
                };
                format!("{} ({sign}{}, stock {})", o.name, o.price_adjustment, o.stock)
            })
            .collect();
        println!("  {}: {}", axis.variant_type.type_name, options.join(", "));
    }

    if !detail.color_variants.is_empty() {
        let colors: Vec<String> = detail
            .color_variants
            .iter()
            .map(|c| format!("{} (stock {})", c.color_name, c.stock))
            .collect();
        println!("  Colors: {}", colors.join(", "));
    }

    println!("  {} variant(s):", detail.variants.len());
    for variant in &detail.variants {
        println!(
            "    {:<32} {:>10}  stock {}",
            variant.sku,
            variant.final_price.to_string(),
            variant.stock
        );
    }
    Ok(())
}

pub(crate) async fn run_list(limit: i64) -> anyhow::Result<()> {
    let pool = skuforge_db::connect_pool_from_env().await?;
    let rows = skuforge_db::list_products(&pool, limit).await?;

    if rows.is_empty() {
        println!("no products yet");
        return Ok(());
    }

    for row in rows {
        println!(
            "#{:<6} {:<40} {:<10} {:>10}  {} variant(s)",
            row.id,
            row.name,
            row.status,
            row.base_price.to_string(),
            row.variant_count
        );
    }
    Ok(())
}
