use std::collections::HashSet;

/// Generates the SKU keys for one product's variant rows.
///
/// A key is `P{product_id}` followed by each selected option name reduced
/// to its ASCII-alphanumeric characters (axis order preserved) and, when a
/// color is in play, the first three sanitized color characters uppercased,
/// all joined by `-`. Segments that sanitize away entirely are dropped.
///
/// Sanitization can collapse distinct combinations onto the same string
/// ("Red!" and "Red?" both become `RED`), so the generator remembers every
/// key it has issued and appends `-2`, `-3`, … until the key is unique
/// within the product. The `P{product_id}` prefix keeps keys from distinct
/// products disjoint; the UNIQUE column constraint is the final arbiter.
#[derive(Debug)]
pub struct SkuGenerator {
    prefix: String,
    issued: HashSet<String>,
}

impl SkuGenerator {
    #[must_use]
    pub fn new(product_id: i64) -> Self {
        SkuGenerator {
            prefix: format!("P{product_id}"),
            issued: HashSet::new(),
        }
    }

    /// Issue the key for one combination. Option names must be passed in
    /// axis order.
    pub fn generate(&mut self, option_names: &[&str], color_name: Option<&str>) -> String {
        let mut parts: Vec<String> = vec![self.prefix.clone()];
        parts.extend(
            option_names
                .iter()
                .map(|name| sanitize(name))
                .filter(|part| !part.is_empty()),
        );
        if let Some(color) = color_name {
            let code: String = sanitize(color).chars().take(3).collect();
            if !code.is_empty() {
                parts.push(code.to_uppercase());
            }
        }

        let base = parts.join("-");
        let mut sku = base.clone();
        let mut suffix = 2u32;
        while !self.issued.insert(sku.clone()) {
            sku = format!("{base}-{suffix}");
            suffix += 1;
        }
        sku
    }
}

fn sanitize(s: &str) -> String {
    s.chars().filter(char::is_ascii_alphanumeric).collect()
}
