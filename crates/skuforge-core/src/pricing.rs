use rust_decimal::Decimal;

/// Price of one combination: the base price plus every selected option's
/// adjustment. Adjustments may be negative; no rounding is applied.
#[must_use]
pub fn final_price(base: Decimal, adjustments: &[Decimal]) -> Decimal {
    adjustments.iter().fold(base, |acc, adj| acc + adj)
}

/// Stock ceiling of one combination: the minimum across the selected
/// options' stocks and, when a color is in play, the color's stock. Zero
/// is a valid result; out-of-stock combinations still become rows.
#[must_use]
pub fn final_stock(option_stocks: &[i32], color_stock: Option<i32>) -> i32 {
    let mut floor = color_stock;
    for &stock in option_stocks {
        floor = Some(match floor {
            Some(current) => current.min(stock),
            None => stock,
        });
    }
    floor.unwrap_or(0)
}
