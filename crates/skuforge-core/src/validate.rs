use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::product::{
    NewColorVariant, NewProduct, NewVariantOption, NewVariantType, ProductStatus,
    ProductSubmission, SpecificationDetail, SpecificationGroup,
};

/// One failed rule, addressed by a dotted/indexed field path such as
/// `variant_types[0].options[2].stock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Every violation found in a submission. Validation never short-circuits;
/// the caller gets the complete list in one pass.
#[derive(Debug, Error)]
#[error("submission failed validation with {} violation(s)", .violations.len())]
pub struct ValidationErrors {
    pub violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Validate a raw submission and normalize it into a [`NewProduct`].
///
/// Collects all violations rather than stopping at the first one. On
/// success the returned record has trimmed strings, a typed status, and a
/// parsed `scheduled_at`.
///
/// # Errors
///
/// Returns `ValidationErrors` listing every failed rule.
pub fn validate_submission(input: &ProductSubmission) -> Result<NewProduct, ValidationErrors> {
    let mut violations: Vec<FieldViolation> = Vec::new();
    let mut push = |field: String, message: &str| {
        violations.push(FieldViolation {
            field,
            message: message.to_string(),
        });
    };

    let name = input.name.trim();
    let name_len = name.chars().count();
    if name_len < 3 {
        push("name".into(), "must be at least 3 characters");
    } else if name_len > 500 {
        push("name".into(), "must be at most 500 characters");
    }

    let description = input.description.trim();
    let description_len = description.chars().count();
    if description_len < 10 {
        push("description".into(), "must be at least 10 characters");
    } else if description_len > 5000 {
        push("description".into(), "must be at most 5000 characters");
    }

    if input.category_id < 1 {
        push("category_id".into(), "must be a positive id");
    }
    if matches!(input.subcategory_id, Some(id) if id < 1) {
        push("subcategory_id".into(), "must be a positive id");
    }
    if matches!(input.brand_id, Some(id) if id < 1) {
        push("brand_id".into(), "must be a positive id");
    }

    let mut base_ok = true;
    if input.base_price <= Decimal::ZERO {
        push("base_price".into(), "must be greater than 0");
        base_ok = false;
    }
    if exceeds_two_decimals(input.base_price) {
        push("base_price".into(), "must have at most 2 decimal places");
        base_ok = false;
    }

    if let Some(crossing) = input.crossing_price {
        let mut crossing_ok = true;
        if crossing <= Decimal::ZERO {
            push("crossing_price".into(), "must be greater than 0");
            crossing_ok = false;
        }
        if exceeds_two_decimals(crossing) {
            push("crossing_price".into(), "must have at most 2 decimal places");
            crossing_ok = false;
        }
        if base_ok && crossing_ok && crossing <= input.base_price {
            push("crossing_price".into(), "must be greater than base_price");
        }
    }

    if input.variant_types.is_empty() {
        push(
            "variant_types".into(),
            "at least one variant type is required",
        );
    }
    for (i, vt) in input.variant_types.iter().enumerate() {
        if vt.type_name.trim().is_empty() {
            push(format!("variant_types[{i}].type_name"), "is required");
        }
        if vt.options.is_empty() {
            push(
                format!("variant_types[{i}].options"),
                "at least one option is required",
            );
        }
        for (j, option) in vt.options.iter().enumerate() {
            if option.name.trim().is_empty() {
                push(format!("variant_types[{i}].options[{j}].name"), "is required");
            }
            if exceeds_two_decimals(option.price_adjustment) {
                push(
                    format!("variant_types[{i}].options[{j}].price_adjustment"),
                    "must have at most 2 decimal places",
                );
            }
            if option.stock < 0 {
                push(
                    format!("variant_types[{i}].options[{j}].stock"),
                    "must not be negative",
                );
            }
        }
    }

    for (i, color) in input.color_variants.iter().enumerate() {
        if color.color_name.trim().is_empty() {
            push(format!("color_variants[{i}].color_name"), "is required");
        }
        if let Some(code) = &color.color_code {
            if !is_hex_color(code) {
                push(
                    format!("color_variants[{i}].color_code"),
                    "must be a hex color like #1A2B3C",
                );
            }
        }
        if color.images.is_empty() {
            push(
                format!("color_variants[{i}].images"),
                "at least one image is required",
            );
        }
        for (j, url) in color.images.iter().enumerate() {
            if !is_http_url(url.trim()) {
                push(
                    format!("color_variants[{i}].images[{j}]"),
                    "must be an http(s) URL",
                );
            }
        }
        if color.stock < 0 {
            push(format!("color_variants[{i}].stock"), "must not be negative");
        }
    }

    for (i, group) in input.specifications.iter().enumerate() {
        if group.group_name.trim().is_empty() {
            push(format!("specifications[{i}].group_name"), "is required");
        }
        if group.details.is_empty() {
            push(
                format!("specifications[{i}].details"),
                "at least one detail is required",
            );
        }
        for (j, detail) in group.details.iter().enumerate() {
            if detail.key.trim().is_empty() {
                push(format!("specifications[{i}].details[{j}].key"), "is required");
            }
            if detail.value.trim().is_empty() {
                push(
                    format!("specifications[{i}].details[{j}].value"),
                    "is required",
                );
            }
        }
    }

    if input.images.is_empty() {
        push("images".into(), "at least one image is required");
    }
    for (j, url) in input.images.iter().enumerate() {
        if !is_http_url(url.trim()) {
            push(format!("images[{j}]"), "must be an http(s) URL");
        }
    }

    let status = ProductStatus::parse(&input.status);
    if status.is_none() {
        push(
            "status".into(),
            "must be one of draft, published, scheduled",
        );
    }

    let mut scheduled_at: Option<DateTime<Utc>> = None;
    match &input.scheduled_at {
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => scheduled_at = Some(dt.with_timezone(&Utc)),
            Err(_) => push("scheduled_at".into(), "must be an RFC 3339 timestamp"),
        },
        None => {
            if status == Some(ProductStatus::Scheduled) {
                push(
                    "scheduled_at".into(),
                    "is required when status is scheduled",
                );
            }
        }
    }

    match (violations.is_empty(), status) {
        (true, Some(status)) => Ok(NewProduct {
            name: name.to_string(),
            description: description.to_string(),
            category_id: input.category_id,
            subcategory_id: input.subcategory_id,
            brand_id: input.brand_id,
            base_price: input.base_price,
            crossing_price: input.crossing_price,
            variant_types: input
                .variant_types
                .iter()
                .map(|vt| NewVariantType {
                    type_name: vt.type_name.trim().to_string(),
                    options: vt
                        .options
                        .iter()
                        .map(|o| NewVariantOption {
                            name: o.name.trim().to_string(),
                            price_adjustment: o.price_adjustment,
                            stock: o.stock,
                        })
                        .collect(),
                })
                .collect(),
            color_variants: input
                .color_variants
                .iter()
                .map(|c| NewColorVariant {
                    color_name: c.color_name.trim().to_string(),
                    color_code: c.color_code.clone(),
                    images: c.images.iter().map(|u| u.trim().to_string()).collect(),
                    stock: c.stock,
                })
                .collect(),
            specifications: input
                .specifications
                .iter()
                .map(|g| SpecificationGroup {
                    group_name: g.group_name.trim().to_string(),
                    details: g
                        .details
                        .iter()
                        .map(|d| SpecificationDetail {
                            key: d.key.trim().to_string(),
                            value: d.value.trim().to_string(),
                        })
                        .collect(),
                })
                .collect(),
            images: input.images.iter().map(|u| u.trim().to_string()).collect(),
            status,
            scheduled_at,
        }),
        _ => Err(ValidationErrors { violations }),
    }
}

/// True when the value cannot be represented exactly in a NUMERIC(10,2)
/// column without rounding. Trailing zeros are ignored, so `10.50` passes.
fn exceeds_two_decimals(value: Decimal) -> bool {
    value.normalize().scale() > 2
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

// Image URLs are opaque to the service; a scheme and a non-empty host are
// all we insist on.
fn is_http_url(s: &str) -> bool {
    let rest = match s.strip_prefix("https://").or_else(|| s.strip_prefix("http://")) {
        Some(rest) => rest,
        None => return false,
    };
    !rest.is_empty() && !rest.starts_with('/') && !s.contains(char::is_whitespace)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
