/// Derive a URL-safe slug from a product name: lowercase, every run of
/// non-alphanumeric characters collapsed to a single `-`, edges trimmed.
/// Names with nothing usable fall back to `"product"`; uniqueness against
/// existing rows is the caller's job.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mapped: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = mapped
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "product".to_string()
    } else {
        slug
    }
}
