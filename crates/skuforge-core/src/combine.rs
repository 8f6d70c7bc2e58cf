/// Cartesian product across variant axes.
///
/// Axis order is preserved within each tuple and enumeration is
/// deterministic: the last axis varies fastest, so
/// `[[A, B], [1, 2]]` yields `A1, A2, B1, B2`. Zero axes produce the
/// single empty tuple; an empty axis produces no tuples at all (callers
/// reject empty axes during validation). Iterative, not recursive.
#[must_use]
pub fn cartesian_product<T: Clone>(axes: &[Vec<T>]) -> Vec<Vec<T>> {
    let mut tuples: Vec<Vec<T>> = vec![Vec::new()];
    for axis in axes {
        let mut next = Vec::with_capacity(tuples.len() * axis.len());
        for stem in &tuples {
            for value in axis {
                let mut tuple = Vec::with_capacity(stem.len() + 1);
                tuple.extend_from_slice(stem);
                tuple.push(value.clone());
                next.push(tuple);
            }
        }
        tuples = next;
    }
    tuples
}

/// Number of variant rows a submission would materialize: the product of
/// the axis sizes times the color count (a product without colors counts
/// as one color). Saturates instead of overflowing so the ceiling check
/// stays meaningful for absurd inputs.
#[must_use]
pub fn combination_count(axis_sizes: &[usize], color_count: usize) -> u64 {
    let combos = axis_sizes
        .iter()
        .fold(1u64, |acc, &n| acc.saturating_mul(n as u64));
    combos.saturating_mul(color_count.max(1) as u64)
}
