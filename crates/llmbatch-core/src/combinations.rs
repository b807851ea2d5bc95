//! Cartesian-product expansion of parameter grids.

use serde_json::{Map, Value};

/// A parameter grid: parameter name to ordered list of candidate values.
/// Key order is document order (`serde_json` is built with `preserve_order`).
pub type Grid = Map<String, Value>;

/// One fully-resolved assignment of values to all grid parameters.
pub type Combination = Map<String, Value>;

/// Expand a grid into every combination of its per-parameter values.
///
/// The output count is the product of the list lengths. Ordering is
/// deterministic: the last parameter varies fastest, keys iterate in
/// document order. Duplicate values within one list produce duplicate
/// combinations; nothing is deduplicated.
///
/// A scalar grid entry behaves as a one-element list (a fixed parameter).
/// An empty grid yields a single empty combination; any zero-length list
/// yields no combinations at all.
pub fn expand(grid: &Grid) -> Vec<Combination> {
    let keys: Vec<&String> = grid.keys().collect();
    let lists: Vec<Vec<Value>> = grid
        .values()
        .map(|v| match v {
            Value::Array(items) => items.clone(),
            scalar => vec![scalar.clone()],
        })
        .collect();

    if lists.iter().any(|l| l.is_empty()) {
        return Vec::new();
    }

    let total: usize = lists.iter().map(|l| l.len()).product();
    let mut indices = vec![0usize; lists.len()];
    let mut combinations = Vec::with_capacity(total);

    for _ in 0..total {
        let mut combination = Map::new();
        for (pos, key) in keys.iter().enumerate() {
            combination.insert((*key).clone(), lists[pos][indices[pos]].clone());
        }
        combinations.push(combination);

        // Odometer increment, last position fastest.
        for pos in (0..indices.len()).rev() {
            indices[pos] += 1;
            if indices[pos] < lists[pos].len() {
                break;
            }
            indices[pos] = 0;
        }
    }

    combinations
}

#[cfg(test)]
#[path = "combinations_tests.rs"]
mod tests;
