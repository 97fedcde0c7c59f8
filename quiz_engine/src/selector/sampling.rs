//! Uniform sampling over all fair pairs.
//!
//! Each function counts, for every candidate, how many partners would make a
//! fair pair with it, then draws one ordered pair uniformly from that total.
//! Every unordered pair is counted twice, once from each side, so the draw is
//! uniform over unordered pairs as well.

use rand::Rng;
use std::collections::HashMap;
use std::hash::Hash;

/// Pick a pair `(i, j)` of indices into `values` with `|values[i] - values[j]| >= min_diff`,
/// `values[i] != values[j]` and `labels[i] != labels[j]`.
///
/// `labels` is how each value is shown to the player. Equal labels must cover
/// a contiguous run of values, which holds for any rounding of the value.
pub(crate) fn sample_numeric_pair<L: PartialEq, R: Rng + ?Sized>(
    values: &[f64],
    labels: &[L],
    min_diff: f64,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|a, b| values[*a].total_cmp(&values[*b]));
    let sorted: Vec<f64> = order.iter().map(|i| values[*i]).collect();
    let n = sorted.len();

    // Run of equal labels around each sorted position, as [run_start, run_end).
    let same_label = |p: usize, q: usize| labels[order[p]] == labels[order[q]];
    let mut run_start = vec![0; n];
    for p in 1..n {
        run_start[p] = if same_label(p, p - 1) { run_start[p - 1] } else { p };
    }
    let mut run_end = vec![n; n];
    for p in (0..n.saturating_sub(1)).rev() {
        run_end[p] = if same_label(p, p + 1) { run_end[p + 1] } else { p + 1 };
    }

    // Partners of sorted[p] are a prefix [0, low_end) and a suffix [high_start, n).
    let ranges: Vec<(usize, usize)> = sorted
        .iter()
        .enumerate()
        .map(|(p, x)| {
            let low_end = sorted.partition_point(|v| x - v >= min_diff && v < x);
            let high_start = sorted.partition_point(|v| !(v - x >= min_diff && v > x));
            (low_end.min(run_start[p]), high_start.max(run_end[p]))
        })
        .collect();

    let weights = ranges.iter().map(|(low_end, high_start)| (low_end + (n - high_start)) as u64);
    let (p, offset) = draw_weighted(weights, rng)?;

    let (low_end, high_start) = ranges[p];
    let q = if offset < low_end {
        offset
    } else {
        high_start + (offset - low_end)
    };
    Some((order[p], order[q]))
}

/// Pick a pair `(i, j)` of indices into `values` with `values[i] != values[j]`.
pub(crate) fn sample_distinct_pair<K: Eq + Hash, R: Rng + ?Sized>(
    values: &[K],
    rng: &mut R,
) -> Option<(usize, usize)> {
    let mut group_sizes: HashMap<&K, usize> = HashMap::new();
    for value in values {
        *group_sizes.entry(value).or_default() += 1;
    }

    let n = values.len();
    let weights = values.iter().map(|v| (n - group_sizes[v]) as u64);
    let (i, offset) = draw_weighted(weights, rng)?;

    let j = values
        .iter()
        .enumerate()
        .filter(|(_, v)| *v != &values[i])
        .nth(offset)
        .map(|(j, _)| j)?;
    Some((i, j))
}

/// Draw an index with probability proportional to its weight, plus a uniform
/// offset within that weight.
fn draw_weighted<R: Rng + ?Sized>(
    weights: impl Iterator<Item = u64>,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let mut cumulative = Vec::new();
    let mut total = 0u64;
    for weight in weights {
        total += weight;
        cumulative.push(total);
    }
    if total == 0 {
        return None;
    }

    let r = rng.gen_range(0..total);
    let idx = cumulative.partition_point(|c| *c <= r);
    let start = if idx == 0 { 0 } else { cumulative[idx - 1] };
    Some((idx, (r - start) as usize))
}
