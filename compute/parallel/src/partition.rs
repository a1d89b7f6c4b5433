//! Splitting of the grid rows into per-worker bands

use std::ops::Range;

/// Split `rows` into `num_bands` contiguous bands of rows
///
/// Bands are returned in order and cover `rows` exactly once. When the number
/// of rows is not a multiple of `num_bands`, the first bands get one extra row
/// each. `num_bands` must be nonzero and no larger than the number of rows.
pub fn bands(rows: Range<usize>, num_bands: usize) -> Vec<Range<usize>> {
    debug_assert!(num_bands > 0 && num_bands <= rows.len());
    let base_len = rows.len() / num_bands;
    let num_longer = rows.len() % num_bands;
    let mut start = rows.start;
    (0..num_bands)
        .map(|band| {
            let len = base_len + usize::from(band < num_longer);
            let band = start..start + len;
            start = band.end;
            band
        })
        .collect()
}
