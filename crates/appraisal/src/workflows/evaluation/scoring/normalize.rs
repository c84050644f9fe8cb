/// Rescales a raw dimension sum to 0..=100.
///
/// `round_half_up(raw / (scale_max * expected_items) * 100)`, evaluated in integer
/// arithmetic so identical inputs always produce the identical integer. Results above 100
/// (more answers than expected) are clamped. A zero denominator yields 0.
pub fn normalize(raw: u32, expected_items: u32, scale_max: u8) -> u8 {
    let denominator = u64::from(scale_max) * u64::from(expected_items);
    if denominator == 0 {
        return 0;
    }

    let scaled = (200 * u64::from(raw) + denominator) / (2 * denominator);
    scaled.min(100) as u8
}

/// Round-half-up integer mean of normalized scores.
pub fn mean_score(scores: impl IntoIterator<Item = u8>) -> u8 {
    let (sum, count) = scores
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), score| {
            (sum + u64::from(score), count + 1)
        });
    if count == 0 {
        return 0;
    }
    ((2 * sum + count) / (2 * count)).min(100) as u8
}
