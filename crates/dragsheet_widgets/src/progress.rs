//! Clamped linear progress

/// Where `current` sits between `lower` and `upper`, clamped to `[0, 1]`.
///
/// Values at or past `upper` give 1, values at or below `lower` give 0. When
/// the range is empty (`upper == lower`) the upper check wins, so no division
/// happens. A NaN `current` counts as no progress. `inverted` returns
/// `1 - progress`.
pub fn fraction_progress(lower: f32, upper: f32, current: f32, inverted: bool) -> f32 {
    let progress = if current.is_nan() {
        0.0
    } else if current >= upper {
        1.0
    } else if current <= lower {
        0.0
    } else {
        (current - lower) / (upper - lower)
    };

    if inverted {
        1.0 - progress
    } else {
        progress
    }
}
