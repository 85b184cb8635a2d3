//! Barometric stability.
//!
//! Catfish feed more readily when pressure has held steady for a few days.
//! Stability is measured as the spread (max − min) of the earlier pressures
//! over the lookback window plus the current reading, mapped onto `[0, 1]`:
//! no spread scores 1.0, a spread of `STABILITY_RANGE_HPA` or more scores 0.
//!
//! The earlier pressures are the logged ones plus, when available, the
//! weather station's previous observation, so a sharp change since the last
//! observation counts even on a fresh log.
//!
//! With no earlier pressure at all there is nothing to measure, and the
//! factor sits at `NEUTRAL_STABILITY`.

/// How far back logged pressures count towards stability.
pub const STABILITY_LOOKBACK_DAYS: i64 = 3;

/// Pressure spread, in hPa, at which stability bottoms out.
pub const STABILITY_RANGE_HPA: f64 = 10.0;

/// Stability used when no history exists.
pub const NEUTRAL_STABILITY: f64 = 0.5;

/// Spread of `history` plus `current`, ignoring non-finite values.
///
/// Returns `None` when `history` holds no usable pressure.
pub fn pressure_range<I>(history: I, current: f64) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut usable = history.into_iter().filter(|p| p.is_finite()).peekable();
    usable.peek()?;

    let (min, max) = usable
        .chain(std::iter::once(current).filter(|p| p.is_finite()))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p), hi.max(p)));

    Some(max - min)
}

/// Stability factor in `[0, 1]`. Monotonic: a smaller spread never scores lower.
pub fn pressure_stability<I>(history: I, current: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    match pressure_range(history, current) {
        None => NEUTRAL_STABILITY,
        Some(range) => (1.0 - range / STABILITY_RANGE_HPA).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_history_is_neutral() {
        assert_eq!(pressure_stability(Vec::<f64>::new(), 1014.0), NEUTRAL_STABILITY);
        assert_eq!(pressure_range(Vec::<f64>::new(), 1014.0), None);
    }

    #[test]
    fn test_non_finite_history_counts_as_none() {
        assert_eq!(pressure_stability(vec![f64::NAN], 1014.0), NEUTRAL_STABILITY);
    }

    #[test]
    fn test_range_includes_current_reading() {
        let range = pressure_range(vec![1013.0, 1015.0, 1014.0], 1014.0).unwrap();
        assert!((range - 2.0).abs() < 1e-9);

        let range = pressure_range(vec![1013.0, 1015.0], 1020.0).unwrap();
        assert!((range - 7.0).abs() < 1e-9, "a jump in the current reading widens the range");
    }

    #[test]
    fn test_stable_history_scores_high() {
        let s = pressure_stability(vec![1013.0, 1015.0, 1014.0], 1014.0);
        assert!((s - 0.8).abs() < 1e-9, "2 hPa spread should be 0.8, got {}", s);
    }

    #[test]
    fn test_flat_history_scores_one_and_wild_history_scores_zero() {
        assert_eq!(pressure_stability(vec![1014.0, 1014.0], 1014.0), 1.0);
        assert_eq!(pressure_stability(vec![995.0, 1025.0], 1010.0), 0.0);
    }

    #[test]
    fn test_stability_is_monotonic_in_spread() {
        let mut previous = f64::INFINITY;
        for spread in [0.0, 0.5, 1.0, 2.0, 4.0, 8.0, 12.0, 30.0] {
            let s = pressure_stability(vec![1010.0, 1010.0 + spread], 1010.0);
            assert!(s <= previous, "spread {} scored {} after {}", spread, s, previous);
            previous = s;
        }
    }
}
