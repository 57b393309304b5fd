//! Rescales amounts between price levels of the same country.

use crate::core::error::ValuationError;
use crate::core::index::{IndexObservation, PriceIndexStore};
use crate::core::resolver::closest;
use chrono::{Duration, NaiveDate};
use std::sync::Arc;
use tracing::{debug, warn};

/// Tolerance used to find the most recent usable observation: three years.
pub const DEFAULT_CURRENT_WINDOW_DAYS: i64 = 366 * 3;

/// Tolerance windows applied when resolving observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustmentPolicy {
    /// Window around the target date ("today") for the current observation.
    pub current_window: Duration,
    /// Window around the reference date. `None` is unbounded.
    pub reference_window: Option<Duration>,
}

impl Default for AdjustmentPolicy {
    fn default() -> Self {
        Self {
            current_window: Duration::days(DEFAULT_CURRENT_WINDOW_DAYS),
            reference_window: None,
        }
    }
}

pub struct InflationCalculator {
    indices: Arc<PriceIndexStore>,
    policy: AdjustmentPolicy,
}

impl InflationCalculator {
    pub fn new(indices: Arc<PriceIndexStore>, policy: AdjustmentPolicy) -> Self {
        Self { indices, policy }
    }

    /// Observation nearest to `target_date` within the current window.
    pub fn current_observation(
        &self,
        country: &str,
        target_date: NaiveDate,
    ) -> Result<&IndexObservation, ValuationError> {
        let series =
            self.indices
                .series(country)
                .ok_or_else(|| ValuationError::UnknownCountry {
                    country: country.to_string(),
                })?;
        closest(series, target_date, Some(self.policy.current_window))
    }

    /// Observation nearest to `reference_date`.
    ///
    /// Best effort: when nothing lies within the reference window the
    /// `fallback` observation is returned instead of failing. Unknown
    /// countries still fail.
    fn reference_observation<'a>(
        &'a self,
        country: &str,
        reference_date: NaiveDate,
        fallback: &'a IndexObservation,
    ) -> Result<&'a IndexObservation, ValuationError> {
        let series =
            self.indices
                .series(country)
                .ok_or_else(|| ValuationError::UnknownCountry {
                    country: country.to_string(),
                })?;
        match closest(series, reference_date, self.policy.reference_window) {
            Ok(observation) => Ok(observation),
            Err(ValuationError::DataUnavailable { .. }) => {
                warn!(
                    "No {} index near {}; falling back to {} (amount left unadjusted)",
                    country, reference_date, fallback.date
                );
                Ok(fallback)
            }
            Err(e) => Err(e),
        }
    }

    /// Rescales `amount` from the price level around `reference_date` to the
    /// one around `target_date`, rounded to the nearest whole unit.
    pub fn inflate(
        &self,
        amount: f64,
        country: &str,
        reference_date: NaiveDate,
        target_date: NaiveDate,
    ) -> Result<f64, ValuationError> {
        let target = self.current_observation(country, target_date)?;
        let reference = self.reference_observation(country, reference_date, target)?;

        let adjusted = (amount * target.value / reference.value).round();
        debug!(
            "Inflated {amount} ({}: {} -> {}: {}) = {adjusted}",
            reference.date, reference.value, target.date, target.value
        );
        Ok(adjusted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::PriceIndexSeries;
    use quickcheck_macros::quickcheck;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store(points: &[(NaiveDate, f64)]) -> Arc<PriceIndexStore> {
        let observations = points
            .iter()
            .map(|(d, v)| IndexObservation::new("X", *d, *v).unwrap())
            .collect();
        Arc::new(PriceIndexStore::new(vec![
            PriceIndexSeries::new("X", observations).unwrap(),
        ]))
    }

    fn calculator(points: &[(NaiveDate, f64)]) -> InflationCalculator {
        InflationCalculator::new(store(points), AdjustmentPolicy::default())
    }

    #[test]
    fn test_inflate_scales_by_index_ratio() {
        let calc = calculator(&[(date(2020, 1, 1), 100.0), (date(2023, 1, 1), 110.0)]);
        let adjusted = calc
            .inflate(1000.0, "X", date(2020, 1, 1), date(2023, 6, 1))
            .unwrap();
        assert_eq!(adjusted, 1100.0);
    }

    #[test]
    fn test_inflate_rounds_to_whole_units() {
        let calc = calculator(&[(date(2020, 1, 1), 3.0), (date(2023, 1, 1), 4.0)]);
        let adjusted = calc
            .inflate(10.0, "X", date(2020, 1, 1), date(2023, 1, 1))
            .unwrap();
        assert_eq!(adjusted, 13.0);
    }

    #[test]
    fn test_inflate_identity_for_same_date() {
        let calc = calculator(&[(date(2020, 1, 1), 100.0), (date(2023, 1, 1), 110.0)]);
        let d = date(2022, 12, 1);
        assert_eq!(calc.inflate(4321.0, "X", d, d).unwrap(), 4321.0);
    }

    #[test]
    fn test_inflate_propagates_unknown_country() {
        let calc = calculator(&[(date(2020, 1, 1), 100.0)]);
        let err = calc
            .inflate(10.0, "Y", date(2020, 1, 1), date(2020, 1, 1))
            .unwrap_err();
        assert!(matches!(err, ValuationError::UnknownCountry { .. }));
    }

    #[test]
    fn test_inflate_propagates_stale_current_data() {
        let calc = calculator(&[(date(2010, 1, 1), 100.0)]);
        let err = calc
            .inflate(10.0, "X", date(2010, 1, 1), date(2023, 6, 1))
            .unwrap_err();
        assert!(matches!(err, ValuationError::DataUnavailable { .. }));
    }

    #[test]
    fn test_reference_fallback_uses_target_observation() {
        // Best-effort path: the reference year has no data within its window,
        // so the amount is carried over at the current price level unchanged.
        let policy = AdjustmentPolicy {
            reference_window: Some(Duration::days(366)),
            ..AdjustmentPolicy::default()
        };
        let calc = InflationCalculator::new(
            store(&[(date(2020, 1, 1), 100.0), (date(2023, 1, 1), 110.0)]),
            policy,
        );

        let adjusted = calc
            .inflate(1000.0, "X", date(2000, 1, 1), date(2023, 6, 1))
            .unwrap();
        assert_eq!(adjusted, 1000.0);
    }

    #[test]
    fn test_unbounded_reference_resolves_far_dates() {
        let calc = calculator(&[(date(2020, 1, 1), 100.0), (date(2023, 1, 1), 110.0)]);
        let adjusted = calc
            .inflate(1000.0, "X", date(1999, 1, 1), date(2023, 6, 1))
            .unwrap();
        assert_eq!(adjusted, 1100.0);
    }

    #[quickcheck]
    fn inflate_is_monotonic_in_target_index(amount: u32, low: u16, bump: u16) -> bool {
        let amount = f64::from(amount);
        let low = f64::from(low) + 1.0;
        let high = low + f64::from(bump);
        let reference = date(2020, 1, 1);
        let today = date(2023, 6, 1);

        let inflate_with = |target_index: f64| {
            calculator(&[(reference, 100.0), (date(2023, 1, 1), target_index)])
                .inflate(amount, "X", reference, today)
                .unwrap()
        };
        inflate_with(high) >= inflate_with(low)
    }
}
