//! Nearest-observation lookup over a price-index series.

use crate::core::error::ValuationError;
use crate::core::index::{IndexObservation, PriceIndexSeries};
use chrono::{Duration, NaiveDate};
use tracing::debug;

/// Returns the observation closest to `target`.
///
/// Equidistant neighbours resolve to the earlier date. With `max_distance`
/// set, a best match farther away than the window fails with
/// [`ValuationError::DataUnavailable`]; a distance equal to the window is
/// accepted. `None` means the window is unbounded. An empty series fails with
/// [`ValuationError::UnknownCountry`].
pub fn closest(
    series: &PriceIndexSeries,
    target: NaiveDate,
    max_distance: Option<Duration>,
) -> Result<&IndexObservation, ValuationError> {
    let observations = series.observations();
    let split = observations.partition_point(|o| o.date < target);
    let before = split.checked_sub(1).map(|i| &observations[i]);
    let after = observations.get(split);

    let best = [before, after]
        .into_iter()
        .flatten()
        .min_by_key(|o| (distance(o.date, target), o.date))
        .ok_or_else(|| ValuationError::UnknownCountry {
            country: series.country().to_string(),
        })?;

    let gap = distance(best.date, target);
    if let Some(max) = max_distance {
        if gap > max {
            debug!(
                "Closest {} observation to {} is {} ({} days), outside the {} day window",
                series.country(),
                target,
                best.date,
                gap.num_days(),
                max.num_days()
            );
            return Err(ValuationError::DataUnavailable {
                country: series.country().to_string(),
                date: target,
                max_days: max.num_days(),
            });
        }
    }

    debug!(
        "Resolved {} observation for {}: {} = {}",
        series.country(),
        target,
        best.date,
        best.value
    );
    Ok(best)
}

fn distance(a: NaiveDate, b: NaiveDate) -> Duration {
    (a - b).abs()
}
