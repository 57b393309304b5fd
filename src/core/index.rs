//! Price-index observations grouped per country.

use crate::core::error::DatasetError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single price-index reading for a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexObservation {
    pub country: String,
    pub date: NaiveDate,
    pub value: f64,
}

impl IndexObservation {
    pub fn new(country: &str, date: NaiveDate, value: f64) -> Result<Self, DatasetError> {
        let country = normalize_code(country);
        if country.is_empty() {
            return Err(DatasetError::EmptyCountry);
        }
        if !value.is_finite() || value <= 0.0 {
            return Err(DatasetError::InvalidIndex {
                country,
                date,
                value,
            });
        }
        Ok(Self {
            country,
            date,
            value,
        })
    }
}

/// Observations for one country, sorted by strictly increasing date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceIndexSeries {
    country: String,
    observations: Vec<IndexObservation>,
}

impl PriceIndexSeries {
    /// Builds a series from observations already sorted by date.
    ///
    /// Observations are stamped with the series' country code and their dates
    /// must strictly increase; use [`PriceIndexSeries::from_unsorted`] when the input order
    /// is unknown.
    pub fn new(country: &str, observations: Vec<IndexObservation>) -> Result<Self, DatasetError> {
        let country = normalize_code(country);
        if country.is_empty() {
            return Err(DatasetError::EmptyCountry);
        }
        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(DatasetError::UnorderedDates {
                    country,
                    date: pair[1].date,
                });
            }
        }
        let observations = observations
            .into_iter()
            .map(|o| IndexObservation {
                country: country.clone(),
                ..o
            })
            .collect();
        Ok(Self {
            country,
            observations,
        })
    }

    /// Sorts by date first; duplicated dates are still rejected.
    pub fn from_unsorted(
        country: &str,
        mut observations: Vec<IndexObservation>,
    ) -> Result<Self, DatasetError> {
        observations.sort_by_key(|o| o.date);
        Self::new(country, observations)
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn observations(&self) -> &[IndexObservation] {
        &self.observations
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }
}

/// Read-only collection of per-country series, built once per load cycle.
#[derive(Debug, Clone, Default)]
pub struct PriceIndexStore {
    series: HashMap<String, PriceIndexSeries>,
}

impl PriceIndexStore {
    pub fn new(series: impl IntoIterator<Item = PriceIndexSeries>) -> Self {
        Self {
            series: series
                .into_iter()
                .map(|s| (s.country.clone(), s))
                .collect(),
        }
    }

    /// Looks up a country's series, ignoring case and surrounding whitespace.
    pub fn series(&self, country: &str) -> Option<&PriceIndexSeries> {
        self.series.get(&normalize_code(country))
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

pub(crate) fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
