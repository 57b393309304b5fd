//! Valuation engine: inflation adjustment followed by conversion to the
//! reference currency.
use crate::core::currency::{CurrencyConverter, ExchangeRateStore, parse_currency_code};
use crate::core::error::ValuationError;
use crate::core::index::{PriceIndexStore, normalize_code};
use crate::core::inflation::{AdjustmentPolicy, InflationCalculator};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Earliest nominal year accepted by default.
pub const DEFAULT_MIN_YEAR: i32 = 1999;

/// A spending amount as reported, before any adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    pub amount: f64,
    pub nominal_year: i32,
    pub country: String,
    pub currency: String,
}

impl ValuationRequest {
    /// Same request with trimmed, upper-cased country and currency codes.
    pub fn normalized(&self) -> Self {
        Self {
            amount: self.amount,
            nominal_year: self.nominal_year,
            country: normalize_code(&self.country),
            currency: normalize_code(&self.currency),
        }
    }
}

/// Adjusted amounts plus the year whose price level was used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub adjusted_amount: f64,
    pub adjusted_amount_usd: f64,
    pub reference_year: i32,
}

pub struct ValuationEngine {
    inflation: InflationCalculator,
    converter: CurrencyConverter,
    min_year: i32,
}

impl ValuationEngine {
    pub fn new(
        indices: Arc<PriceIndexStore>,
        rates: Arc<ExchangeRateStore>,
        policy: AdjustmentPolicy,
        reference_currency: &str,
    ) -> Self {
        Self {
            inflation: InflationCalculator::new(indices, policy),
            converter: CurrencyConverter::new(rates, reference_currency),
            min_year: DEFAULT_MIN_YEAR,
        }
    }

    pub fn with_min_year(mut self, min_year: i32) -> Self {
        self.min_year = min_year;
        self
    }

    pub fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    /// The most recent year with usable index data for `country`.
    pub fn adjustment_year(&self, country: &str, today: NaiveDate) -> Result<i32, ValuationError> {
        let country = normalize_code(country);
        if country.is_empty() {
            return Err(ValuationError::malformed("country code is empty"));
        }
        Ok(self
            .inflation
            .current_observation(&country, today)?
            .date
            .year())
    }

    /// Valuates `request` as of `today`.
    ///
    /// The same `today` is used for every lookup within the call; callers pin
    /// it explicitly and only the outermost boundary reads the clock.
    pub fn valuate(
        &self,
        request: &ValuationRequest,
        today: NaiveDate,
    ) -> Result<ValuationResult, ValuationError> {
        let request = self.validate(request, today)?;
        let reference_date = NaiveDate::from_ymd_opt(request.nominal_year, 1, 1).ok_or_else(
            || ValuationError::malformed(format!("invalid year {}", request.nominal_year)),
        )?;

        let reference_year = self.adjustment_year(&request.country, today)?;
        let adjusted_amount =
            self.inflation
                .inflate(request.amount, &request.country, reference_date, today)?;
        let adjusted_amount_usd = self
            .converter
            .to_reference_currency(adjusted_amount, &request.currency)?;

        debug!(
            "Valuated {} {} ({}, {}) as {adjusted_amount} / {adjusted_amount_usd} {} in {reference_year}",
            request.amount,
            request.currency,
            request.country,
            request.nominal_year,
            self.converter.reference_currency()
        );
        Ok(ValuationResult {
            adjusted_amount,
            adjusted_amount_usd,
            reference_year,
        })
    }

    fn validate(
        &self,
        request: &ValuationRequest,
        today: NaiveDate,
    ) -> Result<ValuationRequest, ValuationError> {
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(ValuationError::malformed(format!(
                "amount must be positive, got {}",
                request.amount
            )));
        }
        if request.nominal_year < self.min_year || request.nominal_year > today.year() {
            return Err(ValuationError::malformed(format!(
                "year {} outside {}..={}",
                request.nominal_year,
                self.min_year,
                today.year()
            )));
        }
        let country = normalize_code(&request.country);
        if country.is_empty() {
            return Err(ValuationError::malformed("country code is empty"));
        }
        let currency = parse_currency_code(&request.currency)
            .map_err(|e| ValuationError::malformed(e.to_string()))?;

        Ok(ValuationRequest {
            amount: request.amount,
            nominal_year: request.nominal_year,
            country,
            currency,
        })
    }
}

/// Shared handle to the current engine snapshot.
///
/// Readers take an `Arc` to the snapshot and never hold the lock while
/// valuating. A refresh builds a whole new engine and swaps the pointer; the
/// loaded observations are never mutated in place.
pub struct EngineHandle {
    current: RwLock<Arc<ValuationEngine>>,
}

impl EngineHandle {
    pub fn new(engine: ValuationEngine) -> Self {
        Self {
            current: RwLock::new(Arc::new(engine)),
        }
    }

    pub fn current(&self) -> Arc<ValuationEngine> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn replace(&self, engine: ValuationEngine) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(engine);
        debug!("Swapped in refreshed reference data");
    }
}
