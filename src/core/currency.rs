//! Exchange rates and conversion into the reference currency.

use crate::core::error::{DatasetError, ValuationError};
use crate::core::index::normalize_code;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_REFERENCE_CURRENCY: &str = "USD";

/// Latest known rate of a currency against the reference currency.
///
/// `rate` is expressed as units of the local currency per one unit of the
/// reference currency (e.g. `EUR 0.92` means 1 USD buys 0.92 EUR). Converting
/// a local amount therefore divides by the rate.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    pub currency: String,
    pub rate: f64,
}

impl ExchangeRate {
    pub fn new(currency: &str, rate: f64) -> Result<Self, DatasetError> {
        let currency = parse_currency_code(currency)?;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(DatasetError::InvalidRate { currency, rate });
        }
        Ok(Self { currency, rate })
    }
}

/// Normalizes a 3-letter ISO 4217 code to upper case.
pub fn parse_currency_code(value: &str) -> Result<String, DatasetError> {
    let code = normalize_code(value);
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code)
    } else {
        Err(DatasetError::InvalidCurrency {
            value: value.to_string(),
        })
    }
}

/// One active rate per currency code.
#[derive(Debug, Clone, Default)]
pub struct ExchangeRateStore {
    rates: HashMap<String, ExchangeRate>,
}

impl ExchangeRateStore {
    /// Later rates for the same code replace earlier ones.
    pub fn new(rates: impl IntoIterator<Item = ExchangeRate>) -> Self {
        let mut store = Self::default();
        for rate in rates {
            store.insert(rate);
        }
        store
    }

    fn insert(&mut self, rate: ExchangeRate) {
        if let Some(previous) = self.rates.insert(rate.currency.clone(), rate) {
            debug!("Replaced rate for {}: {}", previous.currency, previous.rate);
        }
    }

    pub fn rate(&self, currency: &str) -> Option<&ExchangeRate> {
        self.rates.get(&normalize_code(currency))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

pub struct CurrencyConverter {
    rates: Arc<ExchangeRateStore>,
    reference_currency: String,
}

impl CurrencyConverter {
    pub fn new(rates: Arc<ExchangeRateStore>, reference_currency: &str) -> Self {
        Self {
            rates,
            reference_currency: normalize_code(reference_currency),
        }
    }

    pub fn reference_currency(&self) -> &str {
        &self.reference_currency
    }

    /// Converts `amount` into the reference currency, rounded to whole units.
    pub fn to_reference_currency(&self, amount: f64, currency: &str) -> Result<f64, ValuationError> {
        let currency = normalize_code(currency);
        if currency == self.reference_currency {
            debug!("No currency conversion needed for {currency}");
            return Ok(amount.round());
        }

        let rate = self
            .rates
            .rate(&currency)
            .ok_or_else(|| ValuationError::UnknownCurrency {
                currency: currency.clone(),
            })?;
        let converted = (amount / rate.rate).round();
        debug!(
            "Converted {amount} from {currency} to {} at rate {}: {converted}",
            self.reference_currency, rate.rate
        );
        Ok(converted)
    }
}
