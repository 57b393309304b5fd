//! Error types for valuation and reference data.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures surfaced by the valuation engine.
///
/// Valuation is all-or-nothing: any of these aborts the request and no partial
/// result is produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValuationError {
    #[error("no price index series for country '{country}'")]
    UnknownCountry { country: String },

    #[error("no price index observation for '{country}' within {max_days} days of {date}")]
    DataUnavailable {
        country: String,
        date: NaiveDate,
        max_days: i64,
    },

    #[error("no exchange rate for currency '{currency}'")]
    UnknownCurrency { currency: String },

    #[error("malformed valuation request: {reason}")]
    MalformedInput { reason: String },
}

impl ValuationError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ValuationError::MalformedInput {
            reason: reason.into(),
        }
    }
}

/// Rejections raised while building the price-index or exchange-rate stores.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DatasetError {
    #[error("currency must be a 3-letter ISO code: '{value}'")]
    InvalidCurrency { value: String },

    #[error("country code cannot be empty")]
    EmptyCountry,

    #[error("exchange rate for '{currency}' must be positive and finite, got {rate}")]
    InvalidRate { currency: String, rate: f64 },

    #[error("index value for '{country}' on {date} must be positive and finite, got {value}")]
    InvalidIndex {
        country: String,
        date: NaiveDate,
        value: f64,
    },

    #[error("observations for '{country}' are not strictly increasing at {date}")]
    UnorderedDates { country: String, date: NaiveDate },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_offending_values() {
        let err = ValuationError::DataUnavailable {
            country: "FRA".to_string(),
            date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            max_days: 1098,
        };
        assert_eq!(
            err.to_string(),
            "no price index observation for 'FRA' within 1098 days of 2030-01-01"
        );

        let err = DatasetError::InvalidCurrency {
            value: "EURO".to_string(),
        };
        assert!(err.to_string().contains("'EURO'"));
    }
}
