pub mod exchange_rate_csv;
pub mod price_index_csv;

use crate::core::config::AppConfig;
use crate::core::valuation::ValuationEngine;
use anyhow::Result;
use std::sync::Arc;

pub use exchange_rate_csv::{load_exchange_rates, read_exchange_rates};
pub use price_index_csv::{load_price_index, read_price_index};

/// Reads both reference datasets named in `config` and builds a fresh engine.
pub fn load_engine(config: &AppConfig) -> Result<ValuationEngine> {
    let indices = load_price_index(&config.price_index_path())?;
    let rates = load_exchange_rates(&config.exchange_rates_path())?;

    Ok(ValuationEngine::new(
        Arc::new(indices),
        Arc::new(rates),
        config.valuation.policy()?,
        &config.reference_currency,
    )
    .with_min_year(config.valuation.min_year))
}
