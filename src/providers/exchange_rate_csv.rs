//! Loads the exchange-rate snapshot from CSV.
//!
//! Expected header: `currency,rate`, with rates quoted as local units per one
//! unit of the reference currency.

use crate::core::currency::{ExchangeRate, ExchangeRateStore};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct Record {
    currency: String,
    rate: f64,
}

pub fn load_exchange_rates(path: &Path) -> Result<ExchangeRateStore> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open exchange rate file: {}", path.display()))?;
    let store = read_exchange_rates(file)
        .with_context(|| format!("Failed to load exchange rate file: {}", path.display()))?;
    info!(
        "Loaded {} exchange rates from {}",
        store.len(),
        path.display()
    );
    Ok(store)
}

pub fn read_exchange_rates<R: Read>(reader: R) -> Result<ExchangeRateStore> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rates = Vec::new();
    for (line, record) in rdr.deserialize::<Record>().enumerate() {
        let record = record.with_context(|| format!("Invalid exchange rate row {}", line + 1))?;
        rates.push(ExchangeRate::new(&record.currency, record.rate)?);
    }
    Ok(ExchangeRateStore::new(rates))
}
