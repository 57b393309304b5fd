//! Loads the price-index feed from CSV.
//!
//! Expected header: `country,date,index`. `date` is either `YYYY-MM-DD` or a
//! bare year, read as January 1st.

use crate::core::index::{IndexObservation, PriceIndexSeries, PriceIndexStore};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct Record {
    country: String,
    date: String,
    index: f64,
}

pub fn load_price_index(path: &Path) -> Result<PriceIndexStore> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open price index file: {}", path.display()))?;
    let store = read_price_index(file)
        .with_context(|| format!("Failed to load price index file: {}", path.display()))?;
    info!(
        "Loaded price index for {} countries from {}",
        store.len(),
        path.display()
    );
    Ok(store)
}

pub fn read_price_index<R: Read>(reader: R) -> Result<PriceIndexStore> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut by_country: BTreeMap<String, Vec<IndexObservation>> = BTreeMap::new();

    for (line, record) in rdr.deserialize::<Record>().enumerate() {
        let record = record.with_context(|| format!("Invalid price index row {}", line + 1))?;
        let date = parse_date(&record.date)?;
        let observation = IndexObservation::new(&record.country, date, record.index)?;
        by_country
            .entry(observation.country.clone())
            .or_default()
            .push(observation);
    }

    let mut series = Vec::with_capacity(by_country.len());
    for (country, observations) in by_country {
        debug!("{} observations for {}", observations.len(), country);
        series.push(PriceIndexSeries::from_unsorted(&country, observations)?);
    }
    Ok(PriceIndexStore::new(series))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    s.parse::<i32>()
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .ok_or_else(|| anyhow!("Invalid observation date: {s}"))
}
