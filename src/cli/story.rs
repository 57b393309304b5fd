use super::ui;
use crate::core::compare::{Comparison, proximity};
use crate::core::guard::{StoryDraft, save_story};
use crate::core::valuation::ValuationEngine;
use crate::store::{StoryRecord, StoryStore};
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, Table};

pub fn save(
    store: &dyn StoryStore,
    engine: &ValuationEngine,
    draft: StoryDraft,
    today: NaiveDate,
) -> Result<()> {
    let outcome = save_story(store, engine, draft, today)?;
    let status = if outcome.recomputed {
        "valuated"
    } else {
        "unchanged, kept stored valuation"
    };
    println!(
        "Story {} {}",
        ui::style_text(&outcome.record.id, ui::StyleType::Title),
        ui::style_text(status, ui::StyleType::Subtle)
    );
    println!("{}", render_records(std::slice::from_ref(&outcome.record)));
    Ok(())
}

pub fn list(store: &dyn StoryStore) -> Result<()> {
    let records = store.list()?;
    if records.is_empty() {
        println!("No stories saved yet.");
        return Ok(());
    }
    println!("{}", render_records(&records));
    Ok(())
}

/// Ranks saved stories against `amount`, expressed in `currency`.
pub fn compare(
    store: &dyn StoryStore,
    engine: &ValuationEngine,
    amount: f64,
    currency: &str,
    closest_first: bool,
) -> Result<()> {
    let amount_usd = engine.converter().to_reference_currency(amount, currency)?;
    let ranked = proximity(&store.list()?, amount_usd, closest_first);
    if ranked.is_empty() {
        println!("No valued stories to compare against.");
        return Ok(());
    }
    println!("{}", render_comparisons(&ranked));
    Ok(())
}

fn render_records(records: &[StoryRecord]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Title"),
        ui::header_cell("Amount"),
        ui::header_cell("Year"),
        ui::header_cell("Country"),
        ui::header_cell("Adjusted"),
        ui::header_cell("USD"),
        ui::header_cell("Price year"),
    ]);
    for record in records {
        let request = &record.request;
        table.add_row(vec![
            Cell::new(&record.id),
            Cell::new(record.title.as_deref().unwrap_or("")),
            Cell::new(format!(
                "{} {}",
                ui::format_amount(request.amount),
                request.currency.to_uppercase()
            )),
            Cell::new(request.nominal_year),
            Cell::new(request.country.to_uppercase()),
            ui::format_optional_cell(record.valuation.map(|v| v.adjusted_amount), ui::format_amount),
            ui::format_optional_cell(
                record.valuation.map(|v| v.adjusted_amount_usd),
                ui::format_amount,
            ),
            ui::format_optional_cell(record.valuation.map(|v| v.reference_year), |y| {
                y.to_string()
            }),
        ]);
    }
    table
}

fn render_comparisons(ranked: &[Comparison]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Title"),
        ui::header_cell("USD"),
        ui::header_cell("Ratio"),
    ]);
    for comparison in ranked {
        table.add_row(vec![
            Cell::new(&comparison.id),
            Cell::new(comparison.title.as_deref().unwrap_or("")),
            ui::amount_cell(comparison.amount_usd),
            Cell::new(format!("x{:.2}", comparison.ratio)),
        ]);
    }
    table
}
