use super::ui;
use crate::core::valuation::{ValuationEngine, ValuationRequest, ValuationResult};
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, Table};

pub fn run(
    engine: &ValuationEngine,
    request: &ValuationRequest,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let result = engine.valuate(request, today)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render(request, &result, engine.converter().reference_currency()));
    }
    Ok(())
}

pub fn adjustment_year(engine: &ValuationEngine, country: &str, today: NaiveDate) -> Result<()> {
    let year = engine.adjustment_year(country, today)?;
    println!(
        "{} amounts are adjusted to {}",
        country.trim().to_uppercase(),
        ui::style_text(&year.to_string(), ui::StyleType::TotalValue)
    );
    Ok(())
}

fn render(request: &ValuationRequest, result: &ValuationResult, reference_currency: &str) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(&format!("Amount ({})", request.currency.trim().to_uppercase())),
        ui::header_cell("Year"),
        ui::header_cell("Country"),
        ui::header_cell(&format!("In {} prices", result.reference_year)),
        ui::header_cell(reference_currency),
    ]);
    table.add_row(vec![
        ui::amount_cell(request.amount),
        Cell::new(request.nominal_year),
        Cell::new(request.country.to_uppercase()),
        ui::amount_cell(result.adjusted_amount),
        ui::amount_cell(result.adjusted_amount_usd),
    ]);
    table
}
