//! Ranks stored stories by how close their value is to a given amount.

use crate::store::StoryRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub id: String,
    pub title: Option<String>,
    pub amount_usd: f64,
    /// Story value divided by the query amount.
    pub ratio: f64,
}

/// Orders valued stories by `|ln(story / amount)|`, so a story twice as large
/// and one half as large are equally close. Stories without a positive
/// valuation are skipped.
pub fn proximity(records: &[StoryRecord], amount_usd: f64, closest_first: bool) -> Vec<Comparison> {
    if !amount_usd.is_finite() || amount_usd <= 0.0 {
        return Vec::new();
    }

    let mut ranked: Vec<Comparison> = records
        .iter()
        .filter_map(|record| {
            let value = record.valuation?.adjusted_amount_usd;
            (value > 0.0).then(|| Comparison {
                id: record.id.clone(),
                title: record.title.clone(),
                amount_usd: value,
                ratio: value / amount_usd,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.ratio
            .ln()
            .abs()
            .total_cmp(&b.ratio.ln().abs())
            .then_with(|| a.id.cmp(&b.id))
    });
    if !closest_first {
        ranked.reverse();
    }
    ranked
}
