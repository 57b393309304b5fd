//! Recomputation guard used when persisting stories.

use crate::core::index::normalize_code;
use crate::core::valuation::{ValuationEngine, ValuationRequest};
use crate::store::{StoryRecord, StoryStore};
use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

/// Story fields supplied by the caller on save.
#[derive(Debug, Clone)]
pub struct StoryDraft {
    pub id: String,
    pub title: Option<String>,
    pub request: ValuationRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub record: StoryRecord,
    pub recomputed: bool,
}

/// Whether a stored story must be valuated again.
///
/// Only the amount, nominal year and currency are compared; a previous record
/// without a stored valuation is always recomputed.
pub fn needs_recompute(previous: Option<&StoryRecord>, request: &ValuationRequest) -> bool {
    match previous {
        None => true,
        Some(previous) if previous.valuation.is_none() => true,
        Some(previous) => {
            previous.request.amount != request.amount
                || previous.request.nominal_year != request.nominal_year
                || normalize_code(&previous.request.currency) != normalize_code(&request.currency)
        }
    }
}

/// Persists `draft`, valuating it only when [`needs_recompute`] says so.
///
/// The request is stored with normalized country and currency codes. A failed
/// valuation is returned as an error and nothing is written, leaving any
/// previously stored record untouched.
pub fn save_story(
    store: &dyn StoryStore,
    engine: &ValuationEngine,
    draft: StoryDraft,
    today: NaiveDate,
) -> Result<SaveOutcome> {
    let previous = store.get(&draft.id)?;
    let request = draft.request.normalized();

    let (valuation, recomputed) = match previous {
        Some(ref previous) if !needs_recompute(Some(previous), &request) => {
            debug!("Story {} unchanged, reusing stored valuation", draft.id);
            (previous.valuation, false)
        }
        _ => (Some(engine.valuate(&request, today)?), true),
    };

    let record = StoryRecord {
        id: draft.id,
        title: draft.title,
        request,
        valuation,
    };
    store.put(&record)?;
    info!("Saved story {} (recomputed: {})", record.id, recomputed);

    Ok(SaveOutcome { record, recomputed })
}
