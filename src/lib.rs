pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::guard::StoryDraft;
use crate::core::valuation::ValuationRequest;
use crate::store::DiskStoryStore;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

pub enum AppCommand {
    Valuate {
        request: ValuationRequest,
        today: Option<NaiveDate>,
        json: bool,
    },
    AdjustmentYear {
        country: String,
        today: Option<NaiveDate>,
    },
    SaveStory {
        draft: StoryDraft,
        today: Option<NaiveDate>,
    },
    ListStories,
    CompareStories {
        amount: f64,
        currency: String,
        closest_first: bool,
    },
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Story valuation starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Valuate {
            request,
            today,
            json,
        } => {
            let engine = providers::load_engine(&config)?;
            cli::valuate::run(&engine, &request, resolve_today(today), json)
        }
        AppCommand::AdjustmentYear { country, today } => {
            let engine = providers::load_engine(&config)?;
            cli::valuate::adjustment_year(&engine, &country, resolve_today(today))
        }
        AppCommand::SaveStory { draft, today } => {
            let engine = providers::load_engine(&config)?;
            let store = DiskStoryStore::open(&stories_path(&config)?)?;
            cli::story::save(&store, &engine, draft, resolve_today(today))
        }
        AppCommand::ListStories => {
            let store = DiskStoryStore::open(&stories_path(&config)?)?;
            cli::story::list(&store)
        }
        AppCommand::CompareStories {
            amount,
            currency,
            closest_first,
        } => {
            let engine = providers::load_engine(&config)?;
            let store = DiskStoryStore::open(&stories_path(&config)?)?;
            cli::story::compare(&store, &engine, amount, &currency, closest_first)
        }
    }
}

fn stories_path(config: &AppConfig) -> Result<std::path::PathBuf> {
    Ok(config.default_data_path()?.join("stories"))
}

/// Wall-clock date, read only here at the outer boundary.
fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Utc::now().date_naive())
}
