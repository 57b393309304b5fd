use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use storyval::AppCommand;
use storyval::core::ValuationError;
use storyval::core::guard::StoryDraft;
use storyval::core::valuation::ValuationRequest;
use storyval::store::{DiskStoryStore, StoryStore};
use tempfile::TempDir;

// Writes datasets and a config pointing at them; returns the config path.
fn write_fixture(dir: &Path, cpi: &str) -> String {
    fs::create_dir_all(dir.join("data")).expect("Failed to create data dir");
    fs::write(dir.join("data/cpi.csv"), cpi).expect("Failed to write cpi");
    fs::write(
        dir.join("data/rates.csv"),
        "currency,rate\nEUR,0.5\nGBP,0.8\n",
    )
    .expect("Failed to write rates");

    let config_path = dir.join("config.yaml");
    let config_content = r#"
datasets:
  price_index: "data/cpi.csv"
  exchange_rates: "data/rates.csv"
data_path: "store"
"#;
    fs::write(&config_path, config_content).expect("Failed to write config file");
    config_path.to_str().unwrap().to_string()
}

const CPI: &str = "\
country,date,index
XXX,2020-01-01,100.0
XXX,2023-01-01,110.0
OLD,2005,80.0
";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn request(amount: f64, year: i32, country: &str, currency: &str) -> ValuationRequest {
    ValuationRequest {
        amount,
        nominal_year: year,
        country: country.to_string(),
        currency: currency.to_string(),
    }
}

#[test_log::test]
fn test_valuate_command_succeeds() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_fixture(dir.path(), CPI);

    let result = storyval::run_command(
        AppCommand::Valuate {
            request: request(1000.0, 2020, "XXX", "USD"),
            today: Some(date(2023, 6, 1)),
            json: true,
        },
        Some(&config_path),
    );
    assert!(
        result.is_ok(),
        "Valuate command failed with: {:?}",
        result.err()
    );

    let result = storyval::run_command(
        AppCommand::AdjustmentYear {
            country: "xxx".to_string(),
            today: Some(date(2023, 6, 1)),
        },
        Some(&config_path),
    );
    assert!(result.is_ok());
}

#[test_log::test]
fn test_valuate_command_surfaces_typed_failures() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_fixture(dir.path(), CPI);
    let today = Some(date(2023, 6, 1));

    let cases = [
        (request(1000.0, 2020, "ZZZ", "USD"), "unknown country"),
        (request(1000.0, 2020, "OLD", "USD"), "stale data"),
        (request(1000.0, 2020, "XXX", "JPY"), "unknown currency"),
        (request(-1.0, 2020, "XXX", "USD"), "malformed"),
    ];
    for (req, label) in cases {
        let err = storyval::run_command(
            AppCommand::Valuate {
                request: req,
                today,
                json: false,
            },
            Some(&config_path),
        )
        .expect_err(label);
        let typed = err.downcast_ref::<ValuationError>();
        let matched = match label {
            "unknown country" => matches!(typed, Some(ValuationError::UnknownCountry { .. })),
            "stale data" => matches!(typed, Some(ValuationError::DataUnavailable { .. })),
            "unknown currency" => matches!(typed, Some(ValuationError::UnknownCurrency { .. })),
            _ => matches!(typed, Some(ValuationError::MalformedInput { .. })),
        };
        assert!(matched, "{label}: got {err:?}");
    }
}

#[test_log::test]
fn test_story_save_is_guarded_and_persisted() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_fixture(dir.path(), CPI);

    let save = |currency: &str| {
        storyval::run_command(
            AppCommand::SaveStory {
                draft: StoryDraft {
                    id: "bridge".to_string(),
                    title: Some("New bridge".to_string()),
                    request: request(1000.0, 2020, "XXX", currency),
                },
                today: Some(date(2023, 6, 1)),
            },
            Some(&config_path),
        )
    };

    save("EUR").expect("First save failed");
    save("EUR").expect("Second save failed");
    // Failed valuation leaves the stored record alone
    assert!(save("JPY").is_err());

    storyval::run_command(AppCommand::ListStories, Some(&config_path)).expect("List failed");
    storyval::run_command(
        AppCommand::CompareStories {
            amount: 2000.0,
            currency: "USD".to_string(),
            closest_first: true,
        },
        Some(&config_path),
    )
    .expect("Compare failed");

    let store = DiskStoryStore::open(&dir.path().join("store").join("stories"))
        .expect("Failed to reopen store");
    let record = store.get("bridge").unwrap().expect("Story not persisted");
    assert_eq!(record.request.currency, "EUR");
    let valuation = record.valuation.expect("Story not valuated");
    assert_eq!(valuation.adjusted_amount, 1100.0);
    assert_eq!(valuation.adjusted_amount_usd, 2200.0);
    assert_eq!(valuation.reference_year, 2023);
}

#[test_log::test]
fn test_missing_dataset_is_reported() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_fixture(dir.path(), CPI);
    fs::remove_file(dir.path().join("data/rates.csv")).unwrap();

    let err = storyval::run_command(
        AppCommand::Valuate {
            request: request(1000.0, 2020, "XXX", "USD"),
            today: Some(date(2023, 6, 1)),
            json: false,
        },
        Some(&config_path),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Failed to open exchange rate file"));
}

#[test_log::test]
fn test_list_stories_does_not_need_datasets() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_fixture(dir.path(), CPI);
    fs::remove_file(dir.path().join("data/cpi.csv")).unwrap();
    fs::remove_file(dir.path().join("data/rates.csv")).unwrap();

    let result = storyval::run_command(AppCommand::ListStories, Some(&config_path));
    assert!(result.is_ok(), "List failed with: {:?}", result.err());
}

#[test_log::test]
fn test_invalid_window_config_is_reported() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_fixture(dir.path(), CPI);
    let mut content = fs::read_to_string(&config_path).unwrap();
    content.push_str("valuation:\n  current_window_days: -5\n");
    fs::write(&config_path, content).unwrap();

    let err = storyval::run_command(AppCommand::ListStories, Some(&config_path)).unwrap_err();
    assert!(format!("{err:#}").contains("must not be negative"));
}
