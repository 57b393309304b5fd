use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use storyval::core::guard::StoryDraft;
use storyval::core::log::init_logging;
use storyval::core::valuation::ValuationRequest;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct AmountArgs {
    /// Spending amount in its original currency
    #[arg(short, long)]
    amount: f64,

    /// Year the amount was spent
    #[arg(short, long)]
    year: i32,

    /// Country code of the price index to use, e.g. FRA
    #[arg(long)]
    country: String,

    /// ISO 4217 currency code of the amount
    #[arg(long)]
    currency: String,

    /// Valuate as of this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
}

impl AmountArgs {
    fn request(&self) -> ValuationRequest {
        ValuationRequest {
            amount: self.amount,
            nominal_year: self.year,
            country: self.country.clone(),
            currency: self.currency.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Adjust an amount for inflation and convert it to the reference currency
    Valuate {
        #[command(flatten)]
        amount: AmountArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the most recent year with usable price index data
    AdjustmentYear {
        #[arg(long)]
        country: String,

        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Manage saved stories
    #[command(subcommand)]
    Story(StoryCommands),
}

#[derive(Subcommand)]
enum StoryCommands {
    /// Save a story, valuating it when its amount, year or currency changed
    Save {
        #[arg(long)]
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        amount: AmountArgs,
    },
    /// List saved stories
    List,
    /// Rank saved stories by closeness to an amount
    Compare {
        #[arg(short, long)]
        amount: f64,

        #[arg(long, default_value = "USD")]
        currency: String,

        /// Show the least comparable stories first
        #[arg(long)]
        farthest_first: bool,
    },
}

impl From<Commands> for storyval::AppCommand {
    fn from(cmd: Commands) -> storyval::AppCommand {
        match cmd {
            Commands::Valuate { amount, json } => storyval::AppCommand::Valuate {
                request: amount.request(),
                today: amount.today,
                json,
            },
            Commands::AdjustmentYear { country, today } => {
                storyval::AppCommand::AdjustmentYear { country, today }
            }
            Commands::Story(StoryCommands::Save { id, title, amount }) => {
                storyval::AppCommand::SaveStory {
                    draft: StoryDraft {
                        id,
                        title,
                        request: amount.request(),
                    },
                    today: amount.today,
                }
            }
            Commands::Story(StoryCommands::List) => storyval::AppCommand::ListStories,
            Commands::Story(StoryCommands::Compare {
                amount,
                currency,
                farthest_first,
            }) => storyval::AppCommand::CompareStories {
                amount,
                currency,
                closest_first: !farthest_first,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => storyval::cli::setup::setup_at_path(path),
            None => storyval::cli::setup::setup(),
        },
        Some(cmd) => storyval::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
