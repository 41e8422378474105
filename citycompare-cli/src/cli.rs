use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use std::sync::Arc;
use tracing::{debug, info};

use citycompare_core::{
    Config, SubmissionController,
    chart::{ChartConfig, MAX_WIDTH, TerminalChart},
    config::API_KEY_ENV,
    provider::provider_from_config,
    query::parse_cities,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycompare", version, about = "Compare current weather across cities")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Print where the config file lives.
    ConfigPath,

    /// Show weather cards and a temperature chart for a list of cities.
    Compare {
        /// Comma-separated city names, e.g. "Paris, London, Tokyo".
        cities: String,

        /// Print results and chart description as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Width of the longest chart bar, in columns.
        #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u16).range(1..=MAX_WIDTH as i64))]
        width: u16,
    },

    /// Prompt for city lists repeatedly. Esc, Ctrl-C or `:q` quits.
    Interactive {
        #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u16).range(1..=MAX_WIDTH as i64))]
        width: u16,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
            Command::Compare { cities, json, width } => compare(&cities, json, width).await,
            Command::Interactive { width } => interactive(width).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message(&format!("{API_KEY_ENV} takes precedence when set"))
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    config.save()?;

    let path = Config::config_file_path()?;
    info!(path = %path.display(), "config saved");
    println!("Saved API key to {}", path.display());
    Ok(())
}

fn controller(width: u16) -> anyhow::Result<SubmissionController<TerminalChart>> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    Ok(SubmissionController::new(Arc::new(provider), TerminalChart::new(usize::from(width))))
}

async fn compare(cities: &str, json: bool, width: u16) -> anyhow::Result<()> {
    // A blank list never needs the API key.
    parse_cities(cities)?;
    let mut controller = controller(width)?;

    debug!(cities, "submitting");
    let results = controller.submit(cities).await?;

    if json {
        let out = serde_json::json!({
            "results": results,
            "chart": ChartConfig::bar_from(results),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_page(&controller);
    }

    Ok(())
}

async fn interactive(width: u16) -> anyhow::Result<()> {
    let mut controller = controller(width)?;

    loop {
        let line = match Text::new("Cities:")
            .with_help_message("comma-separated, :q to quit")
            .prompt()
        {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city list"),
        };

        if line.trim() == ":q" {
            break;
        }

        debug!(cities = %line, "submitting");
        let rendered = controller.submit(&line).await.is_ok();
        if rendered {
            print_page(&controller);
        } else {
            print_error(&controller);
        }
    }

    Ok(())
}

fn print_page(controller: &SubmissionController<TerminalChart>) {
    for card in &controller.page().results {
        println!("{card}");
    }
    if let Some(canvas) = controller.chart().backend().canvas() {
        println!();
        print!("{canvas}");
    }
}

fn print_error(controller: &SubmissionController<TerminalChart>) {
    if let Some(error) = &controller.page().error {
        eprintln!("{error}");
    }
}
