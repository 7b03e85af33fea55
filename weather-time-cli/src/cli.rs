use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use tokio::task::JoinSet;
use weather_time_core::{
    AgentManifest, Config, OpenMeteoProvider, Report, ToolKind, WeatherTimeProvider, dispatch,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-time", version, about = "Weather and local time for US cities")]
pub struct Cli {
    /// Log outbound requests and resolutions to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current weather for a city.
    Weather {
        city: String,

        /// Print the raw Report JSON instead of the sentence.
        #[arg(long)]
        json: bool,
    },

    /// Show the current local time for a city.
    Time {
        city: String,

        #[arg(long)]
        json: bool,
    },

    /// Run both tools for several cities concurrently.
    Report {
        #[arg(required = true)]
        cities: Vec<String>,
    },

    /// Call a tool the way an agent host would, e.g. `call get_weather '{"city":"Boston"}'`.
    Call {
        tool: String,

        /// JSON object with the tool arguments.
        args: String,
    },

    /// Print the agent manifest (tool declarations) as JSON.
    Manifest,

    /// Edit endpoints, country and timeout interactively.
    Configure {
        /// Restore default settings without prompting.
        #[arg(long)]
        reset: bool,
    },
}

impl Cli {
    /// Returns whether every tool call succeeded.
    pub async fn run(self) -> anyhow::Result<bool> {
        match self.command {
            Command::Weather { city, json } => {
                let provider = provider_from_disk()?;
                let report = provider.get_weather(&city).await;
                print_report(&report, json)
            }
            Command::Time { city, json } => {
                let provider = provider_from_disk()?;
                let report = provider.get_current_time(&city).await;
                print_report(&report, json)
            }
            Command::Report { cities } => run_report(provider_from_disk()?, cities).await,
            Command::Call { tool, args } => {
                let args: serde_json::Value =
                    serde_json::from_str(&args).context("Tool arguments must be valid JSON")?;
                let provider = provider_from_disk()?;
                let report = dispatch(&provider, &tool, &args).await;
                print_report(&report, true)
            }
            Command::Manifest => {
                let manifest = serde_json::to_string_pretty(&AgentManifest::default())
                    .context("Failed to serialize agent manifest")?;
                println!("{manifest}");
                Ok(true)
            }
            Command::Configure { reset } => {
                configure(reset)?;
                Ok(true)
            }
        }
    }
}

fn provider_from_disk() -> anyhow::Result<OpenMeteoProvider> {
    let config = Config::load()?;
    tracing::debug!(
        geocoding = %config.geocoding_endpoint,
        forecast = %config.forecast_endpoint,
        timeout_secs = config.timeout_secs,
        "loaded configuration"
    );
    OpenMeteoProvider::new(&config)
}

fn print_report(report: &Report, json: bool) -> anyhow::Result<bool> {
    if json {
        let out = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{out}");
    } else {
        match report {
            Report::Success { report } => println!("{report}"),
            Report::Error { error_message } => eprintln!("error: {error_message}"),
        }
    }

    Ok(report.is_success())
}

async fn run_report(provider: OpenMeteoProvider, cities: Vec<String>) -> anyhow::Result<bool> {
    let provider = Arc::new(provider);
    let mut tasks = JoinSet::new();

    for (idx, city) in cities.into_iter().enumerate() {
        for (slot, tool) in ToolKind::all().iter().copied().enumerate() {
            let provider = Arc::clone(&provider);
            let city = city.clone();
            tasks.spawn(async move {
                let report = provider.invoke(tool, &city).await;
                ((idx, slot), report)
            });
        }
    }

    // Tasks finish in any order; print in input order.
    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let joined = joined.inspect_err(|err| tracing::error!(error = %err, "tool task failed"));
        results.push(joined.context("Tool task panicked")?);
    }
    results.sort_by_key(|(order, _)| *order);

    let mut all_ok = true;
    for (_, report) in &results {
        all_ok &= print_report(report, false)?;
    }

    Ok(all_ok)
}

fn configure(reset: bool) -> anyhow::Result<()> {
    let path = Config::config_file_path()?;

    let config = if reset {
        Config::default()
    } else {
        let current = Config::load()?;

        let geocoding_endpoint = Text::new("Geocoding endpoint:")
            .with_default(&current.geocoding_endpoint)
            .prompt()?;
        let forecast_endpoint = Text::new("Forecast endpoint:")
            .with_default(&current.forecast_endpoint)
            .prompt()?;
        let country_code = Text::new("Country code for city search:")
            .with_default(&current.country_code)
            .prompt()?;
        let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
            .with_default(current.timeout_secs)
            .with_error_message("Please enter a whole number of seconds")
            .prompt()?;

        Config {
            geocoding_endpoint,
            forecast_endpoint,
            country_code: country_code.trim().to_uppercase(),
            timeout_secs,
        }
    };

    config.validate()?;
    config.save()?;
    tracing::info!(path = %path.display(), "saved configuration");
    println!("Saved configuration to {}", path.display());

    Ok(())
}
