//! Golfcast binary entry point

use clap::Parser;
use tracing_subscriber::EnvFilter;

use golfcast::cli::{Cli, Command};
use golfcast::config::GolfcastConfig;
use golfcast::error::GolfcastError;
use golfcast::golf::{GolfOutlook, ScoredBlock, TeeWindow};
use golfcast::location_resolver::{LocationInput, LocationResolver};
use golfcast::models::Location;
use golfcast::outlook::OutlookService;
use golfcast::weather::WeatherService;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli).await {
        let message = e
            .downcast_ref::<GolfcastError>()
            .map_or_else(|| e.to_string(), GolfcastError::user_message);
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    // The server defaults to info, one-shot commands stay quiet
    let default_level = match cli.verbose {
        0 => match cli.command {
            Command::Serve { .. } => "info",
            Command::Forecast { .. } => "warn",
        },
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = GolfcastConfig::load_from_path(cli.config.clone())?;

    match cli.command {
        Command::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            golfcast::web::run(config).await?;
        }
        Command::Forecast { location, json } => {
            run_forecast(config, &location, json).await?;
        }
    }

    Ok(())
}

async fn run_forecast(
    config: GolfcastConfig,
    raw_location: &str,
    json: bool,
) -> anyhow::Result<()> {
    let weather = WeatherService::new(config)?;
    let input = LocationInput::parse(raw_location)?;
    let location = LocationResolver::resolve_location(&weather, input).await?;
    let outlook = OutlookService::generate(&weather, &location).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outlook)?);
    } else {
        print_outlook(&location, &outlook);
    }

    Ok(())
}

fn print_outlook(location: &Location, outlook: &GolfOutlook) {
    println!("Golf outlook for {}", location.name);
    println!();

    if let Some(current) = &outlook.current {
        println!(
            "Now: {:.1}°C (feels like {:.1}°C), wind {:.0} km/h, {}",
            current.temperature, current.feels_like, current.wind_kmh, current.conditions
        );
    }

    if let Some(golf) = &outlook.golf {
        println!(
            "Today: {} {}/100 {}",
            golf.verdict.emoji(),
            golf.score,
            golf.reason
        );
    }

    if let Some(window) = &outlook.best_time.best_window {
        if let Some(label) = window_label(window, &outlook.forecast) {
            println!("Best tee time: {label}");
        }
    }

    if let Some(labels) = &outlook.daylight.labels {
        println!("Daylight: {} to {}", labels.sunrise, labels.sunset);
    }

    println!();
    for day in &outlook.daily {
        println!(
            "{:<22} {} {:>3}/100  {}",
            day.label,
            day.golf.verdict.emoji(),
            day.golf.score,
            day.golf.reason
        );
        println!(
            "{:<22} {:.0} to {:.0}°C, wind up to {:.0} km/h, {:.1} mm precipitation",
            "", day.min_temp, day.max_temp, day.max_wind_kmh, day.total_precipitation_mm
        );
        if let Some(window) = &day.best_window {
            if let Some(label) = window_label(window, &day.blocks) {
                println!("{:<22} best window {label}", "");
            }
        }
    }

    if let Some(ground) = &outlook.ground {
        println!();
        println!(
            "Greens {}: {}",
            ground.greens_speed.label.to_lowercase(),
            ground.greens_speed.detail
        );
        println!(
            "Fairways {}: {}",
            ground.fairway_rollout.label.to_lowercase(),
            ground.fairway_rollout.detail
        );
    }
}

/// Format a tee window as local wall-clock times, e.g. "10:00 to 13:00 (score 85)"
fn window_label(window: &TeeWindow, blocks: &[ScoredBlock]) -> Option<String> {
    let start = blocks
        .iter()
        .find(|block| block.reading.timestamp == window.start)
        .map(|block| block.time_label.as_str())?;

    let label = match shift_label(start, 3) {
        Some(end) => format!("{start} to {end} (score {})", window.avg_score),
        None => format!("{start} (score {})", window.avg_score),
    };
    Some(label)
}

fn shift_label(label: &str, hours: u32) -> Option<String> {
    let (hour, minute) = label.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    Some(format!("{:02}:{minute}", (hour + hours) % 24))
}
