//! Crowd forecast entry point: CLI wiring and config-driven engine construction.

use std::path::Path;
use std::process;
use std::time::Duration;

use chrono::{NaiveDateTime, Timelike};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crowd_forecast::cli::{self, CliOptions};
use crowd_forecast::config::ForecastConfig;
use crowd_forecast::forecast::ForecastReport;
use crowd_forecast::geo::Coordinate;
use crowd_forecast::io::export::{export_forecast_csv, export_hourly_csv};
use crowd_forecast::live::LiveFeed;
use crowd_forecast::location::{LocationStore, OfflineEnricher, UserLocation, resolve_location};
use crowd_forecast::random;

fn load_config(cli: &CliOptions) -> ForecastConfig {
    // --config takes priority, then --preset, then the nyc default
    let loaded = if let Some(ref path) = cli.config {
        ForecastConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        ForecastConfig::from_preset(name)
    } else {
        Ok(ForecastConfig::nyc())
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    })
}

/// Picks the user location: explicit coordinate, then the saved one, then config.
fn pick_location(
    cli: &CliOptions,
    config: &ForecastConfig,
    store: Option<&LocationStore>,
) -> UserLocation {
    if let (Some(lat), Some(lng)) = (cli.lat, cli.lng) {
        return resolve_location(Coordinate { lat, lng }, &OfflineEnricher);
    }

    if let Some(store) = store {
        match store.load() {
            Ok(Some(saved)) => {
                tracing::info!("using saved location {}", saved.display_name());
                return saved;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("could not read saved location: {e}"),
        }
    }

    let configured = config.user_location();
    if configured.name.is_some() {
        configured
    } else {
        resolve_location(configured.coordinate(), &OfflineEnricher)
    }
}

fn start_time(hour: Option<u32>) -> NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    match hour {
        Some(h) => now.with_hour(h).unwrap_or(now),
        None => now,
    }
}

fn print_report(report: &ForecastReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("error: failed to serialize report: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{report}");
    }
}

fn export(report: &ForecastReport, cli: &CliOptions) {
    if let Some(ref path) = cli.forecast_out {
        if let Err(e) = export_forecast_csv(&report.forecast, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("24-hour forecast written to {}", path.display());
    }
    if let Some(ref path) = cli.hourly_out {
        if let Err(e) = export_hourly_csv(&report.hourly, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Hourly forecast written to {}", path.display());
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crowd_forecast=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });

    let mut config = load_config(&cli);

    if let Some(seed) = cli.seed {
        config.forecast.seed = Some(seed);
    }
    if let Some(n) = cli.refreshes {
        config.live.refreshes = n;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let store = cli.state_dir.as_deref().map(LocationStore::new);
    let location = pick_location(&cli, &config, store.as_ref());
    if let Err(e) = location.coordinate().validate() {
        eprintln!("error: {e}");
        process::exit(1);
    }
    if let Some(ref store) = store {
        if let Err(e) = store.save(&location) {
            tracing::warn!("could not save location to {}: {e}", store.path().display());
        }
    }

    let engine = config.build_engine();
    let mut rng = random::source_for(config.forecast.seed);
    let refresh = Duration::from_secs(config.live.refresh_secs);
    let mut feed = LiveFeed::new(
        &engine,
        location,
        start_time(cli.hour),
        config.live.refresh_secs,
        config.live.refreshes,
    )
    .unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    let mut last = None;
    while let Some(next) = feed.next_report(&mut rng) {
        let report = next.unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(1);
        });
        print_report(&report, cli.json);
        last = Some(report);
        if feed.has_next() {
            std::thread::sleep(refresh);
        }
    }

    if let Some(ref report) = last {
        export(report, &cli);
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(crowd_forecast::api::AppState { config, engine });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(crowd_forecast::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
