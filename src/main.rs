//! Service entry point: CLI wiring, config loading, and server startup.

use std::net::SocketAddr;
use std::process;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wattwise::api::{self, AppState};
use wattwise::catalog::FixtureCatalog;
use wattwise::cli;
use wattwise::config::AppConfig;
use wattwise::export::export_csv;
use wattwise::series;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let opts = match cli::parse_args() {
        Ok(opts) => opts,
        Err(message) => {
            eprintln!("error: {message}");
            cli::print_usage();
            process::exit(1);
        }
    };

    let mut config = match &opts.config {
        Some(path) => match AppConfig::from_toml_file(path) {
            Ok(config) => {
                info!("configuration loaded from {}", path.display());
                config
            }
            Err(err) => {
                eprintln!("error: {err}");
                process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    if let Some(port) = opts.port {
        config.server.port = port;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for err in &errors {
            eprintln!("error: {err}");
        }
        process::exit(1);
    }

    if let Some(path) = &opts.export {
        let samples = match series::generate(
            Utc::now(),
            config.profile.horizon_hours,
            &config.profile.load_profile(),
            config.tariff.rate_per_kwh,
        ) {
            Ok(samples) => samples,
            Err(err) => {
                eprintln!("error: {err}");
                process::exit(1);
            }
        };
        if let Err(err) = export_csv(&samples, path) {
            eprintln!("error: failed to write \"{}\": {err}", path.display());
            process::exit(1);
        }
        info!(
            "exported {} samples to {}",
            samples.len(),
            path.display()
        );
        return;
    }

    let addr: SocketAddr = match format!("{}:{}", config.server.host, config.server.port).parse() {
        Ok(addr) => addr,
        Err(err) => {
            eprintln!(
                "error: invalid bind address {}:{}: {err}",
                config.server.host, config.server.port
            );
            process::exit(1);
        }
    };

    let state = Arc::new(AppState {
        config,
        catalog: Box::new(FixtureCatalog::household()),
    });

    if let Err(err) = api::serve(state, addr).await {
        eprintln!("error: server failed: {err}");
        process::exit(1);
    }
}
