use std::process::ExitCode;

use metro_server::bookings::BookingRecorder;
use metro_server::config::AppConfig;
use metro_server::network::{NetworkModel, load_network, red_line};
use metro_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "metro_server=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Load the network (fail fast if the file is unusable)
    let network: NetworkModel = match &config.network_file {
        Some(path) => match load_network(path) {
            Ok(network) => network,
            Err(e) => {
                error!(error = %e, "Failed to load network");
                return ExitCode::FAILURE;
            }
        },
        None => match red_line() {
            Ok(network) => network,
            Err(e) => {
                error!(error = %e, "Built-in network is invalid");
                return ExitCode::FAILURE;
            }
        },
    };
    info!(
        network = network.name().unwrap_or("unnamed"),
        stations = network.station_count(),
        edges = network.edge_count(),
        "Loaded network"
    );

    let state = AppState::new(
        network,
        config.planner.clone(),
        &config.route_cache,
        BookingRecorder::new(),
    );
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %config.bind_addr, "Metro journey planner listening");
    info!("  GET  /health               - Health check");
    info!("  GET  /api/stations         - List stations");
    info!("  GET  /api/route?from=&to=  - Shortest route and fare");
    info!("  GET  /api/fare?distance_km= - Fare for a distance");
    info!("  POST /api/bookings         - Book a ticket");
    info!("  GET  /api/bookings[/{{id}}]  - Booking history");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
