//! # Toota Server
//!
//! Binary that wires together all the components:
//! - Pick the settings profile (command line, then environment, then default)
//! - Resolve settings from the environment, failing fast on misconfiguration
//! - Build the database handle
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use opentelemetry::global;
use opentelemetry_sdk::{
    metrics::SdkMeterProvider, propagation::TraceContextPropagator, trace as sdktrace,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toota_hex::{ProcessEnv, SettingsResolver, inbound::HttpServer};
use toota_repo::build_database;
use toota_types::Profile;

#[derive(Parser)]
#[command(name = "toota-server")]
#[command(author, version, about = "Toota backend server", long_about = None)]
struct Cli {
    /// Settings profile (development, production); overrides TOOTA_SETTINGS_MODULE
    #[arg(long, global = true)]
    profile: Option<Profile>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve settings and serve HTTP (default)
    Serve,
    /// Resolve settings, print them without secrets, and exit
    Check,
}

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("toota-server"), provider))
}

/// Exports the HTTP metrics recorded by the router's metrics layer.
fn init_meter() -> anyhow::Result<SdkMeterProvider> {
    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .build()?;

    let provider = SdkMeterProvider::builder()
        .with_periodic_exporter(exporter)
        .build();

    global::set_meter_provider(provider.clone());
    Ok(provider)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // OpenTelemetry export only when a collector is configured
    let otel = match std::env::var_os("OTEL_EXPORTER_OTLP_ENDPOINT") {
        Some(_) => Some((init_tracer()?, init_meter()?)),
        None => None,
    };
    let telemetry = otel
        .as_ref()
        .map(|((tracer, _), _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,toota_app=debug,toota_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    let env = ProcessEnv;

    // Load configuration
    let config = config::Config::from_env(&env, cli.profile)?;
    let settings = SettingsResolver::new(env).resolve(config.profile)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Check => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Command::Serve => {
            tracing::info!(
                profile = %config.profile,
                "Starting toota server on {}",
                config.bind_addr()
            );

            let database = build_database(&settings.database);
            let server = HttpServer::new(Arc::new(settings), database);

            server.run(&config.bind_addr()).await?;
        }
    }

    // Flush traces and metrics before exit
    if let Some(((_, tracer_provider), meter_provider)) = otel {
        let _ = tracer_provider.shutdown();
        let _ = meter_provider.shutdown();
    }
    Ok(())
}
