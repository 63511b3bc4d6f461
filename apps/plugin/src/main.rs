use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};

use relicta_slack::config;
use relicta_slack::routes;
use relicta_slack::services::{SlackClient, SlackPlugin};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Load configuration
    let config = config::Config::from_env().map_err(|e| {
        log::error!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // One connection pool for every delivery
    let client = SlackClient::new(config.slack.timeout).map_err(|e| {
        log::error!("HTTP client error: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    let plugin = web::Data::new(SlackPlugin::with_rules(
        Arc::new(client),
        config.slack.webhook_rules(),
    ));

    log::info!(
        "Starting Relicta Slack plugin on {}:{} (webhook host {})",
        config.host,
        config.port,
        config.slack.webhook_host
    );

    let host = config.host.clone();
    let port = config.port;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(plugin.clone())
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(routes::health::liveness))
            .configure(routes::plugin::configure)
    })
    .bind((host.as_str(), port))?
    .shutdown_timeout(30)
    .run();

    // Spawn graceful shutdown handler
    let server_handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        log::info!("Shutdown signal received, stopping server...");
        server_handle.stop(true).await;
    });

    server.await
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                log::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
