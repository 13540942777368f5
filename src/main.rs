// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;
mod startup;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    log::info!("Starting registro-pasajeros service...");

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    config.log_summary();

    // 4. Connect, initialize the schema and probe, under the retry policy
    let pool = match startup::initialize_database(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            startup::log_failure_guidance(&config);
            // Non-zero exit so the process manager can restart the container
            std::process::exit(1);
        }
    };

    // 5. Start HTTP server on all interfaces
    let server_addr = format!("0.0.0.0:{}", config.server_port);
    log::info!("Server listening on http://{}", server_addr);

    HttpServer::new(move || {
        App::new()
            // Application state (database pool)
            .app_data(web::Data::new(pool.clone()))
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .service(
                web::scope("/api")
                    .configure(handlers::auth_config)
                    .configure(handlers::rutas_config)
                    .configure(handlers::registros_config),
            )
    })
    .bind(&server_addr)?
    .run()
    .await
}
