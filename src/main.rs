use actix_cors::Cors;
use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use careerlog_backend::{
    background_task::start_purge_task,
    db::postgres::{create_pool, init_schema},
    graceful_shutdown::shutdown_signal,
    middlewares::auth::AuthMiddleware,
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = create_pool(&config.database_url)
        .await
        .expect("Failed to create database connection pool");

    init_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    let app_state = web::Data::new(AppState::new(&config, pool));

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        if let Err(e) = app_state.auth_handler.ensure_admin(email, password).await {
            tracing::error!("Admin seeding failed: {}", e);
        }
    }

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let app_state_clone = app_state.clone();
    let cors_origins = config.cors_allowed_origins.clone();
    let worker_count = config.worker_count;

    let server = HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allow_any_header()
            .max_age(3600);

        if cors_origins.iter().any(|origin| origin == "*") {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        // NormalizePath sits outside AuthMiddleware so trailing-slash
        // requests are trimmed before the public-route check.
        App::new()
            .app_data(app_state.clone())
            .wrap(AuthMiddleware)
            .wrap(TracingLogger::default())
            .wrap(NormalizePath::trim())
            .wrap(cors)
            .configure(configure_routes)
    })
    .workers(worker_count)
    .bind(server_addr)?
    .run();

    tokio::spawn(start_purge_task(app_state_clone.auth_handler.user_repo.clone()));

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
