use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use resume_builder::{
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    middlewares::{auth::AuthMiddleware, cors::build_cors},
    routes::configure_routes,
    settings::{AppConfig, StoreBackend},
    shared_repos::SharedRepositories,
    AppState,
};

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,actix_server=warn"));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new().context("Configuration error")?;
    init_tracing(&config);
    tracing::info!("Loaded configuration: {:?}", config);

    let repos = match config.store_backend {
        StoreBackend::Postgres => {
            let pool = create_pool(&config.database_url)
                .await
                .context("Failed to create database connection pool")?;
            run_migrations(&pool)
                .await
                .context("Failed to apply database migrations")?;
            SharedRepositories::postgres(pool)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory record store; data is lost on restart");
            SharedRepositories::in_memory()
        }
    };

    let app_state = web::Data::new(AppState::new(&config, repos));
    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let cors_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(AuthMiddleware)
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .wrap(build_cors(&cors_config))
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run();

    tokio::select! {
        res = server => res.context("HTTP server error")?,
        _ = shutdown_signal() => {},
    }

    tracing::info!("Server stopped");
    Ok(())
}
