use std::process::exit;

use log::{error, info};
use tokio::net::TcpListener;

use huddle::integration::{self, db};
use huddle::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = integration::init_logger() {
        eprintln!("could not initialize logger: {e}");
        exit(1);
    }

    let config = match integration::Config::env() {
        Ok(c) => c,
        Err(integration::Error::MissingCredentials(tried)) => {
            error!("mongo credentials not found, looked in:");
            for path in tried {
                error!("  {}", path.display());
            }
            exit(1);
        }
        Err(e) => {
            error!("invalid configuration: {e}");
            exit(1);
        }
    };

    let database = match config.mongo.connect() {
        Ok(db) => db,
        Err(e) => {
            error!("could not initialize mongo client: {e}");
            exit(1);
        }
    };

    if let Err(e) = db::ping(&database).await {
        error!("mongo is not reachable: {e}");
        exit(1);
    }

    let addr = config.env.addr();
    let app = huddle::app(AppState::new(&database), &config.env, &config.static_root);

    info!("{}", "=".repeat(60));
    info!("THE HUDDLE - student networking platform");
    info!("server:    http://{addr}");
    info!("database:  mongodb/{}", config.mongo.db());
    info!("static:    {}", config.static_root.display());
    info!("test:      http://{addr}/test");
    info!("health:    http://{addr}/health");
    info!("{}", "=".repeat(60));

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("could not bind {addr}: {e}");
            exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {e}");
        exit(1);
    }

    info!("server stopped");
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received ctrl+c, shutting down"),
        Err(e) => {
            error!("could not listen for shutdown signal: {e}");
            std::future::pending::<()>().await
        }
    }
}
