use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use neis::dataset::Dataset;
use neis::{api, cli, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "neis=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    let result = match args.command {
        Some(cli::Commands::Serve { port }) => {
            let port = port.unwrap_or(cfg.port);
            run_server(cfg, port).await
        }
        Some(cli::Commands::Regions) => {
            let dataset = Dataset::load(&cfg.data_dir);
            let state = AppState::new(cfg, dataset);
            if state.regions.is_empty() {
                println!("No regions found in dataset.");
            } else {
                let mut regions: Vec<_> = state.regions.keys().collect();
                regions.sort();
                for region in regions {
                    println!("{}", region);
                }
            }
            Ok(())
        }
        None => {
            let port = cfg.port;
            run_server(cfg, port).await
        }
    };

    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

async fn run_server(cfg: config::Config, port: u16) -> anyhow::Result<()> {
    tracing::info!("Loading dataset from {}...", cfg.data_dir.display());
    let dataset = Dataset::load(&cfg.data_dir);

    let state = Arc::new(AppState::new(cfg, dataset));
    tracing::info!("{} regions in dataset", state.regions.len());

    let app = axum::Router::new()
        // Health endpoint (no auth)
        .route("/healthz", axum::routing::get(|| async { "ok" }))
        .nest("/api", api::api_router(state.clone()))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        // Browsers fetch this API directly, so CORS is wide open.
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(request_id_middleware));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("NEIS API listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Middleware: injects a unique X-Request-Id into every response.
/// This allows clients to correlate errors with server logs.
async fn request_id_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let req_id = uuid::Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(val) = axum::http::HeaderValue::from_str(&req_id) {
        resp.headers_mut().insert("x-request-id", val);
    }
    resp
}
