mod routes;
mod singleton;
mod state;

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use weekplan_notify::scheduler::DEFAULT_TICK;

use crate::singleton::InstanceLock;
use crate::state::AppState;

const DEFAULT_PORT: u16 = 3001;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "weekplan_server=info,weekplan_notify=info,weekplan_llm=info".into()
            }),
        )
        .init();

    // Ensure only one instance is running
    let _lock = InstanceLock::acquire()?;

    let state = AppState::new()?;

    // One periodic tick drives every armed reminder
    state
        .scheduler
        .clone()
        .run(state.dispatcher.clone(), DEFAULT_TICK);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::notifications::router())
        .merge(routes::schedule::router())
        .with_state(state)
        .layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT));
    println!("weekplan-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
