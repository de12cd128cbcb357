use std::net::SocketAddr;

use miniblog::{init_tracing, make_router, run_app};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let addr = SocketAddr::from(([127, 0, 0, 1], 8000));
    let router = make_router();
    tracing::info!("server started on {}", addr);
    if let Err(error) = run_app(router, addr).await {
        tracing::error!("server exited with error: {}", error);
    }
}
