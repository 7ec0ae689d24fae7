use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use plaudit_proxy::{logger, router, ProxyState};
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(
    name = "plaudit-proxy",
    version,
    about = "Local-development CORS relay for the Plaudit widgets API"
)]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PROXY_PORT", default_value_t = 5000)]
    port: u16,

    /// Backend the /api prefix forwards to.
    #[arg(long, env = "API_TARGET", default_value = "http://localhost:3000")]
    target: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger();

    let app = router(ProxyState::new(args.target.clone()));
    let addr: SocketAddr = ([127, 0, 0, 1], args.port).into();
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, target = %args.target, "CORS relay listening");
    axum::serve(listener, app).await?;
    Ok(())
}
