use std::net::{IpAddr, SocketAddr};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub struct Options {
    pub address: IpAddr,
    pub port: u16,
}

impl Options {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

/// Build the application router.
pub fn app() -> Router {
    crate::mortgage::http::routes().layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

pub async fn serve(opts: Options) -> anyhow::Result<()> {
    let addr = opts.socket_addr();

    let server = axum::Server::try_bind(&addr)?.serve(app().into_make_service());

    info!(%addr, "Listening for calculation requests.");

    server.with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal."),
        Err(error) => {
            error!(?error, "Failed to install shutdown signal handler.");

            std::future::pending::<()>().await;
        }
    }
}
