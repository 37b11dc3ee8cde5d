pub mod routes;

use crate::config::ServerConfig;
use anyhow::Context;
use log::info;
use std::sync::Arc;

/// Serves the API until Ctrl+C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let routes = routes::api(Arc::new(config.samples));
    let (bound, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown(addr, async {
            if tokio::signal::ctrl_c().await.is_err() {
                log::warn!("ctrl-c handler unavailable; stopping server");
            }
        })
        .with_context(|| format!("binding SAR data server to {}", addr))?;
    info!("serving SAR data on http://{}", bound);
    server.await;
    info!("SAR data server stopped");
    Ok(())
}
