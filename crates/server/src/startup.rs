use std::{net::SocketAddr, sync::Arc};

use aws_config::BehaviorVersion;
use axum::Router;
use service::{store::DynamoRecordStore, Dispatcher, RetryPolicy};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &configs::ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

/// Build the app against the configured table and serve it. The caller owns
/// logging setup and config loading.
pub async fn run(cfg: configs::AppConfig) -> anyhow::Result<()> {
    let addr = bind_addr(&cfg.server)?;

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = Arc::new(DynamoRecordStore::new(&sdk_config, &cfg.store));
    let dispatcher = Arc::new(Dispatcher::new(store, RetryPolicy::from_config(&cfg.retry)));

    let app: Router = routes::build_router(dispatcher, build_cors());

    info!(%addr, table = %cfg.store.table_name, "starting invoke server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() -> anyhow::Result<()> {
        let cfg = configs::ServerConfig { host: "0.0.0.0".into(), port: 9090, worker_threads: None };
        assert_eq!(bind_addr(&cfg)?, "0.0.0.0:9090".parse::<SocketAddr>()?);
        Ok(())
    }

    #[test]
    fn bind_addr_rejects_garbage_host() {
        let cfg = configs::ServerConfig { host: "not a host".into(), port: 9090, worker_threads: None };
        assert!(bind_addr(&cfg).is_err());
    }

    #[tokio::test]
    async fn run_uses_the_config_it_is_given() {
        let mut cfg = configs::AppConfig::default();
        cfg.server.host = "not a host".into();
        // fails on the supplied bind address, before any client is built
        assert!(run(cfg).await.is_err());
    }
}
