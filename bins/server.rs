use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> ExitCode {
    // .env first so RUST_LOG and the config overrides take effect
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    std::panic::set_hook(Box::new(|info| {
        error!(event = "panic", message = %info, "unhandled panic in invoke server");
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        table = %cfg.store.table_name,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        version = env!("CARGO_PKG_VERSION"),
        "invoke server starting"
    );

    rt.block_on(async move {
        tokio::select! {
            res = server::run(cfg) => match res {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!(event = "run_failed", error = %e, "invoke server stopped with error");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
