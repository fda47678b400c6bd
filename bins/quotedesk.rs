use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> ExitCode {
    // .env first so RUST_LOG / DATABASE_URL are visible to config loading
    dotenv().ok();

    let cfg = match configs::AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "quotedesk", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(cfg.logging.format);
    info!(service = "quotedesk", event = "logger_init", "tracing subscriber initialized");

    let instance_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "quotedesk", event = "panic", %instance_id, pid, message = %info, "unhandled panic occurred");
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "quotedesk", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "quotedesk",
        event = "start",
        %instance_id,
        pid,
        version,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "quotedesk starting"
    );

    // serve returns after Ctrl+C once in-flight requests drain
    match rt.block_on(server::run_with_config(cfg)) {
        Ok(()) => {
            info!(service = "quotedesk", event = "stop", %instance_id, pid, "server stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "quotedesk", event = "run_failed", error = %e, "server exited with error");
            ExitCode::FAILURE
        }
    }
}
