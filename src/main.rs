use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Serve relative to the install directory, not the caller's cwd.
    chdir_to_install_dir()?;

    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

/// Change the working directory to the directory containing the executable.
///
/// File resolution is relative to the served root, so the server must behave
/// the same no matter where it was invoked from.
fn chdir_to_install_dir() -> std::io::Result<()> {
    let exe = std::env::current_exe()?;
    if let Some(dir) = exe.parent() {
        std::env::set_current_dir(dir)?;
    }
    Ok(())
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // Bind before anything else: a busy port is fatal at startup.
    let listener = server::bind_listener(addr)?;

    let state = Arc::new(config::AppState::new(&cfg));
    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&addr, &cfg);

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::run_server_loop(listener, state, signals))
        .await
}
