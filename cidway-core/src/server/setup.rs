use crate::conf::RuntimeConfig;
use crate::proxy::CidwayGateway;
use crate::server::pid::PidFile;
use crate::server::runtime::{RuntimeState, build_runtime_state};
use anyhow::{Result, anyhow};
use pingora::prelude::*;
use pingora::server::Server;
use pingora::server::configuration::ServerConf;
use std::sync::Arc;

/// Run the Pingora server with the given configuration.
pub fn run(config: RuntimeConfig) -> Result<()> {
    // Attempt to write pid file (best-effort)
    let pid_file = config
        .server
        .pid_file
        .as_ref()
        .and_then(|path| match PidFile::create(path) {
            Ok(pid_file) => {
                tracing::info!(pid_file = %path.display(), "pid file written");
                Some(pid_file)
            }
            Err(e) => {
                tracing::warn!(error = %e, pid_file = %path.display(), "failed to write pid file; continuing");
                None
            }
        });

    let state = Arc::new(build_runtime_state(&config)?);

    // Build Pingora server (Pingora owns its own runtimes)
    let server = build_pingora_server(&config, state)?;

    // Ensure pid file cleanup on shutdown
    if let Some(pid_file) = pid_file {
        ctrlc::set_handler(move || {
            tracing::info!("shutdown requested, removing pid file");
            pid_file.remove();
            std::process::exit(0);
        })?;
    }

    tracing::info!(
        addr = %config.listener.addr,
        tls = config.listener.tls.is_some(),
        "cidway listening"
    );

    server.run_forever();
}

/// Build the Pingora server.
pub fn build_pingora_server(config: &RuntimeConfig, state: Arc<RuntimeState>) -> Result<Server> {
    let mut server = if let Some(threads) = config.server.threads {
        tracing::debug!(
            threads,
            "Creating Pingora server with overridden worker threads"
        );
        let mut conf = ServerConf::new()
            .ok_or_else(|| anyhow!("could not construct pingora server configuration"))?;
        conf.threads = threads;
        Server::new_with_opt_and_conf(None, conf)
    } else {
        // Create a Pingora server with default settings.
        // "None" is required here to truly tell Pingora to use its default settings.
        Server::new(None)?
    };

    server.bootstrap();

    let gateway = CidwayGateway::new(state);

    // Build HTTP proxy service from Pingora.
    let mut svc = http_proxy_service(&server.configuration, gateway);
    if let Some(tls) = &config.listener.tls {
        svc.add_tls(&config.listener.addr, &tls.cert, &tls.key)?;
    } else {
        svc.add_tcp(&config.listener.addr);
    }

    // Register service.
    server.add_service(svc);

    Ok(server)
}
