use crate::conf::{ConfigError, RuntimeConfig, load_config};
use std::path::PathBuf;

pub fn check(path: PathBuf) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            for line in summary(&cfg) {
                println!("{line}");
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{err}");
            if let Some(hint) = config_error_hint(&err) {
                eprintln!();
                eprintln!("{hint}");
            }
            std::process::exit(1);
        }
    }
}

pub fn summary(cfg: &RuntimeConfig) -> Vec<String> {
    let scheme = if cfg.listener.tls.is_some() {
        "https"
    } else {
        "http"
    };

    let mut lines = vec![
        "✔ Config loaded successfully".to_string(),
        format!("✔ listening on {scheme}://{}", cfg.listener.addr),
        format!("✔ ipfs gateway {}", cfg.gateways.ipfs),
        format!("✔ grove gateway {}", cfg.gateways.grove),
    ];

    if let Some(threads) = cfg.server.threads {
        lines.push(format!("✔ {threads} worker threads"));
    }

    lines
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::InvalidVersion { .. } => Some(
            "The only supported config version is 1.\n\
             \n\
             server {\n\
             \x20 version = 1\n\
             }",
        ),

        ConfigError::InvalidListenAddr { .. } => Some(
            "Listener addresses must be an IP and port.\n\
             \n\
             listener {\n\
             \x20 addr = \"0.0.0.0:3000\"\n\
             }",
        ),

        ConfigError::InvalidGateway { .. } => Some(
            "Gateways must be bare http(s) origins, without a path.\n\
             \n\
             This also applies to the DEFAULT_GATEWAY and DEFAULT_GROVE_GATEWAY\n\
             environment variables.\n\
             \n\
             gateways {\n\
             \x20 ipfs  = \"https://cloudflare-ipfs.com\"\n\
             \x20 grove = \"https://api.grove.storage\"\n\
             }",
        ),

        _ => None,
    }
}
