use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;

const CONFIG_TEMPLATE: &str = include_str!("../../../config-templates/cidway.hcl");

pub fn init(path: PathBuf) -> Result<()> {
    // Refuse to overwrite an existing config
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    fs::write(&path, CONFIG_TEMPLATE)
        .with_context(|| format!("failed to write {}", path.display()))?;

    // User feedback
    println!("✔ Initialized cidway config at {}", path.display());
    println!();
    println!("Next steps:");
    println!("  cidway config check {}", path.display());
    println!("  cidway run --config {}", path.display());

    Ok(())
}

pub fn template() -> &'static str {
    CONFIG_TEMPLATE
}
