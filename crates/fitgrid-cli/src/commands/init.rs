use std::path::Path;

use anyhow::{Context, bail};
use fitgrid_core::InventoryConfig;

pub fn run(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let content = InventoryConfig::demo().to_toml_string()?;
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("✓ Generated {}", path.display());

    Ok(())
}
