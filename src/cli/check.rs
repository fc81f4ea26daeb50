// src/cli/check.rs
// Read-only configuration report

use super::AppContext;
use anyhow::{Result, bail};
use nextmove::config::FileConfig;

pub fn run_config_check(ctx: &AppContext) -> Result<()> {
    let env = &ctx.env;
    println!("Data dir:  {}", env.data_dir.display());
    println!("Config:    {}", FileConfig::config_path(&env.data_dir).display());
    println!(
        "API base:  {}",
        env.api_base_url.as_deref().unwrap_or("(not set)")
    );
    println!("Timeout:   {}s", env.request_timeout.as_secs());
    println!("Locale:    {}", env.locale);
    println!(
        "Styles:    {} (default {})",
        ctx.style_labels(),
        ctx.catalog.default_style()
    );
    println!("Characters: {}", ctx.catalog.characters().len());
    println!();

    let validation = env.validate();
    println!("{}", validation.report());
    if !validation.is_valid() {
        bail!("configuration has {} error(s)", validation.errors.len());
    }
    Ok(())
}
