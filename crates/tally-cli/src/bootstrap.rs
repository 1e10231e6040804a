use std::path::Path;

use anyhow::Context;
use tally_config::TallyConfig;

/// Load `.env`, then the layered config, then check it is complete enough to
/// run a report.
pub fn load_config() -> anyhow::Result<TallyConfig> {
    load_dotenv()?;

    let config = TallyConfig::load().context("failed to load configuration")?;
    config
        .validate()
        .context("configuration is incomplete; see .tally/config.toml or TALLY_* variables")?;
    Ok(config)
}

/// Prefer the project's `.tally/.env`, falling back to the usual `.env`
/// lookup from the current directory upwards.
fn load_dotenv() -> anyhow::Result<()> {
    let project_env = Path::new(".tally").join(".env");
    if project_env.exists() {
        dotenvy::from_path(&project_env)
            .with_context(|| format!("failed to load dotenv file at {}", project_env.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}
