use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use workload::format_report;

mod config;

use config::{Config, Format};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let table = config
        .workload
        .table()
        .context("invalid process in workload")?;
    let request = config.workload.request().context("invalid policy")?;
    info!(policy = %request.policy, processes = table.len(), "running workload");

    let result = table.simulate(request)?;

    match config.format {
        Format::Text => println!("{}", format_report(&result)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests;
