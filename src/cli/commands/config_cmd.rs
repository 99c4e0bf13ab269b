//! Configuration display command.

use console::style;

use crate::catalog::USER_AGENT;
use crate::cli::icons::dim_arrow;
use crate::config::{Config, Settings};

/// Print where configuration came from and the resolved values.
pub fn cmd_config_show(settings: &Settings, config: &Config) -> anyhow::Result<()> {
    let source = config
        .source_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "none (defaults)".to_string());
    println!("{} {}", style("Config file:").bold(), source);

    let endpoints = settings.endpoints()?;
    let timeout = settings
        .request_timeout
        .map(|t| format!("{}s", t.as_secs()))
        .unwrap_or_else(|| "none".to_string());

    let user_agent = settings
        .user_agent
        .clone()
        .unwrap_or_else(|| USER_AGENT.to_string());

    let rows = [
        ("application", endpoints.application().to_string()),
        ("query", endpoints.query().to_string()),
        ("user_agent", user_agent),
        ("request_timeout", timeout),
        ("time_format", settings.time_format.clone()),
        ("timezone", settings.timezone.to_string()),
        ("bind", settings.bind.clone()),
    ];
    for (key, value) in rows {
        println!("  {} {}: {}", dim_arrow(), key, value);
    }
    Ok(())
}
