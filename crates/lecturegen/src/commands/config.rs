use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();

    let key_status = if config.api_key().is_some() {
        "set".green()
    } else {
        "not set".red()
    };
    let library = config
        .library_dir()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|e| e.to_string());

    println!("{}", "defaults".bold());
    println!("  theme:    {}", config.theme());
    println!("  windowed: {}", config.windowed());
    println!("  language: {}", config.language());
    println!("{}", "ai".bold());
    println!("  model:    {}", config.model());
    println!("  base_url: {}", config.base_url());
    println!("  api_key:  {key_status}");
    println!("{}", "library".bold());
    println!("  dir:      {library}");
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    let shown = if key == "ai.api_key" { "********" } else { value };
    println!("{} {key} = {shown} ({})", "Saved".green(), path.display());
    Ok(())
}
