use anyhow::Result;
use colored::Colorize;

use crate::cli::AiCommands;
use crate::config::Config;
use crate::generation::anthropic::API_KEY_ENV;

pub fn run(command: AiCommands) -> Result<()> {
    match command {
        AiCommands::Status => status(),
    }
}

fn status() -> Result<()> {
    let config = Config::load_or_default();

    println!("{}", "AI service".bold());
    println!("  Model:    {}", config.model());
    println!("  Endpoint: {}", config.base_url());
    println!("  Language: {}", config.language());

    let configured = config
        .ai
        .as_ref()
        .and_then(|a| a.api_key.as_deref())
        .is_some_and(|k| !k.is_empty());
    match config.api_key() {
        Some(_) if configured => println!("  API key:  {}", "from config".green()),
        Some(_) => println!("  API key:  {}", format!("from {API_KEY_ENV}").green()),
        None => {
            println!("  API key:  {}", "missing".red());
            println!();
            println!(
                "Set {API_KEY_ENV} or run `lecturegen config set ai.api_key <KEY>` to enable generation."
            );
        }
    }
    Ok(())
}
