use anyhow::{Context, Result};
use std::path::Path;

use crate::app::{self, PresentOptions};
use crate::config::Config;
use crate::parser::Deck;

/// Present any markdown deck from disk.
pub fn run(file: &Path, windowed: bool, slide: Option<usize>) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let deck = Deck::from_markdown(&content);
    if deck.is_empty() {
        anyhow::bail!("No slides found in {}", file.display());
    }

    let start = slide.map(|s| s.saturating_sub(1)).unwrap_or(0);
    let mut options = options_for(&deck, start, windowed);
    options.title = format!(
        "{} - {}",
        options.title,
        file.file_name().unwrap_or_default().to_string_lossy()
    );
    app::run(deck.slides(), options)?;
    Ok(())
}

/// Options for presenting a lecture that is already loaded.
pub fn options_for(deck: &Deck, start: usize, windowed: bool) -> PresentOptions {
    let config = Config::load_or_default();
    PresentOptions {
        title: deck.title(),
        windowed: windowed || config.windowed(),
        start,
        theme: config.theme().to_string(),
    }
}
