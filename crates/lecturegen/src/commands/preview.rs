use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::parser::Deck;
use crate::render::{self, RenderMode, terminal};

pub fn run(file: &Path, notes: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let deck = Deck::from_markdown(&content);
    if deck.is_empty() {
        anyhow::bail!("No slides found in {}", file.display());
    }

    print!("{}", render_deck(&deck, notes));
    println!("{}", format!("{} slide(s)", deck.len()).dimmed());
    Ok(())
}

/// Every slide of `deck`, formatted for the terminal and separated by rules.
pub fn render_deck(deck: &Deck, notes: bool) -> String {
    let mode = if notes {
        RenderMode::Review
    } else {
        RenderMode::Presentation
    };
    let rule = "\u{2500}".repeat(60);
    let mut out = String::new();
    for (i, slide) in deck.slides().iter().enumerate() {
        let view = render::render_slide(slide, mode);
        out.push_str(&terminal::format_slide(&view, i, deck.len()));
        out.push_str(&format!("{}\n", rule.dimmed()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_only_when_asked() {
        let deck = Deck::from_markdown("# A\n- one\n> note for A\n# B\ntext\n");
        let without = render_deck(&deck, false);
        assert!(without.contains("Slide 2 / 2"));
        assert!(!without.contains("note for A"));
        assert!(render_deck(&deck, true).contains("note for A"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("nope.md"), false).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
