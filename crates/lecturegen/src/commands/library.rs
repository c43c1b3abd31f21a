use anyhow::{Context, Result};
use colored::Colorize;
use inquire::InquireError;
use std::path::PathBuf;

use crate::app;
use crate::cli::LibraryCommands;
use crate::config::Config;
use crate::library::SavedLecture;
use crate::parser::Deck;
use crate::workflow::review::ReviewSession;

use super::{answered, open_library, present, preview};

pub fn run(command: LibraryCommands, quiet: bool) -> Result<()> {
    let config = Config::load_or_default();
    let mut library = open_library(&config)?;

    match command {
        LibraryCommands::List => {
            let lectures = library.list();
            if lectures.is_empty() {
                if !quiet {
                    println!("{}", "No saved lectures yet.".yellow());
                }
                return Ok(());
            }
            for lecture in lectures {
                println!("{}", list_line(lecture));
            }
            if !quiet {
                println!(
                    "{}",
                    format!("{} lecture(s) in {}", library.len(), library.path().display()).dimmed()
                );
            }
        }
        LibraryCommands::Show { id } => {
            let lecture = library.resolve(&id)?;
            let review = ReviewSession::from_saved(lecture)?;
            println!(
                "{}  {}",
                lecture.title.bold(),
                format!("{} \u{00b7} {}", lecture.short_id(), lecture.created_at_display()).dimmed()
            );
            println!();
            print!("{}", preview::render_deck(review.deck(), true));
        }
        LibraryCommands::Present { id, windowed } => {
            let lecture = library.resolve(&id)?;
            let review = ReviewSession::from_saved(lecture)?;
            let options = present::options_for(review.deck(), 0, windowed);
            app::run(review.deck().slides(), options)?;
        }
        LibraryCommands::Export { id, output } => {
            let lecture = library.resolve(&id)?;
            let path = output.unwrap_or_else(|| default_export_path(lecture));
            if path.exists() {
                let overwrite = answered(
                    inquire::Confirm::new(&format!("{} exists. Overwrite?", path.display()))
                        .with_default(false)
                        .prompt(),
                )?;
                if overwrite != Some(true) {
                    return Ok(());
                }
            }
            std::fs::write(&path, &lecture.content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} {}", "Exported to".green(), path.display());
        }
        LibraryCommands::Import { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            if Deck::from_markdown(&content).is_empty() {
                anyhow::bail!("No slides found in {}", file.display());
            }
            let saved = library.save(&content)?;
            println!(
                "{} \"{}\" as {}",
                "Imported".green(),
                saved.title,
                saved.short_id().yellow()
            );
        }
        LibraryCommands::Delete { id, yes } => {
            let lecture = library.resolve(&id)?;
            let (id, title) = (lecture.id.clone(), lecture.title.clone());
            let confirmed = confirm_delete(yes, || {
                inquire::Confirm::new(&format!("Delete \"{title}\"?"))
                    .with_default(false)
                    .prompt()
            })?;
            let removed = library.delete(&id, |_| confirmed)?;
            match removed {
                Some(lecture) => println!("{} \"{}\"", "Deleted".green(), lecture.title),
                None if !quiet => println!("{}", "Kept.".dimmed()),
                None => {}
            }
        }
    }
    Ok(())
}

/// `--yes` skips the prompt. A cancelled prompt keeps the lecture; any other
/// prompt failure is an error.
fn confirm_delete(
    yes: bool,
    ask: impl FnOnce() -> std::result::Result<bool, InquireError>,
) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(answered(ask())? == Some(true))
}

/// One row of `library list`.
pub fn list_line(lecture: &SavedLecture) -> String {
    let slides = lecture
        .rendered_slides
        .as_ref()
        .map(|s| format!("{} slides", s.len()))
        .unwrap_or_default();
    format!(
        "{}  {}  {}  {}",
        lecture.short_id().yellow(),
        lecture.created_at_display().dimmed(),
        lecture.title,
        slides.dimmed()
    )
}

/// `<title>.md` with characters that are awkward in file names replaced.
fn default_export_path(lecture: &SavedLecture) -> PathBuf {
    let stem: String = lecture
        .title
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        PathBuf::from(format!("lecture-{}.md", lecture.short_id()))
    } else {
        PathBuf::from(format!("{stem}.md"))
    }
}
