use colored::Colorize;

use crate::parser::inline::Inline;
use crate::render::{SlideBlock, SlideView};

/// Format a rendered slide for the terminal review screen.
pub fn format_slide(view: &SlideView, index: usize, total: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format!("Slide {} / {}", index + 1, total).dimmed()));

    for block in &view.blocks {
        match block {
            SlideBlock::Title(inlines) => {
                out.push_str(&format!("{}\n", plain(inlines).bold().underline()));
            }
            SlideBlock::SectionLabel(inlines) => {
                out.push_str(&format!("{}\n", format!(" {} ", plain(inlines)).on_yellow().black()));
            }
            SlideBlock::Subtitle(inlines) => {
                out.push_str(&format!("{}\n", plain(inlines).bold()));
            }
            SlideBlock::SpeakerNote(inlines) => {
                out.push_str(&format!(
                    "{} {}\n",
                    "\u{2502}".yellow(),
                    styled(inlines).italic().dimmed()
                ));
            }
            SlideBlock::Bullets(items) => {
                for item in items {
                    out.push_str(&format!("  {} {}\n", "\u{2022}".yellow(), styled(item)));
                }
            }
            SlideBlock::Paragraph(inlines) => {
                out.push_str(&format!("{}\n", styled(inlines)));
            }
            SlideBlock::Gap => out.push('\n'),
        }
    }
    out
}

fn plain(inlines: &[Inline]) -> String {
    crate::parser::inline::to_text(inlines)
}

/// Inline text with bold spans highlighted.
fn styled(inlines: &[Inline]) -> colored::ColoredString {
    let text: String = inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(s) => s.clone(),
            Inline::Bold(s) => s.bold().to_string(),
            Inline::Italic(s) => s.italic().to_string(),
        })
        .collect();
    text.normal()
}
