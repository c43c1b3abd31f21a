pub mod lines;
pub mod terminal;
pub mod text;

use crate::parser::inline::{self, Inline};
use lines::LineKind;

/// Who the rendering is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// The review editor: speaker notes are shown.
    Review,
    /// The audience-facing presentation: speaker notes are dropped.
    Presentation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideBlock {
    Title(Vec<Inline>),
    SectionLabel(Vec<Inline>),
    Subtitle(Vec<Inline>),
    SpeakerNote(Vec<Inline>),
    /// Consecutive bullet lines, one entry per item.
    Bullets(Vec<Vec<Inline>>),
    Paragraph(Vec<Inline>),
    /// Vertical space left by one or more blank lines.
    Gap,
}

/// Structured view of one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideView {
    pub blocks: Vec<SlideBlock>,
}

impl SlideView {
    pub fn notes(&self) -> Vec<String> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                SlideBlock::SpeakerNote(inlines) => Some(inline::to_text(inlines)),
                _ => None,
            })
            .collect()
    }
}

/// Render one slide's markdown line by line.
pub fn render_slide(slide: &str, mode: RenderMode) -> SlideView {
    let mut builder = Builder::default();

    for line in slide.lines() {
        match lines::classify(line) {
            LineKind::Title(text) => builder.push(SlideBlock::Title(inline::parse(text))),
            LineKind::SectionLabel(text) => {
                builder.push(SlideBlock::SectionLabel(inline::parse(text)))
            }
            LineKind::Subtitle(text) => builder.push(SlideBlock::Subtitle(inline::parse(text))),
            LineKind::Note(text) => match mode {
                RenderMode::Review => builder.push(SlideBlock::SpeakerNote(inline::parse(text))),
                RenderMode::Presentation => {}
            },
            LineKind::BulletItem(text) => builder.bullet(inline::parse(text)),
            LineKind::Blank => builder.gap(),
            LineKind::Paragraph(text) => builder.push(SlideBlock::Paragraph(inline::parse(text))),
        }
    }

    builder.finish()
}

/// Speaker notes of a slide, in order.
pub fn speaker_notes(slide: &str) -> Vec<String> {
    render_slide(slide, RenderMode::Review).notes()
}

#[derive(Default)]
struct Builder {
    blocks: Vec<SlideBlock>,
    open_bullets: Option<Vec<Vec<Inline>>>,
}

impl Builder {
    fn close_bullets(&mut self) {
        if let Some(items) = self.open_bullets.take() {
            self.blocks.push(SlideBlock::Bullets(items));
        }
    }

    fn push(&mut self, block: SlideBlock) {
        self.close_bullets();
        self.blocks.push(block);
    }

    fn bullet(&mut self, item: Vec<Inline>) {
        self.open_bullets.get_or_insert_with(Vec::new).push(item);
    }

    fn gap(&mut self) {
        self.close_bullets();
        if self
            .blocks
            .last()
            .is_some_and(|b| !matches!(b, SlideBlock::Gap))
        {
            self.blocks.push(SlideBlock::Gap);
        }
    }

    fn finish(mut self) -> SlideView {
        self.close_bullets();
        if matches!(self.blocks.last(), Some(SlideBlock::Gap)) {
            self.blocks.pop();
        }
        SlideView {
            blocks: self.blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn text(s: &str) -> Vec<Inline> {
        vec![Inline::Text(s.to_string())]
    }

    #[test]
    fn test_full_slide_review() {
        let slide = "# Intro\n## Why\n### Goal\n- one\n- **two**\n\nBody text\n> Speaker Notes: smile";
        let view = render_slide(slide, RenderMode::Review);
        assert_eq!(
            view.blocks,
            vec![
                SlideBlock::Title(text("Intro")),
                SlideBlock::SectionLabel(text("Why")),
                SlideBlock::Subtitle(text("Goal")),
                SlideBlock::Bullets(vec![text("one"), vec![Inline::Bold("two".into())]]),
                SlideBlock::Gap,
                SlideBlock::Paragraph(text("Body text")),
                SlideBlock::SpeakerNote(text("Speaker Notes: smile")),
            ]
        );
        assert_eq!(view.notes(), vec!["Speaker Notes: smile"]);
    }

    #[test]
    fn test_presentation_hides_notes() {
        let view = render_slide("# T\n> secret note\nvisible", RenderMode::Presentation);
        assert!(view.notes().is_empty());
        assert_eq!(
            view.blocks,
            vec![
                SlideBlock::Title(text("T")),
                SlideBlock::Paragraph(text("visible")),
            ]
        );
    }

    #[test]
    fn test_paragraph_closes_bullet_group() {
        let view = render_slide("- a\n- b\nbreak\n- c", RenderMode::Presentation);
        assert_eq!(
            view.blocks,
            vec![
                SlideBlock::Bullets(vec![text("a"), text("b")]),
                SlideBlock::Paragraph(text("break")),
                SlideBlock::Bullets(vec![text("c")]),
            ]
        );
    }

    #[test]
    fn test_blank_line_closes_bullet_group() {
        let view = render_slide("- a\n\n- b", RenderMode::Review);
        assert_eq!(
            view.blocks,
            vec![
                SlideBlock::Bullets(vec![text("a")]),
                SlideBlock::Gap,
                SlideBlock::Bullets(vec![text("b")]),
            ]
        );
    }

    #[test]
    fn test_gaps_collapse_and_trim() {
        let view = render_slide("\n\n# T\n\n\n\nx\n\n", RenderMode::Review);
        assert_eq!(
            view.blocks,
            vec![
                SlideBlock::Title(text("T")),
                SlideBlock::Gap,
                SlideBlock::Paragraph(text("x")),
            ]
        );
    }

    #[test]
    fn test_speaker_notes_helper() {
        assert_eq!(speaker_notes("# A\n> one\n> two"), vec!["one", "two"]);
    }

    proptest! {
        #[test]
        fn prop_consecutive_bullets_form_one_group(
            items in prop::collection::vec("[A-Za-z0-9 ]{1,20}", 1..30),
        ) {
            let slide = items
                .iter()
                .map(|i| format!("- {i}"))
                .collect::<Vec<_>>()
                .join("\n");
            let view = render_slide(&format!("# T\n{slide}\n"), RenderMode::Presentation);
            let groups: Vec<usize> = view
                .blocks
                .iter()
                .filter_map(|b| match b {
                    SlideBlock::Bullets(items) => Some(items.len()),
                    _ => None,
                })
                .collect();
            prop_assert_eq!(groups, vec![items.len()]);
        }

        #[test]
        fn prop_notes_never_reach_the_audience(
            note in "[A-Za-z0-9]{1,20}",
            before in "[A-Za-z0-9 ]{0,20}",
        ) {
            let slide = format!("# T\n{before}\n> hidden-{note}\n- item\n");
            let view = render_slide(&slide, RenderMode::Presentation);
            let visible: String = view
                .blocks
                .iter()
                .flat_map(|b| match b {
                    SlideBlock::Bullets(items) => items.clone(),
                    SlideBlock::Title(i)
                    | SlideBlock::SectionLabel(i)
                    | SlideBlock::Subtitle(i)
                    | SlideBlock::SpeakerNote(i)
                    | SlideBlock::Paragraph(i) => vec![i.clone()],
                    SlideBlock::Gap => Vec::new(),
                })
                .map(|i| inline::to_text(&i))
                .collect::<Vec<_>>()
                .join("\n");
            prop_assert!(!view.blocks.iter().any(|b| matches!(b, SlideBlock::SpeakerNote(_))));
            prop_assert!(!visible.contains("hidden-"));
        }
    }
}
