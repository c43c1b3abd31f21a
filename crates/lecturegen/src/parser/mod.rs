pub mod inline;
pub mod splitter;

use splitter::{Fence, FenceEdge};

/// Title used when a lecture has no top-level header.
pub const DEFAULT_TITLE: &str = "Untitled Lecture";

/// Split a markdown lecture document into its slides.
///
/// Returns an empty list for a document without any top-level header.
pub fn parse(markdown: &str) -> Vec<String> {
    splitter::split(markdown)
}

/// Text of the first top-level header, if it has any.
pub fn extract_title(markdown: &str) -> Option<String> {
    let offset = splitter::header_offsets(markdown).into_iter().next()?;
    let line = markdown[offset..].lines().next()?;
    let title = line.strip_prefix("# ").unwrap_or(line).trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Title for a lecture, falling back to [`DEFAULT_TITLE`].
pub fn title_or_default(markdown: &str) -> String {
    extract_title(markdown).unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

/// The body of a document that is wrapped as a whole in one fenced block.
///
/// A wrapper is a fence with no info string or `markdown`/`md` on the first
/// line and a bare closing fence on the last. Without an info string the
/// opening fence must not close before the last line. Anything else is
/// returned unchanged.
pub fn unwrap_fenced(markdown: &str) -> &str {
    let trimmed = markdown.trim();
    let lines: Vec<&str> = trimmed.lines().collect();
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return markdown;
    };
    if lines.len() < 2 {
        return markdown;
    }

    let mut fence = Fence::default();
    if fence.track(first) != Some(FenceEdge::Open) {
        return markdown;
    }
    let info = first.trim().trim_start_matches(['`', '~']).trim();
    let explicit = info.eq_ignore_ascii_case("markdown") || info.eq_ignore_ascii_case("md");
    if !explicit && !info.is_empty() {
        return markdown;
    }

    let closes_at = lines[1..]
        .iter()
        .position(|line| fence.track(line) == Some(FenceEdge::Close))
        .map(|i| i + 1);
    let last_is_bare_fence = {
        let mut wrapper = Fence::default();
        wrapper.track(first);
        wrapper.track(last) == Some(FenceEdge::Close)
    };
    if !last_is_bare_fence || (!explicit && closes_at != Some(lines.len() - 1)) {
        return markdown;
    }

    let start = trimmed.find('\n').map_or(trimmed.len(), |i| i + 1);
    let end = trimmed.rfind('\n').unwrap_or(0);
    trimmed.get(start..end).unwrap_or("").trim()
}

/// An ordered slide deck.
///
/// Unlike [`parse`], building a deck never silently yields nothing for a
/// document that has content: a header-less document becomes one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    slides: Vec<String>,
}

impl Deck {
    pub fn from_markdown(markdown: &str) -> Self {
        let markdown = unwrap_fenced(markdown);
        let slides = parse(markdown);
        if slides.is_empty() && !markdown.trim().is_empty() {
            return Self {
                slides: vec![markdown.trim().to_string()],
            };
        }
        Self { slides }
    }

    pub fn from_slides(slides: Vec<String>) -> Self {
        Self {
            slides: slides
                .into_iter()
                .filter(|s| !s.trim().is_empty())
                .collect(),
        }
    }

    pub fn slides(&self) -> &[String] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.slides.get(index).map(String::as_str)
    }

    /// Replace one slide. Returns false (and changes nothing) if `index` is
    /// out of range or the replacement is blank.
    pub fn replace(&mut self, index: usize, slide: String) -> bool {
        if slide.trim().is_empty() {
            return false;
        }
        match self.slides.get_mut(index) {
            Some(existing) => {
                *existing = slide;
                true
            }
            None => false,
        }
    }

    /// Join the slides back into one document.
    ///
    /// A newline is inserted between two slides only when the first does not
    /// already end with one, so an unmodified deck reproduces its source.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for slide in &self.slides {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(slide);
        }
        out
    }

    pub fn title(&self) -> String {
        self.slides
            .first()
            .map(|s| title_or_default(s))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_title() {
        assert_eq!(
            extract_title("# Intro to Rust\n\nbody").as_deref(),
            Some("Intro to Rust")
        );
        assert_eq!(
            extract_title("preamble\n# Later Title  \n").as_deref(),
            Some("Later Title")
        );
        assert_eq!(extract_title("## Only a section"), None);
        assert_eq!(extract_title("# \nbody"), None);
    }

    #[test]
    fn test_title_or_default() {
        assert_eq!(title_or_default("no header"), DEFAULT_TITLE);
    }

    #[test]
    fn test_deck_without_header_is_one_slide() {
        let deck = Deck::from_markdown("  Just text\nmore text\n");
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.get(0), Some("Just text\nmore text"));
        assert!(Deck::from_markdown(" \n ").is_empty());
    }

    #[test]
    fn test_deck_round_trip() {
        let source = "# A\nalpha\n\n# B\nbeta\n";
        let deck = Deck::from_markdown(source);
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.to_markdown(), source);
    }

    #[test]
    fn test_replace_inserts_separator_when_needed() {
        let mut deck = Deck::from_markdown("# A\nalpha\n# B\nbeta\n");
        assert!(deck.replace(0, "# A2\nrewritten".to_string()));
        assert_eq!(deck.to_markdown(), "# A2\nrewritten\n# B\nbeta\n");
        assert_eq!(Deck::from_markdown(&deck.to_markdown()).len(), 2);
    }

    #[test]
    fn test_replace_rejects_blank_and_out_of_range() {
        let mut deck = Deck::from_markdown("# A\n");
        assert!(!deck.replace(0, "  ".to_string()));
        assert!(!deck.replace(3, "# X".to_string()));
        assert_eq!(deck.get(0), Some("# A\n"));
    }

    #[test]
    fn test_markdown_wrapper_is_removed() {
        let wrapped = "```markdown\n# Intro\n- a\n# Details\n- b\n```";
        assert_eq!(unwrap_fenced(wrapped), "# Intro\n- a\n# Details\n- b");
        let deck = Deck::from_markdown(wrapped);
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.title(), "Intro");
    }

    #[test]
    fn test_markdown_wrapper_with_code_inside() {
        let wrapped = "```md\n# A\n```\n# comment\n```\n# B\n```\n";
        assert_eq!(unwrap_fenced(wrapped), "# A\n```\n# comment\n```\n# B");
        assert_eq!(Deck::from_markdown(wrapped).len(), 2);
    }

    #[test]
    fn test_bare_wrapper_must_span_the_document() {
        assert_eq!(unwrap_fenced("```\n# Only\n```"), "# Only");
        let two_blocks = "```\ncode\n```\n# A\n```\nmore\n```";
        assert_eq!(unwrap_fenced(two_blocks), two_blocks);
    }

    #[test]
    fn test_code_fence_is_not_a_wrapper() {
        let code = "```python\n# comment\n```";
        assert_eq!(unwrap_fenced(code), code);
        assert_eq!(unwrap_fenced("# A\nplain"), "# A\nplain");
        assert_eq!(unwrap_fenced("```"), "```");
    }

    fn slide_strategy() -> impl Strategy<Value = String> {
        (
            "[A-Za-z0-9 ]{0,20}",
            prop::collection::vec("[A-Za-z0-9 >*-]{0,30}", 0..5),
        )
            .prop_map(|(title, body)| {
                let mut slide = format!("# {title}\n");
                for line in body {
                    slide.push_str(&line);
                    slide.push('\n');
                }
                slide
            })
    }

    proptest! {
        #[test]
        fn prop_concatenation_round_trips(
            lead in "( {0,2}\n){0,3}",
            slides in prop::collection::vec(slide_strategy(), 1..8),
        ) {
            let doc = format!("{lead}{}", slides.concat());
            let parsed = parse(&doc);
            prop_assert_eq!(parsed.len(), slides.len());
            let joined = parsed.concat();
            prop_assert_eq!(joined.trim(), doc.trim());
        }

        #[test]
        fn prop_no_header_means_no_slides(body in "[A-Za-z0-9 #\n>*-]{0,200}") {
            prop_assume!(!body.starts_with("# ") && !body.contains("\n# "));
            prop_assert!(parse(&body).is_empty());
        }

        #[test]
        fn prop_slides_are_never_blank(doc in "[A-Za-z# \n]{0,200}") {
            for slide in parse(&doc) {
                prop_assert!(!slide.trim().is_empty());
                prop_assert!(slide.starts_with("# "));
            }
        }
    }
}
