use std::sync::LazyLock;

use regex::Regex;

/// Inline emphasis inside a slide line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
    Italic(String),
}

static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(?P<bold>.+?)\*\*|\*(?P<italic>[^*\s](?:[^*]*?[^*\s])?)\*")
        .expect("emphasis pattern is valid")
});

/// Parse `**bold**` and `*italic*` spans. Unmatched markers stay literal text.
pub fn parse(text: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut last = 0;

    for caps in EMPHASIS.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            inlines.push(Inline::Text(text[last..whole.start()].to_string()));
        }
        if let Some(bold) = caps.name("bold") {
            inlines.push(Inline::Bold(bold.as_str().to_string()));
        } else if let Some(italic) = caps.name("italic") {
            inlines.push(Inline::Italic(italic.as_str().to_string()));
        }
        last = whole.end();
    }

    if last < text.len() {
        inlines.push(Inline::Text(text[last..].to_string()));
    }
    inlines
}

/// Extract plain text from inline elements.
pub fn to_text(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(s) | Inline::Bold(s) | Inline::Italic(s) => s.as_str(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(parse("hello"), vec![Inline::Text("hello".into())]);
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_bold_in_the_middle() {
        assert_eq!(
            parse("a **key** point"),
            vec![
                Inline::Text("a ".into()),
                Inline::Bold("key".into()),
                Inline::Text(" point".into()),
            ]
        );
    }

    #[test]
    fn test_bold_is_non_greedy() {
        let inlines = parse("**one** and **two**");
        assert_eq!(inlines[0], Inline::Bold("one".into()));
        assert_eq!(inlines[2], Inline::Bold("two".into()));
    }

    #[test]
    fn test_italic_image_suggestion() {
        let inlines = parse("*(Image suggestion: a map)*");
        assert_eq!(inlines, vec![Inline::Italic("(Image suggestion: a map)".into())]);
    }

    #[test]
    fn test_unmatched_marker_is_literal() {
        assert_eq!(parse("**open"), vec![Inline::Text("**open".into())]);
        assert_eq!(to_text(&parse("2 * 3 * 4")), "2 * 3 * 4");
    }

    #[test]
    fn test_to_text_strips_markers() {
        assert_eq!(to_text(&parse("**A** and *b*")), "A and b");
    }
}
