/// Classification of a single slide line.
///
/// Every line maps to exactly one kind; [`LineKind::Paragraph`] is the
/// catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `# text`
    Title(&'a str),
    /// `## text`
    SectionLabel(&'a str),
    /// `### text`
    Subtitle(&'a str),
    /// `> text`, hidden from the audience
    Note(&'a str),
    /// `- text`
    BulletItem(&'a str),
    Blank,
    Paragraph(&'a str),
}

type Matcher = for<'a> fn(&'a str) -> Option<LineKind<'a>>;

/// Matchers in evaluation order. The first one that accepts a line wins.
const MATCHERS: &[Matcher] = &[
    match_blank,
    match_title,
    match_section_label,
    match_subtitle,
    match_note,
    match_bullet,
];

pub fn classify(line: &str) -> LineKind<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(line))
        .unwrap_or(LineKind::Paragraph(line))
}

fn match_blank(line: &str) -> Option<LineKind<'_>> {
    line.trim().is_empty().then_some(LineKind::Blank)
}

fn match_title(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("# ").map(|t| LineKind::Title(t.trim()))
}

fn match_section_label(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("## ")
        .map(|t| LineKind::SectionLabel(t.trim()))
}

fn match_subtitle(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("### ").map(|t| LineKind::Subtitle(t.trim()))
}

fn match_note(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("> ").map(|t| LineKind::Note(t.trim()))
}

fn match_bullet(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix("- ")
        .map(|t| LineKind::BulletItem(t.trim()))
}
