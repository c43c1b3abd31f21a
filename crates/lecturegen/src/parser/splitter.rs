/// Split a lecture document into raw slide strings.
///
/// A slide starts at every line that begins with `# ` (a single hash and a
/// space) and runs up to, but not including, the next such line or the end
/// of the document. Each slide keeps its original bytes, including the line
/// break that precedes the next header, so concatenating the slides yields
/// the document from its first header onwards.
///
/// Content before the first header is dropped. Lines inside a fenced code
/// block that is closed again are never treated as headers, so `# comment`
/// lines in code samples stay on their slide. A fence that never closes does
/// not hide the headers after it.
pub fn split(markdown: &str) -> Vec<String> {
    let starts = header_offsets(markdown);

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(markdown.len());
            &markdown[start..end]
        })
        .filter(|slide| !slide.trim().is_empty())
        .map(String::from)
        .collect()
}

/// Byte offsets of every slide header line, in document order.
pub fn header_offsets(markdown: &str) -> Vec<usize> {
    let lines: Vec<&str> = markdown.split_inclusive('\n').collect();
    let fenced = fenced_lines(&lines);
    let mut offsets = Vec::new();
    let mut offset = 0;

    for (line, fenced) in lines.iter().zip(fenced) {
        if !fenced && is_slide_header(line) {
            offsets.push(offset);
        }
        offset += line.len();
    }

    offsets
}

/// A line that opens a new slide: `# ` at column zero.
pub fn is_slide_header(line: &str) -> bool {
    line.starts_with("# ")
}

/// Marks the lines that belong to a closed fenced block, delimiters included.
fn fenced_lines(lines: &[&str]) -> Vec<bool> {
    let mut fenced = vec![false; lines.len()];
    let mut fence = Fence::default();
    let mut opened_at = None;

    for (i, line) in lines.iter().enumerate() {
        match fence.track(line) {
            Some(FenceEdge::Open) => opened_at = Some(i),
            Some(FenceEdge::Close) => {
                if let Some(start) = opened_at.take() {
                    fenced[start..=i].fill(true);
                }
            }
            None => {}
        }
    }

    fenced
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceEdge {
    Open,
    Close,
}

/// Tracks fenced code blocks (```` ``` ```` or `~~~`) while scanning lines.
#[derive(Default)]
pub struct Fence {
    open: bool,
    marker: char,
    len: usize,
}

impl Fence {
    /// Update the fence state for `line` and report whether it opened or
    /// closed a block.
    pub fn track(&mut self, line: &str) -> Option<FenceEdge> {
        let trimmed = line.trim();
        if self.open {
            let closing = trimmed.chars().take_while(|&c| c == self.marker).count();
            if closing >= self.len && trimmed.chars().skip(closing).all(char::is_whitespace) {
                self.open = false;
                return Some(FenceEdge::Close);
            }
            return None;
        }

        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            let marker = if trimmed.starts_with('`') { '`' } else { '~' };
            self.open = true;
            self.marker = marker;
            self.len = trimmed.chars().take_while(|&c| c == marker).count();
            return Some(FenceEdge::Open);
        }
        None
    }
}
