use crate::error::{LectureError, Result};
use crate::library::{LectureLibrary, SavedLecture};
use crate::parser::Deck;
use crate::render::{self, RenderMode, SlideView};

/// A generated lecture under review: the deck, the slide being looked at,
/// and whether the current content is stored in the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession {
    deck: Deck,
    current: usize,
    saved_id: Option<String>,
}

impl ReviewSession {
    /// Start reviewing a deck. An empty deck cannot be reviewed.
    pub fn new(deck: Deck) -> Result<Self> {
        if deck.is_empty() {
            return Err(LectureError::Validation(
                "The lecture has no slides to show".to_string(),
            ));
        }
        Ok(Self {
            deck,
            current: 0,
            saved_id: None,
        })
    }

    pub fn from_markdown(markdown: &str) -> Result<Self> {
        Self::new(Deck::from_markdown(markdown))
    }

    /// Reopen a saved lecture, preferring its stored slide list.
    pub fn from_saved(lecture: &SavedLecture) -> Result<Self> {
        let deck = match &lecture.rendered_slides {
            Some(slides) if slides.iter().any(|s| !s.trim().is_empty()) => {
                Deck::from_slides(slides.clone())
            }
            _ => Deck::from_markdown(&lecture.content),
        };
        let mut session = Self::new(deck)?;
        session.saved_id = Some(lecture.id.clone());
        Ok(session)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> &str {
        self.deck.get(self.current).unwrap_or_default()
    }

    pub fn next(&mut self) {
        self.go_to(self.current + 1);
    }

    pub fn prev(&mut self) {
        self.go_to(self.current.saturating_sub(1));
    }

    /// Move to `index`, clamped to the deck.
    pub fn go_to(&mut self, index: usize) {
        self.current = index.min(self.deck.len().saturating_sub(1));
    }

    pub fn render_current(&self, mode: RenderMode) -> SlideView {
        render::render_slide(self.current_slide(), mode)
    }

    pub fn is_saved(&self) -> bool {
        self.saved_id.is_some()
    }

    pub fn saved_id(&self) -> Option<&str> {
        self.saved_id.as_deref()
    }

    /// Swap in a refined slide. Any change marks the session unsaved.
    pub fn apply_refinement(&mut self, index: usize, slide: String) -> bool {
        let replaced = self.deck.replace(index, slide);
        if replaced {
            self.saved_id = None;
        }
        replaced
    }

    /// Store the deck in the library as a new lecture.
    pub fn save(&mut self, library: &mut LectureLibrary) -> Result<SavedLecture> {
        let saved = library.save_with_slides(&self.deck.to_markdown(), self.deck.slides().to_vec())?;
        self.saved_id = Some(saved.id.clone());
        Ok(saved)
    }
}
