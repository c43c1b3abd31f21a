use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LectureError, Result};
use crate::parser;

/// Name of the storage slot holding the saved collection.
pub const STORAGE_KEY: &str = "lecturegen_saved_materials_v2";

/// A lecture stored in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLecture {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered_slides: Option<Vec<String>>,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl SavedLecture {
    /// Local creation time for display.
    pub fn created_at_display(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.created_at)
            .map(|t| {
                t.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            })
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

/// The saved-lecture collection, mirrored to a JSON file.
///
/// The whole collection is read when the library is opened and rewritten on
/// every mutation.
#[derive(Debug)]
pub struct LectureLibrary {
    path: PathBuf,
    lectures: Vec<SavedLecture>,
}

impl LectureLibrary {
    /// Default storage directory (`<data_dir>/lecturegen`).
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("lecturegen"))
    }

    /// Load the collection stored in `dir`.
    ///
    /// A missing slot is an empty library. Content that cannot be parsed is
    /// logged and treated as empty; the next mutation overwrites it.
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(format!("{STORAGE_KEY}.json"));
        let lectures = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => match serde_json::from_str(&content) {
                Ok(lectures) => lectures,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable library");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), count = lectures.len(), "opened library");
        Ok(Self { path, lectures })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.lectures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lectures.is_empty()
    }

    pub fn save(&mut self, content: &str) -> Result<SavedLecture> {
        self.insert(content, None)
    }

    /// Save a lecture together with its slide list.
    pub fn save_with_slides(&mut self, content: &str, slides: Vec<String>) -> Result<SavedLecture> {
        self.insert(content, Some(slides))
    }

    fn insert(&mut self, content: &str, slides: Option<Vec<String>>) -> Result<SavedLecture> {
        let lecture = SavedLecture {
            id: uuid::Uuid::new_v4().to_string(),
            title: parser::title_or_default(content),
            content: content.to_string(),
            rendered_slides: slides,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        self.lectures.insert(0, lecture.clone());
        if let Err(e) = self.persist() {
            self.lectures.remove(0);
            return Err(e);
        }
        tracing::info!(id = %lecture.id, title = %lecture.title, "saved lecture");
        Ok(lecture)
    }

    /// All lectures, newest first.
    pub fn list(&self) -> Vec<&SavedLecture> {
        let mut lectures: Vec<&SavedLecture> = self.lectures.iter().collect();
        lectures.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        lectures
    }

    pub fn get(&self, id: &str) -> Option<&SavedLecture> {
        self.lectures.iter().find(|l| l.id == id)
    }

    /// Look a lecture up by its id or a unique prefix of it.
    pub fn resolve(&self, prefix: &str) -> Result<&SavedLecture> {
        if let Some(lecture) = self.get(prefix) {
            return Ok(lecture);
        }
        let prefix = prefix.trim();
        let mut matches = self
            .lectures
            .iter()
            .filter(|l| !prefix.is_empty() && l.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(lecture), None) => Ok(lecture),
            (None, _) => Err(LectureError::Validation(format!(
                "No saved lecture matches '{prefix}'"
            ))),
            (Some(_), Some(_)) => Err(LectureError::Validation(format!(
                "'{prefix}' matches more than one saved lecture"
            ))),
        }
    }

    /// Remove a lecture once `confirm` approves it.
    ///
    /// Returns `Ok(None)` when the deletion was declined.
    pub fn delete(
        &mut self,
        id: &str,
        confirm: impl FnOnce(&SavedLecture) -> bool,
    ) -> Result<Option<SavedLecture>> {
        let index = self
            .lectures
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| LectureError::Validation(format!("No saved lecture with id {id}")))?;

        if !confirm(&self.lectures[index]) {
            tracing::debug!(%id, "deletion declined");
            return Ok(None);
        }

        let removed = self.lectures.remove(index);
        if let Err(e) = self.persist() {
            self.lectures.insert(index, removed);
            return Err(e);
        }
        tracing::info!(%id, "deleted lecture");
        Ok(Some(removed))
    }

    /// Write the whole collection to a temporary file and rename it over the
    /// slot.
    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.lectures)
            .map_err(|e| LectureError::Storage(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
