use std::path::Path;

use crate::error::{LectureError, Result};
use crate::generation::LectureGenerator;

/// Syllabus text shorter than this (after trimming) is rejected.
pub const MIN_SYLLABUS_CHARS: usize = 50;

/// How a syllabus file is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Read directly as UTF-8 text.
    Text,
    /// Sent to the generation service for extraction.
    Document { mime_type: &'static str },
}

impl SourceKind {
    /// Detect the kind from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let kind = match ext.as_str() {
            "txt" | "md" | "markdown" => Self::Text,
            "pdf" => Self::Document {
                mime_type: "application/pdf",
            },
            "png" => Self::Document {
                mime_type: "image/png",
            },
            "jpg" | "jpeg" => Self::Document {
                mime_type: "image/jpeg",
            },
            "webp" => Self::Document {
                mime_type: "image/webp",
            },
            _ => {
                return Err(LectureError::UnsupportedFileType(
                    path.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string()),
                ));
            }
        };
        Ok(kind)
    }
}

/// Read one syllabus file, extracting text from PDFs and images.
///
/// The file type is checked before the file is read, so an unsupported file
/// never reaches the generation service.
pub fn read_syllabus(path: &Path, generator: &dyn LectureGenerator) -> Result<String> {
    match SourceKind::from_path(path)? {
        SourceKind::Text => {
            tracing::debug!(path = %path.display(), "reading syllabus text");
            Ok(std::fs::read_to_string(path)?)
        }
        SourceKind::Document { mime_type } => {
            let bytes = std::fs::read(path)?;
            tracing::info!(path = %path.display(), mime_type, size = bytes.len(), "extracting syllabus");
            generator.extract_text(&bytes, mime_type).inspect_err(|e| {
                tracing::error!(
                    operation = "extract_text",
                    path = %path.display(),
                    error = %e,
                    "generation request failed"
                );
            })
        }
    }
}

/// Read several files and join their text with a blank line.
pub fn read_syllabi(paths: &[impl AsRef<Path>], generator: &dyn LectureGenerator) -> Result<String> {
    for path in paths {
        SourceKind::from_path(path.as_ref())?;
    }
    let mut combined = String::new();
    for path in paths {
        let text = read_syllabus(path.as_ref(), generator)?;
        if text.trim().is_empty() {
            continue;
        }
        if !combined.is_empty() {
            combined.push_str("\n\n");
        }
        combined.push_str(text.trim_end());
    }
    Ok(combined)
}

/// Reject syllabus text that is too short to work with.
pub fn validate_syllabus(text: &str) -> Result<()> {
    let len = text.trim().chars().count();
    if len < MIN_SYLLABUS_CHARS {
        return Err(LectureError::Validation(format!(
            "Please provide at least {MIN_SYLLABUS_CHARS} characters of syllabus content ({len} given)."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{Answer, LectureInfo, SyllabusAnalysis};
    use std::cell::Cell;
    use std::path::PathBuf;

    /// Counts extraction calls and echoes the MIME type back.
    #[derive(Default)]
    struct Extractor {
        calls: Cell<usize>,
    }

    impl LectureGenerator for Extractor {
        fn extract_text(&self, bytes: &[u8], mime_type: &str) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!("extracted {} bytes of {mime_type}", bytes.len()))
        }
        fn analyze(&self, _: &str, _: Option<&LectureInfo>) -> Result<SyllabusAnalysis> {
            unreachable!()
        }
        fn generate(&self, _: &str, _: &[Answer], _: Option<&LectureInfo>) -> Result<String> {
            unreachable!()
        }
        fn refine_slide(&self, _: &str, _: &str) -> Result<String> {
            unreachable!()
        }
    }

    #[test]
    fn test_source_kind_detection() {
        assert_eq!(SourceKind::from_path(Path::new("a.md")).unwrap(), SourceKind::Text);
        assert_eq!(SourceKind::from_path(Path::new("a.TXT")).unwrap(), SourceKind::Text);
        assert_eq!(
            SourceKind::from_path(Path::new("scan.JPG")).unwrap(),
            SourceKind::Document {
                mime_type: "image/jpeg"
            }
        );
        assert_eq!(
            SourceKind::from_path(Path::new("plan.pdf")).unwrap(),
            SourceKind::Document {
                mime_type: "application/pdf"
            }
        );
    }

    #[test]
    fn test_unsupported_types() {
        for name in ["slides.pptx", "notes.docx", "no_extension"] {
            let err = SourceKind::from_path(Path::new(name)).unwrap_err();
            assert!(matches!(err, LectureError::UnsupportedFileType(_)), "{name}");
        }
    }

    #[test]
    fn test_unsupported_file_never_reaches_the_service() {
        let dir = tempfile::tempdir().unwrap();
        let ok = dir.path().join("scan.png");
        let bad = dir.path().join("deck.pptx");
        std::fs::write(&ok, [1u8, 2, 3]).unwrap();
        std::fs::write(&bad, "x").unwrap();

        let extractor = Extractor::default();
        let err = read_syllabi(&[ok, bad], &extractor).unwrap_err();
        assert!(matches!(err, LectureError::UnsupportedFileType(_)));
        assert_eq!(extractor.calls.get(), 0);
    }

    #[test]
    fn test_text_and_images_are_combined() {
        let dir = tempfile::tempdir().unwrap();
        let text: PathBuf = dir.path().join("plan.md");
        let image = dir.path().join("page2.webp");
        std::fs::write(&text, "Week 1: Introduction\n\n").unwrap();
        std::fs::write(&image, [0u8; 4]).unwrap();

        let extractor = Extractor::default();
        let combined = read_syllabi(&[text, image], &extractor).unwrap();
        assert_eq!(
            combined,
            "Week 1: Introduction\n\nextracted 4 bytes of image/webp"
        );
        assert_eq!(extractor.calls.get(), 1);
    }

    #[test]
    fn test_validation_threshold() {
        assert!(matches!(
            validate_syllabus("0123456789"),
            Err(LectureError::Validation(_))
        ));
        assert!(validate_syllabus(&"x".repeat(MIN_SYLLABUS_CHARS)).is_ok());
        let padded = format!("   {}   ", "x".repeat(MIN_SYLLABUS_CHARS - 1));
        assert!(validate_syllabus(&padded).is_err());
    }
}
