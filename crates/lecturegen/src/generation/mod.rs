pub mod anthropic;
pub mod prompts;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The four round trips to the language model service.
///
/// Implementations are stateless request/response mappings: no retries and
/// no caching. Each failure is reported with the error variant of its
/// operation.
pub trait LectureGenerator {
    /// Pull syllabus text out of a PDF or an image.
    fn extract_text(&self, bytes: &[u8], mime_type: &str) -> Result<String>;

    /// Decide whether clarifying questions are needed.
    fn analyze(&self, syllabus: &str, info: Option<&LectureInfo>) -> Result<SyllabusAnalysis>;

    /// Produce the full markdown deck.
    fn generate(
        &self,
        syllabus: &str,
        answers: &[Answer],
        info: Option<&LectureInfo>,
    ) -> Result<String>;

    /// Rewrite one slide following a free-text instruction.
    fn refine_slide(&self, slide: &str, instruction: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Choice,
}

/// A clarifying question produced by the analysis step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub context: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Question {
    /// Choice questions without options are answered as free text.
    pub fn offers_choices(&self) -> bool {
        self.kind == QuestionKind::Choice && !self.options.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusAnalysis {
    pub missing_info: bool,
    pub summary: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub question_text: String,
    pub answer: String,
}

impl Answer {
    pub const NO_ANSWER: &'static str = "No answer";

    /// Build one answer per question from raw form values keyed by question
    /// id. Missing or blank values become [`Answer::NO_ANSWER`].
    pub fn collect(questions: &[Question], values: &HashMap<String, String>) -> Vec<Answer> {
        questions
            .iter()
            .map(|q| {
                let answer = values
                    .get(&q.id)
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .unwrap_or(Self::NO_ANSWER);
                Answer {
                    question_id: q.id.clone(),
                    question_text: q.question.clone(),
                    answer: answer.to_string(),
                }
            })
            .collect()
    }

    /// The answer previously given to `question`, unless it was left blank.
    pub fn previous<'a>(answers: &'a [Answer], question: &Question) -> Option<&'a str> {
        answers
            .iter()
            .find(|a| a.question_id == question.id)
            .map(|a| a.answer.as_str())
            .filter(|a| *a != Self::NO_ANSWER)
    }
}

/// Optional lecture metadata entered alongside the syllabus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureInfo {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_hours: Option<u32>,
}

impl LectureInfo {
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Non-blank fields as `(label, value)` pairs.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        for (label, value) in [
            ("Company", &self.company_name),
            ("Class name", &self.class_name),
            ("Target audience", &self.target_audience),
            ("Keywords", &self.keywords),
        ] {
            if !value.trim().is_empty() {
                fields.push((label, value.trim().to_string()));
            }
        }
        if let Some(hours) = self.class_hours.filter(|h| *h > 0) {
            fields.push(("Class hours", hours.to_string()));
        }
        fields
    }
}
