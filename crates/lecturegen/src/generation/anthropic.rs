use base64::Engine;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Answer, LectureGenerator, LectureInfo, SyllabusAnalysis, prompts};
use crate::error::{LectureError, Result};
use crate::parser;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;
const GENERATION_MAX_TOKENS: u32 = 8192;
const GENERATION_THINKING_BUDGET: u32 = 2048;

/// [`LectureGenerator`] backed by the Anthropic Messages API.
pub struct AnthropicClient {
    api_key: String,
    model: String,
    base_url: String,
    language: String,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "Korean".to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Language the generated content is written in.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn send(&self, body: &Value) -> std::result::Result<MessagesResponse, String> {
        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));
        tracing::debug!(model = %self.model, %url, "sending messages request");

        let response: MessagesResponse = ureq::post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .send_json(body)
            .map_err(|e| format!("request to {url} failed: {e}"))?
            .body_mut()
            .read_json()
            .map_err(|e| format!("could not read response: {e}"))?;

        tracing::debug!(stop_reason = ?response.stop_reason, blocks = response.content.len(), "received response");
        Ok(response)
    }

    fn user_message(&self, content: Value, max_tokens: u32) -> Value {
        json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "messages": [{ "role": "user", "content": content }],
        })
    }
}

impl LectureGenerator for AnthropicClient {
    fn extract_text(&self, bytes: &[u8], mime_type: &str) -> Result<String> {
        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        let block_type = if mime_type == "application/pdf" {
            "document"
        } else {
            "image"
        };
        let content = json!([
            {
                "type": block_type,
                "source": { "type": "base64", "media_type": mime_type, "data": data },
            },
            { "type": "text", "text": prompts::extraction(&self.language) },
        ]);
        let body = self.user_message(content, MAX_TOKENS);

        let response = self.send(&body).map_err(LectureError::Extraction)?;
        response
            .text()
            .ok_or_else(|| LectureError::Extraction("the response contained no text".to_string()))
    }

    fn analyze(&self, syllabus: &str, info: Option<&LectureInfo>) -> Result<SyllabusAnalysis> {
        let prompt = prompts::analysis(syllabus, info, &self.language);
        let mut body = self.user_message(json!(prompt), MAX_TOKENS);
        body["tools"] = json!([prompts::analysis_tool(&self.language)]);
        body["tool_choice"] = json!({ "type": "tool", "name": prompts::ANALYSIS_TOOL });

        let response = self.send(&body).map_err(LectureError::Analysis)?;
        parse_analysis(&response)
    }

    fn generate(
        &self,
        syllabus: &str,
        answers: &[Answer],
        info: Option<&LectureInfo>,
    ) -> Result<String> {
        let prompt = prompts::generation(syllabus, answers, info, &self.language);
        let mut body = self.user_message(json!(prompt), GENERATION_MAX_TOKENS);
        body["thinking"] = json!({
            "type": "enabled",
            "budget_tokens": GENERATION_THINKING_BUDGET,
        });

        let response = self.send(&body).map_err(LectureError::Generation)?;
        response
            .markdown()
            .ok_or_else(|| LectureError::Generation("the response contained no text".to_string()))
    }

    fn refine_slide(&self, slide: &str, instruction: &str) -> Result<String> {
        let prompt = prompts::refinement(slide, instruction, &self.language);
        let body = self.user_message(json!(prompt), MAX_TOKENS);

        let response = self.send(&body).map_err(LectureError::Refine)?;
        response
            .markdown()
            .ok_or_else(|| LectureError::Refine("the response contained no text".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        name: String,
        input: Value,
    },
    #[serde(other)]
    Other,
}

impl MessagesResponse {
    /// The first non-blank text block, trimmed.
    fn text(&self) -> Option<String> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } if !text.trim().is_empty() => Some(text.trim().to_string()),
            _ => None,
        })
    }

    /// The text block with a fence around the whole reply removed.
    fn markdown(&self) -> Option<String> {
        let text = self.text()?;
        let body = parser::unwrap_fenced(&text);
        (!body.is_empty()).then(|| body.to_string())
    }

    fn tool_input(&self, tool: &str) -> Option<&Value> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::ToolUse { name, input } if name == tool => Some(input),
            _ => None,
        })
    }
}

fn parse_analysis(response: &MessagesResponse) -> Result<SyllabusAnalysis> {
    let input = response.tool_input(prompts::ANALYSIS_TOOL).ok_or_else(|| {
        LectureError::Analysis("no structured response was returned".to_string())
    })?;
    serde_json::from_value(input.clone())
        .map_err(|e| LectureError::Analysis(format!("malformed structured response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> MessagesResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_text_skips_thinking_blocks() {
        let r = response(
            r#"{"content": [
                {"type": "thinking", "thinking": "hmm", "signature": "abc"},
                {"type": "text", "text": "\n# Lecture\n- point\n"}
            ], "stop_reason": "end_turn"}"#,
        );
        assert_eq!(r.text().as_deref(), Some("# Lecture\n- point"));
        assert_eq!(r.stop_reason.as_deref(), Some("end_turn"));
    }

    #[test]
    fn test_markdown_drops_wrapping_fence() {
        let r = response(
            r#"{"content": [{"type": "text", "text": "```markdown\n# Intro\n- a\n# Details\n- b\n```\n"}]}"#,
        );
        let markdown = r.markdown().unwrap();
        assert_eq!(markdown, "# Intro\n- a\n# Details\n- b");
        assert_eq!(parser::parse(&markdown).len(), 2);
    }

    #[test]
    fn test_markdown_keeps_code_samples() {
        let r = response(r##"{"content": [{"type": "text", "text": "# Loops\n```rust\nfor x in xs {}\n```"}]}"##);
        assert_eq!(r.markdown().as_deref(), Some("# Loops\n```rust\nfor x in xs {}\n```"));
    }

    #[test]
    fn test_empty_wrapper_is_no_markdown() {
        let r = response(r#"{"content": [{"type": "text", "text": "```\n```"}]}"#);
        assert!(r.markdown().is_none());
    }

    #[test]
    fn test_text_missing() {
        let r = response(r#"{"content": [{"type": "text", "text": "   "}]}"#);
        assert!(r.text().is_none());
    }

    #[test]
    fn test_parse_analysis() {
        let r = response(
            r#"{"content": [{"type": "tool_use", "id": "t1", "name": "analyze_syllabus",
                "input": {"missingInfo": false, "summary": "SQL basics", "questions": []}}]}"#,
        );
        let analysis = parse_analysis(&r).unwrap();
        assert!(!analysis.missing_info);
        assert!(analysis.questions.is_empty());
    }

    #[test]
    fn test_parse_analysis_without_tool_use() {
        let r = response(r#"{"content": [{"type": "text", "text": "sorry"}]}"#);
        assert!(matches!(parse_analysis(&r), Err(LectureError::Analysis(_))));
    }

    #[test]
    fn test_parse_analysis_malformed() {
        let r = response(
            r#"{"content": [{"type": "tool_use", "id": "t1", "name": "analyze_syllabus",
                "input": {"summary": 42}}]}"#,
        );
        let err = parse_analysis(&r).unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn test_unreachable_service_is_a_generation_error() {
        let client = AnthropicClient::new("key".into()).with_base_url("http://127.0.0.1:9");
        let err = client.generate("syllabus", &[], None).unwrap_err();
        assert!(matches!(err, LectureError::Generation(_)));
        let err = client.refine_slide("# A", "shorter").unwrap_err();
        assert!(matches!(err, LectureError::Refine(_)));
    }

    #[test]
    fn test_builder() {
        let client = AnthropicClient::new("key".into()).with_model("claude-test");
        assert_eq!(client.model(), "claude-test");
    }
}
