use serde_json::{Value, json};

use super::{Answer, LectureInfo};

/// Name of the structured-output tool the analysis request forces.
pub const ANALYSIS_TOOL: &str = "analyze_syllabus";

pub fn extraction(language: &str) -> String {
    format!(
        "Extract the course syllabus contained in this file (image or PDF) as text. \
         Structure it as Markdown. Keep the original language of the document \
         (or {language} if it is unclear). Output only the extracted content, \
         with no explanations."
    )
}

pub fn analysis(syllabus: &str, info: Option<&LectureInfo>, language: &str) -> String {
    format!(
        "You are an expert instructional designer. Analyze the following syllabus text.\n\
         Determine if there is enough information to create a high-quality lecture slide deck.\n\
         \n\
         Look for missing critical details such as:\n\
         1. Target audience level (beginner, advanced, ...)\n\
         2. Specific learning objectives (if vague)\n\
         3. Tone of the lecture (academic, casual, professional)\n\
         4. Key constraints (time limits, specific tools to use)\n\
         5. Focus areas (theory vs. practice)\n\
         \n\
         If information is missing, generate 3-5 specific questions in {language} to ask the \
         user to clarify these details. Also write the summary in {language}.\n\
         {info}\n\
         Syllabus:\n\"\"\"\n{syllabus}\n\"\"\"\n",
        info = info_block(info),
    )
}

pub fn analysis_tool(language: &str) -> Value {
    json!({
        "name": ANALYSIS_TOOL,
        "description": "Return the structured analysis of the syllabus including whether \
                        info is missing, a summary, and clarifying questions.",
        "input_schema": {
            "type": "object",
            "properties": {
                "missingInfo": {
                    "type": "boolean",
                    "description": "True if important details are missing, false if the syllabus is comprehensive."
                },
                "summary": {
                    "type": "string",
                    "description": format!("A one-sentence summary of the syllabus topic in {language}.")
                },
                "questions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "question": {
                                "type": "string",
                                "description": format!("The question in {language}.")
                            },
                            "context": {
                                "type": "string",
                                "description": format!("Why this information helps generate better slides, in {language}.")
                            },
                            "type": { "type": "string", "enum": ["text", "choice"] },
                            "options": {
                                "type": "array",
                                "items": { "type": "string" },
                                "description": "Options if type is choice, otherwise an empty array."
                            }
                        },
                        "required": ["id", "question", "context", "type"]
                    }
                }
            },
            "required": ["missingInfo", "summary", "questions"]
        }
    })
}

pub fn generation(
    syllabus: &str,
    answers: &[Answer],
    info: Option<&LectureInfo>,
    language: &str,
) -> String {
    let clarifications = answers
        .iter()
        .map(|a| format!("Q: {}\nA: {}", a.question_text, a.answer))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a world-class educational content creator.\n\
         Create a comprehensive lecture slide deck in Markdown based on the syllabus and the \
         user's clarifications. All generated content must be in {language}.\n\
         \n\
         STRICT RULES:\n\
         - Do not include any introductory remarks, conversational filler, or a summary of the request.\n\
         - Start immediately with the first slide header (# Title).\n\
         - Only output the Markdown lecture content.\n\
         {info}\n\
         Syllabus:\n\"\"\"\n{syllabus}\n\"\"\"\n\
         \n\
         User clarifications:\n\"\"\"\n{clarifications}\n\"\"\"\n\
         \n\
         Output requirements:\n\
         1. Format: Markdown. Use # for slide titles, ## for main points, - for bullets.\n\
         2. Structure:\n\
            - Title slide: topic and a presenter name placeholder.\n\
            - Agenda: what will be covered.\n\
            - Learning objectives: clear goals.\n\
            - Content slides: break the syllabus topics into logical slides with substantial content.\n\
            - Activity/discussion: at least one interactive element or discussion question.\n\
            - Conclusion/summary: key takeaways.\n\
            - Speaker notes: for every slide, add a 'Speaker Notes:' section in blockquotes (>) \
              at the bottom of the slide.\n\
         3. Tone: adapt to the clarified audience and tone.\n\
         4. Visuals: suggest an image for key slides in italics *(Image suggestion: ...)*.\n",
        info = info_block(info),
    )
}

pub fn refinement(slide: &str, instruction: &str, language: &str) -> String {
    format!(
        "You are an expert presentation editor.\n\
         Update the following Markdown slide based on the user's instruction.\n\
         \n\
         Original slide:\n\"\"\"\n{slide}\n\"\"\"\n\
         \n\
         User instruction:\n\"{instruction}\"\n\
         \n\
         STRICT REQUIREMENTS:\n\
         1. Keep the output in {language} unless the user asks for a translation.\n\
         2. Keep the Markdown structure (# for the title, - for bullets, > for speaker notes).\n\
         3. Only output the updated content of this one slide.\n\
         4. Do not add conversational filler, explanations or introductory text.\n\
         5. Start immediately with the slide content (# Slide Title).\n"
    )
}

/// Lecture metadata as a prompt section, or an empty string.
fn info_block(info: Option<&LectureInfo>) -> String {
    let Some(fields) = info.map(LectureInfo::fields).filter(|f| !f.is_empty()) else {
        return String::new();
    };
    let mut block = String::from("\nLecture information:\n");
    for (label, value) in fields {
        block.push_str(&format!("- {label}: {value}\n"));
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_prompt_includes_answers_and_info() {
        let answers = vec![Answer {
            question_id: "q1".into(),
            question_text: "Who is the audience?".into(),
            answer: "First-year students".into(),
        }];
        let info = LectureInfo {
            company_name: "Acme".into(),
            ..Default::default()
        };
        let prompt = generation("Week 1: SQL", &answers, Some(&info), "English");
        assert!(prompt.contains("Week 1: SQL"));
        assert!(prompt.contains("Q: Who is the audience?\nA: First-year students"));
        assert!(prompt.contains("- Company: Acme"));
        assert!(prompt.contains("in English"));
    }

    #[test]
    fn test_empty_info_adds_nothing() {
        let prompt = analysis("syllabus", Some(&LectureInfo::default()), "Korean");
        assert!(!prompt.contains("Lecture information"));
        assert!(prompt.contains("questions in Korean"));
    }

    #[test]
    fn test_refinement_prompt() {
        let prompt = refinement("# Slide\n- a", "make it shorter", "Korean");
        assert!(prompt.contains("# Slide\n- a"));
        assert!(prompt.contains("\"make it shorter\""));
    }

    #[test]
    fn test_analysis_tool_schema() {
        let tool = analysis_tool("Korean");
        assert_eq!(tool["name"], ANALYSIS_TOOL);
        let required = tool["input_schema"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
        assert_eq!(
            tool["input_schema"]["properties"]["questions"]["items"]["properties"]["type"]["enum"],
            json!(["text", "choice"])
        );
    }
}
