use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::app;
use crate::config::Config;
use crate::error::LectureError;
use crate::generation::{Answer, LectureGenerator, LectureInfo, Question, SyllabusAnalysis};
use crate::ingest;
use crate::library::LectureLibrary;
use crate::render::{RenderMode, terminal};
use crate::workflow::{Controller, Draft, Event, WorkflowState};

use super::{answered, library::list_line, open_library, present, print_notice};

/// Prints a status line before each request to the generation service.
struct Narrated<G> {
    inner: G,
    quiet: bool,
}

impl<G> Narrated<G> {
    fn status(&self, message: &str) {
        if !self.quiet {
            println!("{}", message.cyan());
        }
    }
}

impl<G: LectureGenerator> LectureGenerator for Narrated<G> {
    fn extract_text(&self, bytes: &[u8], mime_type: &str) -> crate::error::Result<String> {
        self.status("Extracting text from the document...");
        self.inner.extract_text(bytes, mime_type)
    }

    fn analyze(
        &self,
        syllabus: &str,
        info: Option<&LectureInfo>,
    ) -> crate::error::Result<SyllabusAnalysis> {
        self.status("Analyzing the syllabus...");
        self.inner.analyze(syllabus, info)
    }

    fn generate(
        &self,
        syllabus: &str,
        answers: &[Answer],
        info: Option<&LectureInfo>,
    ) -> crate::error::Result<String> {
        self.status("Generating the lecture slides. This can take a minute...");
        self.inner.generate(syllabus, answers, info)
    }

    fn refine_slide(&self, slide: &str, instruction: &str) -> crate::error::Result<String> {
        self.status("Rewriting the slide...");
        self.inner.refine_slide(slide, instruction)
    }
}

/// What the user picked in a step.
enum Step {
    Continue,
    Quit,
}

/// Run the interactive wizard until the user quits.
///
/// With no files the wizard starts at Home; otherwise the files are read and
/// submitted straight away.
pub fn run(files: Vec<PathBuf>, ask_info: bool, quiet: bool) -> Result<()> {
    let config = Config::load_or_default();
    let client = config.client()?;
    tracing::info!(model = client.model(), "starting lecture wizard");
    let mut library = open_library(&config)?;
    let mut controller = Controller::new(Narrated {
        inner: client,
        quiet,
    });
    let mut wizard = Wizard {
        windowed: config.windowed(),
        pending: String::new(),
        info: None,
    };

    if !files.is_empty() || ask_info {
        controller.dispatch(Event::StartNew)?;
        if ask_info {
            wizard.info = wizard.ask_info()?;
        }
        if !files.is_empty() {
            match ingest::read_syllabi(&files, controller.generator()) {
                Ok(text) => {
                    wizard.pending = text;
                    wizard.submit(&mut controller)?;
                }
                Err(e) => report(&e),
            }
        }
    }

    loop {
        for notice in controller.take_notices() {
            print_notice(&notice);
        }
        let step = match controller.state() {
            WorkflowState::Home => wizard.home(&mut controller, &library)?,
            WorkflowState::Upload { previous } => {
                if let Some(draft) = previous {
                    if wizard.pending.is_empty() {
                        wizard.pending = draft.syllabus.clone();
                    }
                }
                wizard.upload(&mut controller)?
            }
            WorkflowState::Refine {
                summary,
                questions,
                answers,
                ..
            } => {
                let (summary, questions, answers) =
                    (summary.clone(), questions.clone(), answers.clone());
                wizard.refine(&mut controller, &summary, &questions, &answers)?
            }
            WorkflowState::Result { .. } => wizard.review(&mut controller, &mut library)?,
            WorkflowState::Presentation { .. } => wizard.present(&mut controller)?,
            state @ (WorkflowState::Analyzing { .. }
            | WorkflowState::Generating { .. }
            | WorkflowState::SlideGenerating { .. }) => {
                anyhow::bail!("Unexpected pending step: {}", state.name())
            }
        };
        if matches!(step, Step::Quit) {
            return Ok(());
        }
    }
}

struct Wizard {
    windowed: bool,
    /// Syllabus text collected in the Upload step.
    pending: String,
    info: Option<LectureInfo>,
}

impl Wizard {
    fn home<G: LectureGenerator>(
        &mut self,
        controller: &mut Controller<G>,
        library: &LectureLibrary,
    ) -> Result<Step> {
        const NEW: &str = "Start a new lecture";
        const OPEN: &str = "Open a saved lecture";
        const QUIT: &str = "Quit";

        println!();
        println!("{}", "Lecture Generator".bold());
        let mut options = vec![NEW];
        if !library.is_empty() {
            options.push(OPEN);
        }
        options.push(QUIT);

        match answered(inquire::Select::new("What would you like to do?", options).prompt())? {
            Some(NEW) => {
                self.pending.clear();
                self.info = None;
                controller.dispatch(Event::StartNew)?;
            }
            Some(OPEN) => {
                let lectures = library.list();
                let labels: Vec<String> = lectures.iter().map(|l| list_line(l)).collect();
                let picked = answered(
                    inquire::Select::new("Saved lectures", labels).raw_prompt(),
                )?;
                if let Some(choice) = picked {
                    let lecture = lectures[choice.index].clone();
                    if let Err(e) = controller.dispatch(Event::OpenLecture(lecture)) {
                        report(&e);
                    }
                }
            }
            _ => return Ok(Step::Quit),
        }
        Ok(Step::Continue)
    }

    fn upload<G: LectureGenerator>(&mut self, controller: &mut Controller<G>) -> Result<Step> {
        const WRITE: &str = "Write or paste syllabus text";
        const FILE: &str = "Add text from a file (.txt, .md, .pdf, image)";
        const INFO: &str = "Lecture information (optional)";
        const SUBMIT: &str = "Analyze and generate";
        const HOME: &str = "Back to home";

        println!();
        let chars = self.pending.trim().chars().count();
        println!(
            "{} {}",
            "Syllabus:".bold(),
            format!("{chars} characters (at least {})", ingest::MIN_SYLLABUS_CHARS).dimmed()
        );

        let mut options = vec![WRITE, FILE, INFO];
        if chars > 0 {
            options.push(SUBMIT);
        }
        options.push(HOME);

        match answered(inquire::Select::new("Syllabus", options).prompt())? {
            Some(WRITE) => {
                let text = answered(
                    inquire::Editor::new("Syllabus text")
                        .with_predefined_text(&self.pending)
                        .with_file_extension(".md")
                        .prompt(),
                )?;
                if let Some(text) = text {
                    self.pending = text;
                }
            }
            Some(FILE) => {
                let path = answered(inquire::Text::new("File path:").prompt())?;
                if let Some(path) = path.filter(|p| !p.trim().is_empty()) {
                    let path = PathBuf::from(path.trim());
                    match ingest::read_syllabus(&path, controller.generator()) {
                        Ok(text) => self.append(&text),
                        Err(e) => report(&e),
                    }
                }
            }
            Some(INFO) => {
                if let Some(info) = self.ask_info()? {
                    self.info = Some(info);
                }
            }
            Some(SUBMIT) => self.submit(controller)?,
            Some(HOME) => controller.dispatch(Event::Reset)?,
            _ => return Ok(Step::Quit),
        }
        Ok(Step::Continue)
    }

    /// Extracted text is added after what is already there.
    fn append(&mut self, text: &str) {
        if !self.pending.trim().is_empty() {
            self.pending.push_str("\n\n");
        }
        self.pending.push_str(text.trim_end());
    }

    fn submit<G: LectureGenerator>(&mut self, controller: &mut Controller<G>) -> Result<()> {
        let mut draft = Draft::new(self.pending.clone());
        if let Some(info) = self.info.clone() {
            draft = draft.with_info(info);
        }
        match controller.dispatch(Event::SubmitSyllabus(draft)) {
            Err(e @ LectureError::Validation(_)) => {
                report(&e);
                Ok(())
            }
            other => other.map_err(Into::into),
        }
    }

    fn ask_info(&self) -> Result<Option<LectureInfo>> {
        let current = self.info.clone().unwrap_or_default();
        let ask = |label: &str, value: &str| -> Result<Option<String>> {
            answered(inquire::Text::new(label).with_default(value).prompt())
        };

        let Some(company_name) = ask("Company / organization:", &current.company_name)? else {
            return Ok(None);
        };
        let Some(class_name) = ask("Class name:", &current.class_name)? else {
            return Ok(None);
        };
        let Some(target_audience) = ask("Target audience:", &current.target_audience)? else {
            return Ok(None);
        };
        let Some(keywords) = ask("Keywords:", &current.keywords)? else {
            return Ok(None);
        };
        let class_hours = answered(
            inquire::CustomType::<u32>::new("Class hours:")
                .with_help_message("Leave empty to skip")
                .prompt_skippable(),
        )?
        .flatten()
        .or(current.class_hours);

        let info = LectureInfo {
            company_name,
            class_name,
            target_audience,
            keywords,
            class_hours,
        };
        Ok((!info.is_empty()).then_some(info))
    }

    fn refine<G: LectureGenerator>(
        &mut self,
        controller: &mut Controller<G>,
        summary: &str,
        questions: &[Question],
        previous: &[Answer],
    ) -> Result<Step> {
        println!();
        if !summary.is_empty() {
            println!("{} {summary}", "Summary:".bold());
        }
        println!(
            "{}",
            "A few details would help. Press Esc to skip a question.".dimmed()
        );

        let mut values = HashMap::new();
        for question in questions {
            if !question.context.is_empty() {
                println!("{}", question.context.dimmed());
            }
            let earlier = Answer::previous(previous, question);
            let value = if question.offers_choices() {
                let cursor = earlier
                    .and_then(|a| question.options.iter().position(|o| o == a))
                    .unwrap_or(0);
                answered(
                    inquire::Select::new(&question.question, question.options.clone())
                        .with_starting_cursor(cursor)
                        .prompt_skippable(),
                )?
                .flatten()
            } else {
                let mut prompt = inquire::Text::new(&question.question);
                if let Some(earlier) = earlier {
                    prompt = prompt.with_default(earlier);
                }
                answered(prompt.prompt_skippable())?.flatten()
            };
            if let Some(value) = value {
                values.insert(question.id.clone(), value);
            }
        }

        let proceed = answered(
            inquire::Confirm::new("Generate the lecture now?")
                .with_default(true)
                .prompt(),
        )?;
        match proceed {
            Some(true) => {
                let answers = Answer::collect(questions, &values);
                controller.dispatch(Event::SubmitAnswers(answers))?;
                Ok(Step::Continue)
            }
            Some(false) => {
                controller.dispatch(Event::Reset)?;
                Ok(Step::Continue)
            }
            None => Ok(Step::Quit),
        }
    }

    fn review<G: LectureGenerator>(
        &mut self,
        controller: &mut Controller<G>,
        library: &mut LectureLibrary,
    ) -> Result<Step> {
        const NEXT: &str = "Next slide";
        const PREV: &str = "Previous slide";
        const GOTO: &str = "Go to slide...";
        const REFINE: &str = "Refine this slide";
        const PRESENT: &str = "Present";
        const SAVE: &str = "Save to library";
        const EXPORT: &str = "Export markdown";
        const NEW: &str = "Start over";
        const QUIT: &str = "Quit";

        let Some(review) = controller.state().review() else {
            return Ok(Step::Continue);
        };
        let (index, total, saved) = (review.current(), review.len(), review.is_saved());
        println!();
        print!(
            "{}",
            terminal::format_slide(&review.render_current(RenderMode::Review), index, total)
        );
        let status = if saved {
            "saved".green()
        } else {
            "not saved".yellow()
        };
        println!("{} {}", "Lecture:".dimmed(), status);

        let mut options = Vec::new();
        if index + 1 < total {
            options.push(NEXT);
        }
        if index > 0 {
            options.push(PREV);
        }
        if total > 2 {
            options.push(GOTO);
        }
        options.extend([REFINE, PRESENT, SAVE, EXPORT, NEW, QUIT]);

        match answered(inquire::Select::new("Review", options).prompt())? {
            Some(NEXT) => navigate(controller, |r| r.next()),
            Some(PREV) => navigate(controller, |r| r.prev()),
            Some(GOTO) => {
                let slide = answered(
                    inquire::CustomType::<usize>::new(&format!("Slide number (1-{total}):"))
                        .prompt(),
                )?;
                if let Some(slide) = slide {
                    navigate(controller, |r| r.go_to(slide.saturating_sub(1)));
                }
            }
            Some(REFINE) => {
                let instruction = answered(
                    inquire::Text::new("How should this slide change?")
                        .with_help_message("e.g. \"add a concrete example\" or \"make it shorter\"")
                        .prompt(),
                )?;
                if let Some(instruction) = instruction {
                    controller.dispatch(Event::RefineSlide { index, instruction })?;
                }
            }
            Some(PRESENT) => controller.dispatch(Event::StartPresentation)?,
            Some(SAVE) => {
                if let Err(e) = controller.save(library) {
                    report(&e);
                }
            }
            Some(EXPORT) => self.export(controller)?,
            Some(NEW) => {
                if saved || confirm_discard()? {
                    controller.dispatch(Event::Reset)?;
                }
            }
            _ => {
                if saved || confirm_discard()? {
                    return Ok(Step::Quit);
                }
            }
        }
        Ok(Step::Continue)
    }

    fn export<G: LectureGenerator>(&self, controller: &Controller<G>) -> Result<()> {
        let Some(review) = controller.state().review() else {
            return Ok(());
        };
        let path = answered(
            inquire::Text::new("Write markdown to:")
                .with_default("lecture.md")
                .prompt(),
        )?;
        if let Some(path) = path {
            std::fs::write(&path, review.deck().to_markdown())
                .with_context(|| format!("Failed to write {path}"))?;
            println!("{} {path}", "Exported to".green());
        }
        Ok(())
    }

    fn present<G: LectureGenerator>(&mut self, controller: &mut Controller<G>) -> Result<Step> {
        let outcome = match controller.state().review() {
            Some(review) => {
                let options = present::options_for(review.deck(), review.current(), self.windowed);
                app::run(review.deck().slides(), options)
            }
            None => Ok(0),
        };
        match outcome {
            Ok(last) => navigate(controller, |r| r.go_to(last)),
            Err(e) => eprintln!("{} {e:#}", "Error:".red().bold()),
        }
        controller.dispatch(Event::ExitPresentation)?;
        Ok(Step::Continue)
    }
}

fn navigate<G: LectureGenerator>(
    controller: &mut Controller<G>,
    action: impl FnOnce(&mut crate::workflow::review::ReviewSession),
) {
    if let Some(review) = controller.review_mut() {
        action(review);
    }
}

fn confirm_discard() -> Result<bool> {
    let answer = answered(
        inquire::Confirm::new("The lecture is not saved. Discard it?")
            .with_default(false)
            .prompt(),
    )?;
    Ok(answer == Some(true))
}

fn report(error: &LectureError) {
    eprintln!("{} {error}", "Error:".red().bold());
}
