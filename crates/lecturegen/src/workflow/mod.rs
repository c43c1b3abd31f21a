pub mod review;

use crate::error::{LectureError, Result};
use crate::generation::{Answer, LectureGenerator, LectureInfo, Question, SyllabusAnalysis};
use crate::ingest;
use crate::library::{LectureLibrary, SavedLecture};
use crate::parser::Deck;
use review::ReviewSession;

/// Syllabus text and optional metadata submitted in the Upload step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub syllabus: String,
    pub info: Option<LectureInfo>,
}

impl Draft {
    pub fn new(syllabus: impl Into<String>) -> Self {
        Self {
            syllabus: syllabus.into(),
            info: None,
        }
    }

    pub fn with_info(mut self, info: LectureInfo) -> Self {
        self.info = (!info.is_empty()).then_some(info);
        self
    }
}

/// The wizard step together with the data it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Home,
    /// Waiting for syllabus text. Carries the last submission after a failed
    /// analysis so it can be offered again.
    Upload { previous: Option<Draft> },
    Analyzing { draft: Draft },
    Refine {
        draft: Draft,
        summary: String,
        questions: Vec<Question>,
        answers: Vec<Answer>,
    },
    Generating {
        draft: Draft,
        summary: String,
        questions: Vec<Question>,
        answers: Vec<Answer>,
    },
    Result { review: ReviewSession },
    SlideGenerating {
        review: ReviewSession,
        index: usize,
        instruction: String,
    },
    Presentation { review: ReviewSession },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Upload { .. } => "upload",
            Self::Analyzing { .. } => "analyzing",
            Self::Refine { .. } => "refine",
            Self::Generating { .. } => "generating",
            Self::Result { .. } => "result",
            Self::SlideGenerating { .. } => "slide generating",
            Self::Presentation { .. } => "presentation",
        }
    }

    /// True while a request to the generation service is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            Self::Analyzing { .. } | Self::Generating { .. } | Self::SlideGenerating { .. }
        )
    }

    pub fn review(&self) -> Option<&ReviewSession> {
        match self {
            Self::Result { review }
            | Self::SlideGenerating { review, .. }
            | Self::Presentation { review } => Some(review),
            _ => None,
        }
    }

    fn review_mut(&mut self) -> Option<&mut ReviewSession> {
        match self {
            Self::Result { review } | Self::Presentation { review } => Some(review),
            _ => None,
        }
    }
}

/// Inputs that drive the state machine.
#[derive(Debug, Clone)]
pub enum Event {
    StartNew,
    SubmitSyllabus(Draft),
    AnalysisReady(SyllabusAnalysis),
    AnalysisFailed,
    SubmitAnswers(Vec<Answer>),
    GenerationReady(String),
    GenerationFailed,
    OpenLecture(SavedLecture),
    RefineSlide { index: usize, instruction: String },
    RefineReady(String),
    RefineFailed,
    StartPresentation,
    ExitPresentation,
    Reset,
}

impl Event {
    fn name(&self) -> &'static str {
        match self {
            Self::StartNew => "start a new lecture",
            Self::SubmitSyllabus(_) => "submit a syllabus",
            Self::AnalysisReady(_) | Self::AnalysisFailed => "finish analysis",
            Self::SubmitAnswers(_) => "submit answers",
            Self::GenerationReady(_) | Self::GenerationFailed => "finish generation",
            Self::OpenLecture(_) => "open a saved lecture",
            Self::RefineSlide { .. } => "refine a slide",
            Self::RefineReady(_) | Self::RefineFailed => "finish refinement",
            Self::StartPresentation => "start the presentation",
            Self::ExitPresentation => "exit the presentation",
            Self::Reset => "reset",
        }
    }
}

/// Work requested by a transition, carried out by [`Controller`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Analyze {
        syllabus: String,
        info: Option<LectureInfo>,
    },
    Generate {
        syllabus: String,
        answers: Vec<Answer>,
        info: Option<LectureInfo>,
    },
    Refine {
        slide: String,
        instruction: String,
    },
}

/// Outcome of [`WorkflowState::next`].
pub type Transition =
    std::result::Result<(WorkflowState, Option<Effect>), (WorkflowState, LectureError)>;

impl WorkflowState {
    /// Compute the state that follows `event`.
    ///
    /// On error the unchanged state is handed back alongside the error.
    pub fn next(self, event: Event) -> Transition {
        use WorkflowState as S;

        match (self, event) {
            (_, Event::Reset) => Ok((S::Home, None)),

            (S::Home, Event::StartNew) => Ok((S::Upload { previous: None }, None)),
            (S::Home, Event::OpenLecture(lecture)) => match ReviewSession::from_saved(&lecture) {
                Ok(review) => Ok((S::Result { review }, None)),
                Err(e) => Err((S::Home, e)),
            },

            (state @ S::Upload { .. }, Event::SubmitSyllabus(draft)) => {
                if let Err(e) = ingest::validate_syllabus(&draft.syllabus) {
                    return Err((state, e));
                }
                let effect = Effect::Analyze {
                    syllabus: draft.syllabus.clone(),
                    info: draft.info.clone(),
                };
                Ok((S::Analyzing { draft }, Some(effect)))
            }

            (S::Analyzing { draft }, Event::AnalysisReady(analysis)) => {
                if analysis.questions.is_empty() {
                    let effect = Effect::Generate {
                        syllabus: draft.syllabus.clone(),
                        answers: Vec::new(),
                        info: draft.info.clone(),
                    };
                    let state = S::Generating {
                        draft,
                        summary: analysis.summary,
                        questions: Vec::new(),
                        answers: Vec::new(),
                    };
                    return Ok((state, Some(effect)));
                }
                let state = S::Refine {
                    draft,
                    summary: analysis.summary,
                    questions: analysis.questions,
                    answers: Vec::new(),
                };
                Ok((state, None))
            }
            (S::Analyzing { draft }, Event::AnalysisFailed) => Ok((
                S::Upload {
                    previous: Some(draft),
                },
                None,
            )),

            (
                S::Refine {
                    draft,
                    summary,
                    questions,
                    ..
                },
                Event::SubmitAnswers(answers),
            ) => {
                let effect = Effect::Generate {
                    syllabus: draft.syllabus.clone(),
                    answers: answers.clone(),
                    info: draft.info.clone(),
                };
                let state = S::Generating {
                    draft,
                    summary,
                    questions,
                    answers,
                };
                Ok((state, Some(effect)))
            }

            (state @ S::Generating { .. }, Event::GenerationReady(markdown)) => {
                match ReviewSession::from_markdown(&markdown) {
                    Ok(review) => Ok((S::Result { review }, None)),
                    Err(e) => Err((state, e)),
                }
            }
            (
                S::Generating {
                    draft,
                    summary,
                    questions,
                    answers,
                },
                Event::GenerationFailed,
            ) => Ok((
                S::Refine {
                    draft,
                    summary,
                    questions,
                    answers,
                },
                None,
            )),

            (S::Result { review }, Event::RefineSlide { index, instruction }) => {
                if instruction.trim().is_empty() {
                    return Ok((S::Result { review }, None));
                }
                let Some(slide) = review.deck().get(index).map(str::to_string) else {
                    let e = LectureError::Validation(format!("There is no slide {}", index + 1));
                    return Err((S::Result { review }, e));
                };
                let effect = Effect::Refine {
                    slide,
                    instruction: instruction.clone(),
                };
                let state = S::SlideGenerating {
                    review,
                    index,
                    instruction,
                };
                Ok((state, Some(effect)))
            }
            (
                S::SlideGenerating {
                    mut review, index, ..
                },
                Event::RefineReady(slide),
            ) => {
                review.apply_refinement(index, slide);
                Ok((S::Result { review }, None))
            }
            (S::SlideGenerating { review, .. }, Event::RefineFailed) => {
                Ok((S::Result { review }, None))
            }

            (S::Result { review }, Event::StartPresentation) => {
                Ok((S::Presentation { review }, None))
            }
            (S::Presentation { review }, Event::ExitPresentation) => {
                Ok((S::Result { review }, None))
            }

            (state, event) => {
                let e = LectureError::InvalidTransition {
                    state: state.name(),
                    event: event.name(),
                };
                Err((state, e))
            }
        }
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message for the user, collected by the controller and drained by the
/// front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Owns the workflow state and runs the generation requests its transitions
/// ask for.
///
/// Requests are made one at a time and block until they resolve. A failed
/// request is logged, reported as a notice and turned into the matching
/// failure event, so the state falls back to the nearest interactive step.
pub struct Controller<G> {
    generator: G,
    state: WorkflowState,
    notices: Vec<Notice>,
}

impl<G: LectureGenerator> Controller<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            state: WorkflowState::Home,
            notices: Vec::new(),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Navigation and other edits on the open lecture.
    pub fn review_mut(&mut self) -> Option<&mut ReviewSession> {
        self.state.review_mut()
    }

    /// Apply one event and run every request it leads to.
    ///
    /// An event that is not valid for the current state is rejected and the
    /// state is left as it was.
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        let mut effect = self.apply(event)?;
        while let Some(next) = effect.take() {
            let outcome = self.run(next);
            effect = self.apply(outcome)?;
        }
        Ok(())
    }

    /// Save the open lecture in `library`.
    pub fn save(&mut self, library: &mut LectureLibrary) -> Result<SavedLecture> {
        let state = self.state.name();
        let review = self.state.review_mut().ok_or(LectureError::InvalidTransition {
            state,
            event: "save the lecture",
        })?;
        let saved = review.save(library)?;
        self.notices
            .push(Notice::info(format!("Saved \"{}\" to the library", saved.title)));
        Ok(saved)
    }

    /// Take the notices collected since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn apply(&mut self, event: Event) -> Result<Option<Effect>> {
        let current = std::mem::replace(&mut self.state, WorkflowState::Home);
        let from = current.name();
        match current.next(event) {
            Ok((next, effect)) => {
                tracing::debug!(
                    from,
                    to = next.name(),
                    loading = next.is_loading(),
                    "workflow transition"
                );
                self.state = next;
                Ok(effect)
            }
            Err((unchanged, e)) => {
                tracing::debug!(state = from, error = %e, "event rejected");
                self.state = unchanged;
                Err(e)
            }
        }
    }

    fn run(&mut self, effect: Effect) -> Event {
        match effect {
            Effect::Analyze { syllabus, info } => {
                match self.generator.analyze(&syllabus, info.as_ref()) {
                    Ok(analysis) => {
                        tracing::info!(
                            questions = analysis.questions.len(),
                            missing_info = analysis.missing_info,
                            "syllabus analyzed"
                        );
                        Event::AnalysisReady(analysis)
                    }
                    Err(e) => self.fail("analyze", e, Event::AnalysisFailed),
                }
            }
            Effect::Generate {
                syllabus,
                answers,
                info,
            } => match self.generator.generate(&syllabus, &answers, info.as_ref()) {
                Ok(markdown) if Deck::from_markdown(&markdown).is_empty() => self.fail(
                    "generate",
                    LectureError::Generation("the service returned an empty document".to_string()),
                    Event::GenerationFailed,
                ),
                Ok(markdown) => {
                    tracing::info!(bytes = markdown.len(), "lecture generated");
                    Event::GenerationReady(markdown)
                }
                Err(e) => self.fail("generate", e, Event::GenerationFailed),
            },
            Effect::Refine { slide, instruction } => {
                match self.generator.refine_slide(&slide, &instruction) {
                    Ok(updated) if updated.trim().is_empty() => self.fail(
                        "refine_slide",
                        LectureError::Refine("the service returned an empty slide".to_string()),
                        Event::RefineFailed,
                    ),
                    Ok(updated) => Event::RefineReady(updated),
                    Err(e) => self.fail("refine_slide", e, Event::RefineFailed),
                }
            }
        }
    }

    fn fail(&mut self, operation: &'static str, error: LectureError, event: Event) -> Event {
        tracing::error!(
            operation,
            service = error.is_service_failure(),
            error = %error,
            "generation request failed"
        );
        self.notices.push(Notice::error(error.to_string()));
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::QuestionKind;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    const SYLLABUS: &str =
        "Week 1: Relational model. Week 2: SQL joins. Week 3: Indexing and query plans.";

    /// Replays queued responses and records which operations were called.
    #[derive(Default)]
    struct Scripted {
        analyses: RefCell<VecDeque<Result<SyllabusAnalysis>>>,
        decks: RefCell<VecDeque<Result<String>>>,
        refinements: RefCell<VecDeque<Result<String>>>,
        calls: RefCell<Vec<&'static str>>,
    }

    impl Scripted {
        fn analysis(self, result: Result<SyllabusAnalysis>) -> Self {
            self.analyses.borrow_mut().push_back(result);
            self
        }

        fn deck(self, result: Result<String>) -> Self {
            self.decks.borrow_mut().push_back(result);
            self
        }

        fn refinement(self, result: Result<String>) -> Self {
            self.refinements.borrow_mut().push_back(result);
            self
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().clone()
        }
    }

    impl LectureGenerator for Scripted {
        fn extract_text(&self, _: &[u8], _: &str) -> Result<String> {
            self.calls.borrow_mut().push("extract_text");
            Err(LectureError::Extraction("not scripted".into()))
        }

        fn analyze(&self, _: &str, _: Option<&LectureInfo>) -> Result<SyllabusAnalysis> {
            self.calls.borrow_mut().push("analyze");
            self.analyses.borrow_mut().pop_front().expect("unexpected analyze call")
        }

        fn generate(&self, _: &str, _: &[Answer], _: Option<&LectureInfo>) -> Result<String> {
            self.calls.borrow_mut().push("generate");
            self.decks.borrow_mut().pop_front().expect("unexpected generate call")
        }

        fn refine_slide(&self, _: &str, _: &str) -> Result<String> {
            self.calls.borrow_mut().push("refine_slide");
            self.refinements.borrow_mut().pop_front().expect("unexpected refine call")
        }
    }

    fn analysis(questions: usize) -> SyllabusAnalysis {
        SyllabusAnalysis {
            missing_info: questions > 0,
            summary: "Databases".into(),
            questions: (0..questions)
                .map(|i| Question {
                    id: format!("q{i}"),
                    question: format!("Question {i}?"),
                    context: String::new(),
                    kind: QuestionKind::Text,
                    options: Vec::new(),
                })
                .collect(),
        }
    }

    fn answers() -> Vec<Answer> {
        vec![Answer {
            question_id: "q0".into(),
            question_text: "Question 0?".into(),
            answer: "Graduate students".into(),
        }]
    }

    const DECK: &str = "# Databases\n- intro\n> welcome everyone\n# Joins\n- inner\n- outer\n";

    fn at_result(generator: Scripted) -> Controller<Scripted> {
        let mut controller = Controller::new(generator.analysis(Ok(analysis(0))).deck(Ok(DECK.into())));
        controller.dispatch(Event::StartNew).unwrap();
        controller
            .dispatch(Event::SubmitSyllabus(Draft::new(SYLLABUS)))
            .unwrap();
        assert!(matches!(controller.state(), WorkflowState::Result { .. }));
        controller
    }

    #[test]
    fn test_failed_extraction_stays_in_upload() {
        let dir = tempfile::tempdir().unwrap();
        let scan = dir.path().join("syllabus.pdf");
        std::fs::write(&scan, b"%PDF-1.7").unwrap();

        let mut controller = Controller::new(Scripted::default());
        controller.dispatch(Event::StartNew).unwrap();
        let err = crate::ingest::read_syllabus(&scan, controller.generator()).unwrap_err();

        assert!(matches!(err, LectureError::Extraction(_)));
        assert!(err.is_service_failure());
        assert!(matches!(controller.state(), WorkflowState::Upload { previous: None }));
        assert_eq!(controller.generator().calls(), vec!["extract_text"]);
    }

    #[test]
    fn test_short_syllabus_rejected_before_any_call() {
        let mut controller = Controller::new(Scripted::default());
        controller.dispatch(Event::StartNew).unwrap();
        let err = controller
            .dispatch(Event::SubmitSyllabus(Draft::new("0123456789")))
            .unwrap_err();
        assert!(matches!(err, LectureError::Validation(_)));
        assert_eq!(controller.state(), &WorkflowState::Upload { previous: None });
        assert!(controller.generator().calls().is_empty());
    }

    #[test]
    fn test_no_questions_skips_refine() {
        let controller = at_result(Scripted::default());
        assert_eq!(controller.generator().calls(), vec!["analyze", "generate"]);
        let review = controller.state().review().unwrap();
        assert_eq!(review.len(), 2);
        assert!(!review.is_saved());
    }

    #[test]
    fn test_questions_lead_to_refine() {
        let generator = Scripted::default().analysis(Ok(analysis(2)));
        let mut controller = Controller::new(generator);
        controller.dispatch(Event::StartNew).unwrap();
        controller
            .dispatch(Event::SubmitSyllabus(Draft::new(SYLLABUS)))
            .unwrap();

        match controller.state() {
            WorkflowState::Refine {
                questions, answers, summary, ..
            } => {
                assert_eq!(questions.len(), 2);
                assert!(answers.is_empty());
                assert_eq!(summary, "Databases");
            }
            other => panic!("unexpected state {other:?}"),
        }
        assert_eq!(controller.generator().calls(), vec!["analyze"]);
    }

    #[test]
    fn test_generation_failure_returns_to_refine_with_answers() {
        let generator = Scripted::default()
            .analysis(Ok(analysis(1)))
            .deck(Err(LectureError::Generation("overloaded".into())))
            .deck(Ok(DECK.into()));
        let mut controller = Controller::new(generator);
        controller.dispatch(Event::StartNew).unwrap();
        controller
            .dispatch(Event::SubmitSyllabus(Draft::new(SYLLABUS)))
            .unwrap();
        controller.dispatch(Event::SubmitAnswers(answers())).unwrap();

        match controller.state() {
            WorkflowState::Refine { answers: kept, .. } => assert_eq!(kept, &answers()),
            other => panic!("unexpected state {other:?}"),
        }
        let notices = controller.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notices[0].message.contains("overloaded"));
        assert!(controller.take_notices().is_empty());

        controller.dispatch(Event::SubmitAnswers(answers())).unwrap();
        assert!(matches!(controller.state(), WorkflowState::Result { .. }));
    }

    #[test]
    fn test_analysis_failure_returns_to_upload_with_draft() {
        let generator =
            Scripted::default().analysis(Err(LectureError::Analysis("bad schema".into())));
        let mut controller = Controller::new(generator);
        controller.dispatch(Event::StartNew).unwrap();
        controller
            .dispatch(Event::SubmitSyllabus(Draft::new(SYLLABUS)))
            .unwrap();

        assert_eq!(
            controller.state(),
            &WorkflowState::Upload {
                previous: Some(Draft::new(SYLLABUS))
            }
        );
        assert_eq!(controller.take_notices().len(), 1);
    }

    #[test]
    fn test_empty_generation_is_a_failure() {
        let generator = Scripted::default()
            .analysis(Ok(analysis(0)))
            .deck(Ok("   \n".into()));
        let mut controller = Controller::new(generator);
        controller.dispatch(Event::StartNew).unwrap();
        controller
            .dispatch(Event::SubmitSyllabus(Draft::new(SYLLABUS)))
            .unwrap();
        assert!(matches!(controller.state(), WorkflowState::Refine { .. }));
        assert_eq!(controller.take_notices()[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_refine_success_replaces_one_slide() {
        let mut controller = at_result(Scripted::default().refinement(Ok("# Joins\n- left join".into())));
        controller
            .dispatch(Event::RefineSlide {
                index: 1,
                instruction: "mention left joins".into(),
            })
            .unwrap();

        let review = controller.state().review().unwrap();
        assert!(matches!(controller.state(), WorkflowState::Result { .. }));
        assert_eq!(review.deck().get(0), Some("# Databases\n- intro\n> welcome everyone\n"));
        assert_eq!(review.deck().get(1), Some("# Joins\n- left join"));
    }

    #[test]
    fn test_refine_failure_leaves_slide_untouched() {
        let mut controller =
            at_result(Scripted::default().refinement(Err(LectureError::Refine("timeout".into()))));
        let before = controller.state().review().unwrap().clone();
        controller
            .dispatch(Event::RefineSlide {
                index: 0,
                instruction: "shorter".into(),
            })
            .unwrap();

        assert_eq!(controller.state(), &WorkflowState::Result { review: before });
        assert_eq!(controller.take_notices()[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_blank_instruction_makes_no_call() {
        let mut controller = at_result(Scripted::default());
        controller
            .dispatch(Event::RefineSlide {
                index: 0,
                instruction: "   ".into(),
            })
            .unwrap();
        assert_eq!(controller.generator().calls(), vec!["analyze", "generate"]);
    }

    #[test]
    fn test_refine_out_of_range() {
        let mut controller = at_result(Scripted::default());
        let err = controller
            .dispatch(Event::RefineSlide {
                index: 9,
                instruction: "anything".into(),
            })
            .unwrap_err();
        assert!(matches!(err, LectureError::Validation(_)));
        assert!(matches!(controller.state(), WorkflowState::Result { .. }));
    }

    #[test]
    fn test_invalid_transition_leaves_state() {
        let mut controller = Controller::new(Scripted::default());
        let err = controller.dispatch(Event::StartPresentation).unwrap_err();
        assert!(matches!(
            err,
            LectureError::InvalidTransition { state: "home", .. }
        ));
        assert_eq!(controller.state(), &WorkflowState::Home);

        controller.dispatch(Event::StartNew).unwrap();
        assert!(controller.dispatch(Event::SubmitAnswers(Vec::new())).is_err());
        assert_eq!(controller.state(), &WorkflowState::Upload { previous: None });
    }

    #[test]
    fn test_presentation_round_trip() {
        let mut controller = at_result(Scripted::default());
        controller.review_mut().unwrap().go_to(1);
        controller.dispatch(Event::StartPresentation).unwrap();
        assert!(matches!(controller.state(), WorkflowState::Presentation { .. }));
        assert!(controller.dispatch(Event::RefineSlide { index: 0, instruction: "x".into() }).is_err());
        controller.dispatch(Event::ExitPresentation).unwrap();
        assert_eq!(controller.state().review().unwrap().current(), 1);
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut controller = at_result(Scripted::default());
        controller.dispatch(Event::Reset).unwrap();
        assert_eq!(controller.state(), &WorkflowState::Home);
        assert!(controller.state().review().is_none());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = LectureLibrary::open(dir.path()).unwrap();
        let mut controller = at_result(Scripted::default());

        let saved = controller.save(&mut library).unwrap();
        assert_eq!(saved.title, "Databases");
        assert!(controller.state().review().unwrap().is_saved());
        assert_eq!(controller.take_notices()[0].level, NoticeLevel::Info);

        controller.dispatch(Event::Reset).unwrap();
        assert!(controller.save(&mut library).is_err());
        controller.dispatch(Event::OpenLecture(saved.clone())).unwrap();
        let review = controller.state().review().unwrap();
        assert_eq!(review.saved_id(), Some(saved.id.as_str()));
        assert_eq!(review.deck().to_markdown(), DECK);
    }

    #[test]
    fn test_loading_states() {
        let draft = Draft::new(SYLLABUS);
        assert!(WorkflowState::Analyzing { draft }.is_loading());
        assert!(!WorkflowState::Home.is_loading());
    }

    #[test]
    fn test_empty_info_is_dropped() {
        let draft = Draft::new(SYLLABUS).with_info(LectureInfo::default());
        assert!(draft.info.is_none());
    }
}
