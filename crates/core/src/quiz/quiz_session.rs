use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use chromalab_palette::{ColorRegistry, Rgb};

use crate::config::Settings;

use super::generator;
use super::question::{QuizQuestion, RelationKind};

/// Verdict currently showing for the active question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

/// What a submission did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The submission was dropped: feedback is showing, no question is
    /// active, or the option index is out of range.
    Ignored,
    /// A multi-pick answer was toggled but is not complete yet.
    PartialSelection,
    Correct,
    Incorrect,
}

enum PendingAction {
    AdvanceQuestion,
    ClearFeedback,
}

// Transitions are driven by the caller's clock, not a timer thread. The
// session records what should happen and when; tick() fires it.
struct PendingTransition {
    due: Instant,
    action: PendingAction,
}

/// One quiz run: question generation, answer judging, scoring and the
/// delayed transitions between rounds.
pub struct QuizSession {
    registry: ColorRegistry,
    rng: StdRng,
    settings: Settings,
    question: Option<QuizQuestion>,
    selection: Vec<Rgb>,
    feedback: Option<Feedback>,
    pending: Option<PendingTransition>,
    score: u32,
}

impl QuizSession {
    pub fn new(settings: Settings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Deterministic session for tests and replayable runs.
    pub fn seeded(settings: Settings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: Settings, rng: StdRng) -> Self {
        QuizSession {
            registry: ColorRegistry::new(),
            rng,
            settings,
            question: None,
            selection: Vec::new(),
            feedback: None,
            pending: None,
            score: 0,
        }
    }

    pub fn question(&self) -> Option<&QuizQuestion> {
        self.question.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// Picks made so far on a multi-pick question.
    pub fn selection(&self) -> &[Rgb] {
        &self.selection
    }

    /// When the scheduled transition fires, if one is scheduled.
    pub fn pending_due(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Replace the current question with a fresh one, discarding feedback,
    /// picks and any scheduled transition.
    pub fn next_question(&mut self) -> &QuizQuestion {
        self.pending = None;
        self.feedback = None;
        self.selection.clear();

        let bias = self.settings.mix_question_bias.clamp(0.0, 1.0);
        let question = if self.rng.random_bool(bias) {
            match generator::mix_question(&self.registry, &mut self.rng) {
                Some(question) => QuizQuestion::Mix(question),
                None => {
                    log::warn!("mixture pool was empty, falling back to a relation question");
                    QuizQuestion::Relation(generator::relation_question(
                        &self.registry,
                        &mut self.rng,
                    ))
                }
            }
        } else {
            QuizQuestion::Relation(generator::relation_question(&self.registry, &mut self.rng))
        };

        self.question.insert(question)
    }

    /// Submit the option at `option_index` as (part of) an answer.
    ///
    /// Submissions are ignored while verdict feedback is showing. A wrong
    /// answer keeps the question so the player can retry it after the
    /// feedback clears; a right one scores and schedules the next round.
    pub fn submit(&mut self, option_index: usize, now: Instant) -> AnswerOutcome {
        if self.feedback.is_some() {
            return AnswerOutcome::Ignored;
        }
        let question = match &self.question {
            Some(question) => question,
            None => return AnswerOutcome::Ignored,
        };

        let correct = match question {
            QuizQuestion::Mix(question) => {
                let option = match question.options.get(option_index) {
                    Some(option) => option,
                    None => {
                        log::warn!("ignoring out-of-range option {}", option_index);
                        return AnswerOutcome::Ignored;
                    }
                };
                question.is_correct(option)
            }
            QuizQuestion::Relation(question) => {
                let option = match question.options.get(option_index) {
                    Some(option) => option,
                    None => {
                        log::warn!("ignoring out-of-range option {}", option_index);
                        return AnswerOutcome::Ignored;
                    }
                };
                let picked = option.rgb;

                match question.kind {
                    RelationKind::Opposite => question.is_correct_selection(&[picked]),
                    RelationKind::Similar => {
                        // Picks toggle until enough are in to judge.
                        if let Some(position) =
                            self.selection.iter().position(|&rgb| rgb == picked)
                        {
                            self.selection.remove(position);
                        } else {
                            self.selection.push(picked);
                        }
                        if self.selection.len() < question.kind.required_picks() {
                            return AnswerOutcome::PartialSelection;
                        }
                        question.is_correct_selection(&self.selection)
                    }
                }
            }
        };

        if correct {
            self.score += self.settings.points_per_correct;
            self.feedback = Some(Feedback::Correct);
            self.pending = Some(PendingTransition {
                due: now + self.settings.feedback_delay(),
                action: PendingAction::AdvanceQuestion,
            });
            AnswerOutcome::Correct
        } else {
            self.feedback = Some(Feedback::Incorrect);
            self.pending = Some(PendingTransition {
                due: now + self.settings.feedback_delay(),
                action: PendingAction::ClearFeedback,
            });
            AnswerOutcome::Incorrect
        }
    }

    /// Fire the scheduled transition once its time has come.
    pub fn tick(&mut self, now: Instant) {
        match self.pending.take() {
            Some(pending) if pending.due <= now => match pending.action {
                PendingAction::AdvanceQuestion => {
                    self.next_question();
                }
                PendingAction::ClearFeedback => {
                    self.feedback = None;
                    self.selection.clear();
                }
            },
            other => self.pending = other,
        }
    }
}
