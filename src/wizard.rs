use crate::catalog::{self, Question, QuestionKind};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One stored answer. Serializes untagged, so the submission body carries a
/// plain string for single-select and an array for multi-select.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multi(BTreeSet<String>),
}

/// Keys are question ids. A key is present only once the user has selected
/// something; multi-select values are never empty while present.
pub type AnswerMap = BTreeMap<String, AnswerValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error("an answer is required before advancing")]
    ValidationBlocked,
    #[error("'{got}' is not the question currently being asked")]
    QuestionMismatch { got: String },
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("the intake is complete; start a new case to make changes")]
    NotEditing,
}

/// Directive produced by a single-select answer: advance (or submit, when the
/// selection was on the last question) after a short render delay. It carries
/// the answer set snapshotted at selection time and the state version it was
/// scheduled against; a version mismatch at fire time means the user moved on
/// and the directive is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAdvance {
    pub version: u64,
    pub answers: AnswerMap,
    pub submits: bool,
}

/// Outcome of a forward step.
#[derive(Debug, Clone)]
pub enum Step {
    Moved(WizardState),
    /// The wizard entered `Submitting`; the map is what must be sent.
    Submit(WizardState, AnswerMap),
}

#[derive(Debug, Clone)]
pub enum Retreat {
    /// Already at the first question; the caller should leave the wizard.
    Exit,
    Moved(WizardState),
}

/// The whole intake wizard as a value. Transitions return a fresh state with
/// a bumped version; nothing here schedules timers or talks to the network.
#[derive(Debug, Clone)]
pub struct WizardState {
    version: u64,
    current_index: usize,
    answers: AnswerMap,
    phase: Phase,
    last_error: Option<String>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            version: 0,
            current_index: 0,
            answers: AnswerMap::new(),
            phase: Phase::Editing,
            last_error: None,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// `current_index` is kept in range by every transition.
    pub fn current_question(&self) -> &'static Question {
        catalog::get(self.current_index).unwrap_or_else(|| {
            panic!("wizard index {} out of range", self.current_index)
        })
    }

    /// Completion fraction for display only.
    pub fn progress(&self) -> f32 {
        (self.current_index + 1) as f32 / catalog::len() as f32
    }

    fn bump(&self) -> Self {
        let mut next = self.clone();
        next.version += 1;
        next
    }

    fn is_last(&self) -> bool {
        self.current_index + 1 == catalog::len()
    }

    fn editable(&self) -> Result<(), WizardError> {
        match self.phase {
            Phase::Editing | Phase::Failed => Ok(()),
            Phase::Submitting => Err(WizardError::SubmissionInFlight),
            Phase::Succeeded => Err(WizardError::NotEditing),
        }
    }

    /// Record a selection on the current question.
    ///
    /// Single-select overwrites and returns a `PendingAdvance` for the caller
    /// to schedule. Multi-select toggles membership immediately and never
    /// auto-advances; toggling the last option off removes the key entirely.
    pub fn select(
        &self,
        question_id: &str,
        value: &str,
    ) -> Result<(WizardState, Option<PendingAdvance>), WizardError> {
        self.editable()?;
        let question = self.current_question();
        if question.id != question_id {
            return Err(WizardError::QuestionMismatch {
                got: question_id.to_string(),
            });
        }

        let mut next = self.bump();
        if next.phase == Phase::Failed {
            next.phase = Phase::Editing;
            next.last_error = None;
        }

        match question.kind {
            QuestionKind::SingleSelect => {
                next.answers
                    .insert(question.id.to_string(), AnswerValue::Single(value.to_string()));
                let pending = PendingAdvance {
                    version: next.version,
                    answers: next.answers.clone(),
                    submits: next.is_last(),
                };
                Ok((next, Some(pending)))
            }
            QuestionKind::MultiSelect => {
                let mut set = match next.answers.remove(question.id) {
                    Some(AnswerValue::Multi(set)) => set,
                    _ => BTreeSet::new(),
                };
                if !set.remove(value) {
                    set.insert(value.to_string());
                }
                if !set.is_empty() {
                    next.answers
                        .insert(question.id.to_string(), AnswerValue::Multi(set));
                }
                Ok((next, None))
            }
        }
    }

    /// True iff the current question has a present, non-empty answer.
    pub fn can_advance(&self) -> bool {
        match self.answers.get(self.current_question().id) {
            Some(AnswerValue::Single(value)) => !value.is_empty(),
            Some(AnswerValue::Multi(set)) => !set.is_empty(),
            None => false,
        }
    }

    /// Explicit forward step. On the last question this starts submission.
    pub fn advance(&self) -> Result<Step, WizardError> {
        self.editable()?;
        if !self.can_advance() {
            return Err(WizardError::ValidationBlocked);
        }
        if self.is_last() {
            let snapshot = self.answers.clone();
            Ok(Step::Submit(self.begin_submission(), snapshot))
        } else {
            let mut next = self.bump();
            next.current_index += 1;
            next.phase = Phase::Editing;
            next.last_error = None;
            Ok(Step::Moved(next))
        }
    }

    /// Step backward; at the first question this signals exit instead of
    /// mutating anything.
    pub fn retreat(&self) -> Result<Retreat, WizardError> {
        self.editable()?;
        if self.current_index == 0 {
            return Ok(Retreat::Exit);
        }
        let mut next = self.bump();
        next.current_index -= 1;
        next.phase = Phase::Editing;
        next.last_error = None;
        Ok(Retreat::Moved(next))
    }

    /// Apply a fired auto-advance. Returns `None` when the directive is stale,
    /// i.e. the state changed after it was scheduled.
    pub fn resolve_pending(&self, pending: &PendingAdvance) -> Option<Step> {
        if pending.version != self.version {
            return None;
        }
        if pending.submits {
            Some(Step::Submit(self.begin_submission(), pending.answers.clone()))
        } else {
            let mut next = self.bump();
            next.current_index += 1;
            Some(Step::Moved(next))
        }
    }

    pub fn begin_submission(&self) -> WizardState {
        let mut next = self.bump();
        next.phase = Phase::Submitting;
        next.last_error = None;
        next
    }

    pub fn submission_succeeded(&self) -> WizardState {
        let mut next = self.bump();
        next.phase = Phase::Succeeded;
        next
    }

    /// Answers are kept so the user can retry without re-answering.
    pub fn submission_failed(&self, message: impl Into<String>) -> WizardState {
        let mut next = self.bump();
        next.phase = Phase::Failed;
        next.last_error = Some(message.into());
        next
    }

    /// Explicit "start a new case": everything cleared, version keeps growing
    /// so directives scheduled before the reset can never apply afterwards.
    pub fn reset(&self) -> WizardState {
        let mut next = WizardState::new();
        next.version = self.version + 1;
        next
    }

    pub fn step_view(&self) -> StepView {
        let question = self.current_question();
        StepView {
            index: self.current_index,
            total: catalog::len(),
            progress: self.progress(),
            part: question.part,
            part_label: catalog::part_label(question.part),
            question,
            selected: self.answers.get(question.id).cloned(),
            can_advance: self.can_advance(),
            phase: self.phase,
            last_error: self.last_error.clone(),
        }
    }
}

/// What the UI needs to render one wizard step.
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub index: usize,
    pub total: usize,
    pub progress: f32,
    pub part: u8,
    pub part_label: &'static str,
    pub question: &'static Question,
    pub selected: Option<AnswerValue>,
    pub can_advance: bool,
    pub phase: Phase,
    pub last_error: Option<String>,
}
