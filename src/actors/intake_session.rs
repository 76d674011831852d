use crate::actors::analysis_client::{AnalysisClientActor, AnalyzeCase};
use crate::dto::analysis::CaseAnalysisResponse;
use crate::errors::IntakeError;
use crate::wizard::{AnswerMap, Step, StepView, WizardState};
use actix::prelude::*;
use std::time::Duration;

/// Long enough for the selection to render, nothing more. Not a retry or
/// backoff interval.
const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(400);

// One actor per intake session. Owns the wizard state, the pending
// auto-advance timer and the submission continuation; everything else is
// pure and lives in `wizard`.
pub struct IntakeSessionActor {
    state: WizardState,
    result: Option<CaseAnalysisResponse>,
    pending_advance: Option<SpawnHandle>,
    client: Addr<AnalysisClientActor>,
}

impl IntakeSessionActor {
    pub fn new(client: Addr<AnalysisClientActor>) -> Self {
        Self {
            state: WizardState::new(),
            result: None,
            pending_advance: None,
            client,
        }
    }

    fn cancel_pending_advance(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.pending_advance.take() {
            ctx.cancel_future(handle);
        }
    }

    fn apply_step(&mut self, step: Step, ctx: &mut Context<Self>) {
        match step {
            Step::Moved(next) => self.state = next,
            Step::Submit(next, answers) => {
                self.state = next;
                self.dispatch_submission(answers, ctx);
            }
        }
    }

    fn dispatch_submission(&mut self, answers: AnswerMap, ctx: &mut Context<Self>) {
        log::debug!("Submitting {} answers for analysis.", answers.len());
        let request = self
            .client
            .send(AnalyzeCase { answers })
            .into_actor(self)
            .map(|result, act, _ctx| match result {
                Ok(Ok(analysis)) => {
                    act.result = Some(analysis);
                    act.state = act.state.submission_succeeded();
                }
                Ok(Err(e)) => {
                    act.state = act.state.submission_failed(e.to_string());
                }
                Err(e) => {
                    log::error!("Analysis client mailbox error: {}", e);
                    act.state = act
                        .state
                        .submission_failed("The analysis service is unavailable right now. Please try again.");
                }
            });
        ctx.spawn(request);
    }
}

impl Actor for IntakeSessionActor {
    type Context = Context<Self>;
}

// --- Messages ---

#[derive(Message)]
#[rtype(result = "Result<StepView, IntakeError>")]
pub struct Select {
    pub question_id: String,
    pub value: String,
}

#[derive(Message)]
#[rtype(result = "Result<StepView, IntakeError>")]
pub struct Advance;

#[derive(Message)]
#[rtype(result = "Result<RetreatOutcome, IntakeError>")]
pub struct Retreat;

#[derive(Debug)]
pub enum RetreatOutcome {
    /// Already at the first question; the caller should leave the wizard.
    Exited,
    Stepped(StepView),
}

#[derive(Message)]
#[rtype(result = "StepView")]
pub struct Reset;

#[derive(Message)]
#[rtype(result = "StepView")]
pub struct GetStep;

#[derive(Message)]
#[rtype(result = "Result<CaseAnalysisResponse, IntakeError>")]
pub struct GetAnalysis;

// --- Handlers ---

impl Handler<Select> for IntakeSessionActor {
    type Result = Result<StepView, IntakeError>;

    fn handle(&mut self, msg: Select, ctx: &mut Context<Self>) -> Self::Result {
        let (next, pending) = self.state.select(&msg.question_id, &msg.value)?;

        // A new selection supersedes any scheduled advance.
        self.cancel_pending_advance(ctx);
        self.state = next;

        if let Some(pending) = pending {
            let handle = ctx.run_later(AUTO_ADVANCE_DELAY, move |act, ctx| {
                act.pending_advance = None;
                match act.state.resolve_pending(&pending) {
                    Some(step) => act.apply_step(step, ctx),
                    None => log::debug!("Dropping stale auto-advance."),
                }
            });
            self.pending_advance = Some(handle);
        }

        Ok(self.state.step_view())
    }
}

impl Handler<Advance> for IntakeSessionActor {
    type Result = Result<StepView, IntakeError>;

    fn handle(&mut self, _msg: Advance, ctx: &mut Context<Self>) -> Self::Result {
        let step = self.state.advance()?;
        self.cancel_pending_advance(ctx);
        self.apply_step(step, ctx);
        Ok(self.state.step_view())
    }
}

impl Handler<Retreat> for IntakeSessionActor {
    type Result = Result<RetreatOutcome, IntakeError>;

    fn handle(&mut self, _msg: Retreat, ctx: &mut Context<Self>) -> Self::Result {
        let outcome = self.state.retreat()?;
        // Navigating away cancels a scheduled advance before it can fire
        // against a question the user has left.
        self.cancel_pending_advance(ctx);
        match outcome {
            crate::wizard::Retreat::Exit => Ok(RetreatOutcome::Exited),
            crate::wizard::Retreat::Moved(next) => {
                self.state = next;
                Ok(RetreatOutcome::Stepped(self.state.step_view()))
            }
        }
    }
}

impl Handler<Reset> for IntakeSessionActor {
    type Result = MessageResult<Reset>;

    fn handle(&mut self, _msg: Reset, ctx: &mut Context<Self>) -> Self::Result {
        self.cancel_pending_advance(ctx);
        self.result = None;
        self.state = self.state.reset();
        MessageResult(self.state.step_view())
    }
}

impl Handler<GetStep> for IntakeSessionActor {
    type Result = MessageResult<GetStep>;

    fn handle(&mut self, _msg: GetStep, _ctx: &mut Context<Self>) -> Self::Result {
        MessageResult(self.state.step_view())
    }
}

impl Handler<GetAnalysis> for IntakeSessionActor {
    type Result = Result<CaseAnalysisResponse, IntakeError>;

    fn handle(&mut self, _msg: GetAnalysis, _ctx: &mut Context<Self>) -> Self::Result {
        self.result.clone().ok_or(IntakeError::ResultNotReady)
    }
}
