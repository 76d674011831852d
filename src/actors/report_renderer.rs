use crate::actors::health::{HealthActor, ReportRenderLatency};
use crate::dto::analysis::CaseAnalysisResponse;
use crate::errors::IntakeError;
use crate::report;
use actix::prelude::*;
use std::time::Instant;

// CPU-bound HTML rendering, kept off the event loop in a SyncArbiter
// (thread count decided in main from the core allocation).
pub struct ReportRendererActor {
    health: Addr<HealthActor>,
}

impl ReportRendererActor {
    pub fn new(health: Addr<HealthActor>) -> Self {
        Self { health }
    }
}

impl Actor for ReportRendererActor {
    type Context = SyncContext<Self>;
}

#[derive(Message)]
#[rtype(result = "Result<String, IntakeError>")]
pub struct RenderReport {
    pub analysis: CaseAnalysisResponse,
}

impl Handler<RenderReport> for ReportRendererActor {
    type Result = Result<String, IntakeError>;

    fn handle(&mut self, msg: RenderReport, _ctx: &mut Self::Context) -> Self::Result {
        let started = Instant::now();
        let result = report::render_report(&msg.analysis, chrono::Local::now());
        self.health
            .do_send(ReportRenderLatency(started.elapsed().as_secs_f64() * 1000.0));

        result.map_err(|e| {
            log::error!("Report rendering failed: {}", e);
            IntakeError::ReportFailed
        })
    }
}
