use crate::actors::health::{HealthActor, ReportAnalysisLatency};
use crate::dto::analysis::CaseAnalysisResponse;
use crate::wizard::AnswerMap;
use actix::prelude::*;
use std::time::{Duration, Instant};

/// Failure surface of the analysis call. The user sees only this message;
/// the underlying transport or status detail is logged where it happened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("The analysis service is unavailable right now. Please try again.")]
    Unavailable,
}

// Transport half of the submission flow. One request per message, no retry;
// the phase gate against concurrent submissions lives in the session actor.
pub struct AnalysisClientActor {
    http: reqwest::Client,
    endpoint: String,
    health: Addr<HealthActor>,
}

impl AnalysisClientActor {
    pub fn new(base_url: &str, timeout: Duration, health: Addr<HealthActor>) -> Self {
        let http = match reqwest::Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                log::warn!("Could not configure the HTTP client ({}); using defaults.", e);
                reqwest::Client::new()
            }
        };
        Self {
            http,
            endpoint: format!("{}/api/v1/case/analyze", base_url.trim_end_matches('/')),
            health,
        }
    }
}

impl Actor for AnalysisClientActor {
    type Context = Context<Self>;
}

#[derive(Message)]
#[rtype(result = "Result<CaseAnalysisResponse, AnalysisError>")]
pub struct AnalyzeCase {
    pub answers: AnswerMap,
}

impl Handler<AnalyzeCase> for AnalysisClientActor {
    type Result = ResponseFuture<Result<CaseAnalysisResponse, AnalysisError>>;

    fn handle(&mut self, msg: AnalyzeCase, _ctx: &mut Context<Self>) -> Self::Result {
        let http = self.http.clone();
        let endpoint = self.endpoint.clone();
        let health = self.health.clone();

        Box::pin(async move {
            let started = Instant::now();
            let result = http.post(&endpoint).json(&msg.answers).send().await;
            health.do_send(ReportAnalysisLatency(started.elapsed().as_secs_f64() * 1000.0));

            let response = result.map_err(|e| {
                log::error!("Analysis request failed: {}", e);
                AnalysisError::Unavailable
            })?;

            // Any non-2xx is a uniform failure; no status-specific handling.
            if !response.status().is_success() {
                log::error!("Analysis service returned {}", response.status());
                return Err(AnalysisError::Unavailable);
            }

            response.json::<CaseAnalysisResponse>().await.map_err(|e| {
                log::error!("Could not decode analysis response: {}", e);
                AnalysisError::Unavailable
            })
        })
    }
}
