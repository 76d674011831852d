use actix::prelude::*;
use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

// --- Messages ---

#[derive(Message)]
#[rtype(result = "()")]
pub struct ReportAnalysisLatency(pub f64);

#[derive(Message)]
#[rtype(result = "()")]
pub struct ReportRenderLatency(pub f64);

#[derive(Message)]
#[rtype(result = "SystemHealth")]
pub struct GetSystemHealth;

// --- Data Structures ---

#[derive(Serialize, Clone, Debug)]
pub struct LatencyMetrics {
    pub p95_ms: f64,
    pub mean_ms: f64,
    pub samples: usize,
}

#[derive(Serialize, Clone, Debug)]
pub struct TimeWindowMetrics {
    pub analysis_service: LatencyMetrics,
    pub report_renderer: LatencyMetrics,
}

#[derive(Message, Serialize, Clone, Debug)]
#[rtype(result = "()")]
pub struct SystemHealth {
    pub thirty_seconds: TimeWindowMetrics,
    pub one_minute: TimeWindowMetrics,
    pub five_minutes: TimeWindowMetrics,
}

struct MetricDataPoint {
    timestamp: Instant,
    value: f64,
}

/// Oldest samples dropped past this horizon (the widest reported window).
const RETENTION: Duration = Duration::from_secs(300);

// --- Actor ---

pub struct HealthActor {
    analysis_latency_data: VecDeque<MetricDataPoint>,
    render_latency_data: VecDeque<MetricDataPoint>,
}

impl HealthActor {
    pub fn new() -> Self {
        Self {
            analysis_latency_data: VecDeque::new(),
            render_latency_data: VecDeque::new(),
        }
    }

    fn record(data: &mut VecDeque<MetricDataPoint>, value: f64) {
        let now = Instant::now();
        data.push_back(MetricDataPoint { timestamp: now, value });
        while let Some(front) = data.front() {
            if now.duration_since(front.timestamp) > RETENTION {
                data.pop_front();
            } else {
                break;
            }
        }
    }

    fn calculate_window_metrics(&self, window: Duration) -> TimeWindowMetrics {
        let now = Instant::now();

        let calculate_metrics_for = |data: &VecDeque<MetricDataPoint>| -> LatencyMetrics {
            let mut values: Vec<f64> = data
                .iter()
                .filter(|dp| now.duration_since(dp.timestamp) < window)
                .map(|dp| dp.value)
                .collect();

            if values.is_empty() {
                return LatencyMetrics {
                    p95_ms: 0.0,
                    mean_ms: 0.0,
                    samples: 0,
                };
            }

            values.sort_by(|a, b| a.partial_cmp(b).unwrap());

            let p95_index = (values.len() as f64 * 0.95).floor() as usize;
            let p95 = values[p95_index.min(values.len() - 1)];
            let mean = values.iter().sum::<f64>() / values.len() as f64;

            LatencyMetrics {
                p95_ms: p95,
                mean_ms: mean,
                samples: values.len(),
            }
        };

        TimeWindowMetrics {
            analysis_service: calculate_metrics_for(&self.analysis_latency_data),
            report_renderer: calculate_metrics_for(&self.render_latency_data),
        }
    }
}

impl Actor for HealthActor {
    type Context = Context<Self>;
}

// --- Handlers ---

impl Handler<ReportAnalysisLatency> for HealthActor {
    type Result = ();
    fn handle(&mut self, msg: ReportAnalysisLatency, _ctx: &mut Context<Self>) {
        Self::record(&mut self.analysis_latency_data, msg.0);
    }
}

impl Handler<ReportRenderLatency> for HealthActor {
    type Result = ();
    fn handle(&mut self, msg: ReportRenderLatency, _ctx: &mut Context<Self>) {
        Self::record(&mut self.render_latency_data, msg.0);
    }
}

impl Handler<GetSystemHealth> for HealthActor {
    type Result = MessageResult<GetSystemHealth>;

    fn handle(&mut self, _msg: GetSystemHealth, _ctx: &mut Context<Self>) -> Self::Result {
        MessageResult(SystemHealth {
            thirty_seconds: self.calculate_window_metrics(Duration::from_secs(30)),
            one_minute: self.calculate_window_metrics(Duration::from_secs(60)),
            five_minutes: self.calculate_window_metrics(Duration::from_secs(300)),
        })
    }
}
