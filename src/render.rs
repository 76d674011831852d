use crate::classify::{self, Severity, Urgency};
use crate::dto::analysis::{
    CaseAnalysisResponse, OfficialPortalLink, PoliceAction, RecommendedService,
};
use serde::Serialize;

// Pure mapping from an analysis response to display sections. The same
// `ResultView` backs the interactive results endpoint and the printable
// report, so every derived fact is computed exactly once, via `classify`.

#[derive(Debug, Clone, Serialize)]
pub struct SummarySection {
    pub summary: String,
    pub severity: Severity,
    pub severity_label: &'static str,
    pub severity_tier: String,
    pub legal_category: String,
    pub limitation_status: String,
    pub risk_warning: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourcesSection {
    pub portal_links: Vec<OfficialPortalLink>,
    pub police_action: Option<PoliceAction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistRow {
    pub document: String,
    pub source: String,
    pub urgency: Urgency,
    /// The service's free-text urgency note, shown alongside the tag.
    pub urgency_note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub summary: SummarySection,
    pub resources: ResourcesSection,
    pub checklist: Vec<ChecklistRow>,
    pub next_steps: Vec<String>,
    pub cta: RecommendedService,
}

pub fn build_view(analysis: &CaseAnalysisResponse) -> ResultView {
    let case = &analysis.case_analysis;
    let severity = classify::severity(&case.severity_tier);

    ResultView {
        summary: SummarySection {
            summary: case.summary.clone(),
            severity,
            severity_label: severity.label(),
            severity_tier: case.severity_tier.clone(),
            legal_category: case.legal_category.clone(),
            limitation_status: case.limitation_status.clone(),
            risk_warning: case.risk_warning.clone(),
        },
        resources: ResourcesSection {
            portal_links: analysis.actionable_resources.official_portal_links.clone(),
            police_action: analysis.actionable_resources.police_action.clone(),
        },
        checklist: analysis
            .smart_document_checklist
            .iter()
            .map(|item| ChecklistRow {
                document: item.document.clone(),
                source: item.source.clone(),
                urgency: classify::urgency(&item.urgency),
                urgency_note: item.urgency.clone(),
            })
            .collect(),
        next_steps: analysis
            .immediate_next_steps
            .iter()
            .map(|step| classify::strip_step_prefix(step).to_string())
            .collect(),
        cta: analysis.recommended_service.clone(),
    }
}
