use serde::{Deserialize, Serialize};

// Wire types for the analysis service (`POST /api/v1/case/analyze`).
// The response is held verbatim for the lifetime of the results view;
// everything derived from it (severity, urgency) lives in `classify`.

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CaseAnalysis {
    pub summary: String,
    pub legal_category: String,
    pub severity_tier: String,
    pub limitation_status: String,
    #[serde(default)]
    pub risk_warning: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OfficialPortalLink {
    pub name: String,
    pub url: String,
    pub purpose: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PoliceAction {
    pub step: String,
    pub legal_code: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ActionableResources {
    pub official_portal_links: Vec<OfficialPortalLink>,
    #[serde(default)]
    pub police_action: Option<PoliceAction>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DocumentChecklistItem {
    pub document: String,
    pub source: String,
    pub urgency: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecommendedService {
    pub product_name: String,
    pub price_point: String,
    pub cta_text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CaseAnalysisResponse {
    pub case_analysis: CaseAnalysis,
    pub actionable_resources: ActionableResources,
    pub smart_document_checklist: Vec<DocumentChecklistItem>,
    pub immediate_next_steps: Vec<String>,
    pub recommended_service: RecommendedService,
}
