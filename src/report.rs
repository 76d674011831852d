use crate::dto::analysis::CaseAnalysisResponse;
use crate::render;
use chrono::{DateTime, Local};
use minijinja::Environment;
use once_cell::sync::Lazy;

static REPORT_TEMPLATE: &str = include_str!("templates/report.html");

pub const BRAND: &str = "NyayaSetu";

static JINJA_ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_template("report.html", REPORT_TEMPLATE).unwrap();
    env
});

/// Render the standalone printable report. Deterministic in its two inputs:
/// the analysis is mapped through the same `ResultView` the interactive
/// results use, and the timestamp is passed in rather than read here, so a
/// fixed clock yields byte-identical output.
pub fn render_report(
    analysis: &CaseAnalysisResponse,
    generated_at: DateTime<Local>,
) -> Result<String, minijinja::Error> {
    let view = render::build_view(analysis);
    let tmpl = JINJA_ENV.get_template("report.html")?;
    tmpl.render(minijinja::context! {
        brand => BRAND,
        generated_on => generated_at.format("%d %B %Y").to_string(),
        view => minijinja::Value::from_serialize(&view),
    })
}
