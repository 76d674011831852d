use crate::actors::health::{GetSystemHealth, HealthActor};
use crate::actors::intake_session::{
    Advance, GetAnalysis, GetStep, IntakeSessionActor, Reset, Retreat, RetreatOutcome, Select,
};
use crate::actors::report_renderer::{RenderReport, ReportRendererActor};
use crate::actors::session_registry::{
    CreateSession, GetSession, RemoveSession, SessionRegistryActor,
};
use crate::errors::IntakeError;
use actix::Addr;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use uuid::Uuid;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api/v1/intake")
            .route("", web::post().to(create_intake))
            .route("/{id}", web::get().to(get_step))
            .route("/{id}", web::delete().to(discard_intake))
            .route("/{id}/select", web::post().to(select_answer))
            .route("/{id}/advance", web::post().to(advance))
            .route("/{id}/retreat", web::post().to(retreat))
            .route("/{id}/reset", web::post().to(reset))
            .route("/{id}/result", web::get().to(get_result))
            .route("/{id}/report", web::get().to(get_report)),
    );
}

async fn session_addr(
    registry: &Addr<SessionRegistryActor>,
    id: &str,
) -> Result<Addr<IntakeSessionActor>, IntakeError> {
    let id = Uuid::parse_str(id).map_err(|_| IntakeError::UnknownSession)?;
    registry
        .send(GetSession(id))
        .await?
        .ok_or(IntakeError::UnknownSession)
}

async fn create_intake(
    registry: web::Data<Addr<SessionRegistryActor>>,
) -> Result<HttpResponse, IntakeError> {
    let created = registry.send(CreateSession).await?;
    let step = created.addr.send(GetStep).await?;
    Ok(HttpResponse::Created().json(serde_json::json!({
        "session_id": created.id.to_string(),
        "step": step,
    })))
}

async fn get_step(
    registry: web::Data<Addr<SessionRegistryActor>>,
    path: web::Path<String>,
) -> Result<HttpResponse, IntakeError> {
    let session = session_addr(&registry, &path).await?;
    let step = session.send(GetStep).await?;
    Ok(HttpResponse::Ok().json(step))
}

async fn discard_intake(
    registry: web::Data<Addr<SessionRegistryActor>>,
    path: web::Path<String>,
) -> Result<HttpResponse, IntakeError> {
    let id = Uuid::parse_str(&path).map_err(|_| IntakeError::UnknownSession)?;
    if registry.send(RemoveSession(id)).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(IntakeError::UnknownSession)
    }
}

#[derive(Deserialize)]
struct SelectBody {
    question_id: String,
    value: String,
}

async fn select_answer(
    registry: web::Data<Addr<SessionRegistryActor>>,
    path: web::Path<String>,
    body: web::Json<SelectBody>,
) -> Result<HttpResponse, IntakeError> {
    let session = session_addr(&registry, &path).await?;
    let body = body.into_inner();
    let step = session
        .send(Select {
            question_id: body.question_id,
            value: body.value,
        })
        .await??;
    Ok(HttpResponse::Ok().json(step))
}

async fn advance(
    registry: web::Data<Addr<SessionRegistryActor>>,
    path: web::Path<String>,
) -> Result<HttpResponse, IntakeError> {
    let session = session_addr(&registry, &path).await?;
    let step = session.send(Advance).await??;
    Ok(HttpResponse::Ok().json(step))
}

async fn retreat(
    registry: web::Data<Addr<SessionRegistryActor>>,
    path: web::Path<String>,
) -> Result<HttpResponse, IntakeError> {
    let session = session_addr(&registry, &path).await?;
    match session.send(Retreat).await?? {
        RetreatOutcome::Exited => {
            Ok(HttpResponse::Ok().json(serde_json::json!({ "exited": true })))
        }
        RetreatOutcome::Stepped(step) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "exited": false,
            "step": step,
        }))),
    }
}

async fn reset(
    registry: web::Data<Addr<SessionRegistryActor>>,
    path: web::Path<String>,
) -> Result<HttpResponse, IntakeError> {
    let session = session_addr(&registry, &path).await?;
    let step = session.send(Reset).await?;
    Ok(HttpResponse::Ok().json(step))
}

async fn get_result(
    registry: web::Data<Addr<SessionRegistryActor>>,
    path: web::Path<String>,
) -> Result<HttpResponse, IntakeError> {
    let session = session_addr(&registry, &path).await?;
    let analysis = session.send(GetAnalysis).await??;
    Ok(HttpResponse::Ok().json(crate::render::build_view(&analysis)))
}

async fn get_report(
    registry: web::Data<Addr<SessionRegistryActor>>,
    renderer: web::Data<Addr<ReportRendererActor>>,
    path: web::Path<String>,
) -> Result<HttpResponse, IntakeError> {
    let session = session_addr(&registry, &path).await?;
    let analysis = session.send(GetAnalysis).await??;
    let html = renderer.send(RenderReport { analysis }).await??;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

pub async fn health_check(health_actor: web::Data<Addr<HealthActor>>) -> impl Responder {
    match health_actor.send(GetSystemHealth).await {
        Ok(health) => HttpResponse::Ok().json(health),
        Err(e) => {
            log::error!("Could not retrieve system health: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::analysis_client::AnalysisClientActor;
    use crate::catalog;
    use crate::render::fixtures::sample_analysis;
    use actix::Actor;
    use actix_web::{App, test};
    use std::time::Duration;

    fn stub_analysis_server() -> actix_test::TestServer {
        actix_test::start(|| {
            App::new().route(
                "/api/v1/case/analyze",
                web::post().to(|body: web::Json<serde_json::Value>| async move {
                    // All eleven answers must be present in the wire map.
                    assert_eq!(body.as_object().unwrap().len(), 11);
                    HttpResponse::Ok().json(sample_analysis("CRITICAL (Level 8/10)"))
                }),
            )
        })
    }

    async fn test_app(
        analysis_url: &str,
    ) -> (
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        > + use<>,
        Addr<HealthActor>,
    ) {
        let health = HealthActor::new().start();
        let client =
            AnalysisClientActor::new(analysis_url, Duration::from_secs(5), health.clone()).start();
        let registry = SessionRegistryActor::new(client).start();
        let health_for_renderer = health.clone();
        let renderer =
            actix::SyncArbiter::start(1, move || ReportRendererActor::new(health_for_renderer.clone()));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(registry))
                .app_data(web::Data::new(renderer))
                .app_data(web::Data::new(health.clone()))
                .configure(configure),
        )
        .await;
        (app, health)
    }

    #[actix_rt::test]
    async fn test_wizard_round_trip_to_report() {
        let server = stub_analysis_server();
        let (app, _health) = test_app(&server.url("")).await;

        // Start a session.
        let resp = test::call_service(&app, test::TestRequest::post().uri("/api/v1/intake").to_request()).await;
        assert_eq!(resp.status(), 201);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let id = body["session_id"].as_str().unwrap().to_string();
        assert_eq!(body["step"]["question"]["id"], "location");

        // Answer every question; the explicit advance supersedes the
        // auto-advance timer so the test stays deterministic.
        for index in 0..catalog::len() {
            let question = catalog::get(index).unwrap();
            let resp = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri(&format!("/api/v1/intake/{}/select", id))
                    .set_json(serde_json::json!({
                        "question_id": question.id,
                        "value": question.options[0],
                    }))
                    .to_request(),
            )
            .await;
            assert!(resp.status().is_success(), "select {} failed", question.id);

            let resp = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri(&format!("/api/v1/intake/{}/advance", id))
                    .to_request(),
            )
            .await;
            assert!(resp.status().is_success(), "advance from {} failed", question.id);
        }

        // Poll until the submission settles.
        let mut phase = String::new();
        for _ in 0..50 {
            let resp = test::call_service(
                &app,
                test::TestRequest::get()
                    .uri(&format!("/api/v1/intake/{}", id))
                    .to_request(),
            )
            .await;
            let step: serde_json::Value = test::read_body_json(resp).await;
            phase = step["phase"].as_str().unwrap().to_string();
            if phase != "submitting" {
                break;
            }
            actix_rt::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(phase, "succeeded");

        // Result view and report agree on the severity classification.
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/intake/{}/result", id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
        let result: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(result["summary"]["severity"], "critical");

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/intake/{}/report", id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains(r#"<span class="badge critical">CRITICAL</span>"#));
    }

    #[actix_rt::test]
    async fn test_result_is_conflict_before_submission() {
        let server = stub_analysis_server();
        let (app, _health) = test_app(&server.url("")).await;

        let resp = test::call_service(&app, test::TestRequest::post().uri("/api/v1/intake").to_request()).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        let id = body["session_id"].as_str().unwrap();

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/intake/{}/result", id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 409);
    }

    #[actix_rt::test]
    async fn test_unknown_session_is_not_found() {
        let server = stub_analysis_server();
        let (app, _health) = test_app(&server.url("")).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/intake/{}", Uuid::new_v4()))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/intake/not-a-uuid")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_rt::test]
    async fn test_advance_without_answer_is_bad_request() {
        let server = stub_analysis_server();
        let (app, _health) = test_app(&server.url("")).await;

        let resp = test::call_service(&app, test::TestRequest::post().uri("/api/v1/intake").to_request()).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        let id = body["session_id"].as_str().unwrap();

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/intake/{}/advance", id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Please choose an answer before continuing.");
    }

    #[actix_rt::test]
    async fn test_retreat_at_first_question_signals_exit() {
        let server = stub_analysis_server();
        let (app, _health) = test_app(&server.url("")).await;

        let resp = test::call_service(&app, test::TestRequest::post().uri("/api/v1/intake").to_request()).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        let id = body["session_id"].as_str().unwrap();

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/intake/{}/retreat", id))
                .to_request(),
        )
        .await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["exited"], true);
    }

    #[actix_rt::test]
    async fn test_discard_session() {
        let server = stub_analysis_server();
        let (app, _health) = test_app(&server.url("")).await;

        let resp = test::call_service(&app, test::TestRequest::post().uri("/api/v1/intake").to_request()).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        let id = body["session_id"].as_str().unwrap().to_string();

        let resp = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/api/v1/intake/{}", id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 204);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/intake/{}", id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_rt::test]
    async fn test_health_endpoint_reports_windows() {
        let server = stub_analysis_server();
        let (app, health) = test_app(&server.url("")).await;

        health.do_send(crate::actors::health::ReportAnalysisLatency(42.0));
        actix_rt::time::sleep(Duration::from_millis(50)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["thirty_seconds"]["analysis_service"]["samples"], 1);
    }
}
