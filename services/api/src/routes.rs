use crate::estimate::estimate_session;
use crate::infra::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use lead_estimator::error::AppError;
use lead_estimator::leads::report::views::LeadValueSummary;
use lead_estimator::leads::{LeadPatch, LeadRecord, LeadSession};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct EstimateRequest {
    #[serde(default)]
    pub(crate) leads: Vec<LeadRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LeadEntry {
    pub(crate) index: usize,
    pub(crate) label: String,
    #[serde(flatten)]
    pub(crate) record: LeadRecord,
}

impl LeadEntry {
    fn new(index: usize, record: LeadRecord) -> Self {
        Self {
            index,
            label: format!("Lead {}", index + 1),
            record,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LeadListResponse {
    pub(crate) leads: Vec<LeadEntry>,
}

pub(crate) fn lead_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/leads", get(list_leads).post(add_lead))
        .route("/api/v1/leads/:index", patch(update_lead))
        .route("/api/v1/leads/estimate", post(estimate_session_endpoint))
        .route("/api/v1/estimate", post(estimate_endpoint))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn list_leads(State(state): State<AppState>) -> Json<LeadListResponse> {
    let session = state.session.lock();
    Json(list_response(&session))
}

pub(crate) async fn add_lead(State(state): State<AppState>) -> impl IntoResponse {
    let mut session = state.session.lock();
    let index = session.add_default_record();
    info!(index, leads = session.len(), "lead added");
    let entry = LeadEntry::new(index, session.get(index).copied().unwrap_or_default());
    (StatusCode::CREATED, Json(entry))
}

pub(crate) async fn update_lead(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(patch): Json<LeadPatch>,
) -> Result<Json<LeadEntry>, AppError> {
    let mut session = state.session.lock();
    let record = *session.update(index, patch)?;
    info!(index, "lead updated");
    Ok(Json(LeadEntry::new(index, record)))
}

pub(crate) async fn estimate_session_endpoint(
    State(state): State<AppState>,
) -> Result<Json<LeadValueSummary>, AppError> {
    let session = state.session.lock();
    let summary = estimate_session(&state.tables, &session)?;
    Ok(Json(summary))
}

pub(crate) async fn estimate_endpoint(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<LeadValueSummary>, AppError> {
    let session = LeadSession::from_records(request.leads);
    let summary = estimate_session(&state.tables, &session)?;
    Ok(Json(summary))
}

fn list_response(session: &LeadSession) -> LeadListResponse {
    LeadListResponse {
        leads: session
            .list()
            .iter()
            .enumerate()
            .map(|(index, record)| LeadEntry::new(index, *record))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::SharedSession;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use lead_estimator::leads::LookupTables;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state(session: LeadSession) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            tables: Arc::new(LookupTables::standard()),
            session: SharedSession::new(session),
        }
    }

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn stateless_estimate_returns_summary() {
        let router = lead_routes(test_state(LeadSession::empty()));
        let request = json_request(
            Method::POST,
            "/api/v1/estimate",
            json!({
                "leads": [{
                    "lead_type": "distributor",
                    "country": "DE",
                    "industry": "datacenters",
                    "technology": "addressable"
                }]
            }),
        );

        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["expected"]["formatted"], "€34,650.00");
        assert_eq!(body["low"]["formatted"], "€27,720.00");
        assert_eq!(body["high"]["formatted"], "€41,580.00");
        assert_eq!(body["charts"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn empty_estimate_is_a_warning() {
        let router = lead_routes(test_state(LeadSession::empty()));
        let request = json_request(Method::POST, "/api/v1/estimate", json!({ "leads": [] }));

        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["warning"], "Please add at least one lead.");
    }

    #[tokio::test]
    async fn session_leads_can_be_added_edited_and_estimated() {
        let state = test_state(LeadSession::new());
        let router = lead_routes(state.clone());

        let add = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/leads")
            .body(Body::empty())
            .expect("request builds");
        let (status, body) = send(router.clone(), add).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["index"], 1);
        assert_eq!(body["label"], "Lead 2");
        assert_eq!(body["lead_type"], "end-user");

        let edit = json_request(
            Method::PATCH,
            "/api/v1/leads/1",
            json!({ "industry": "healthcare", "country": "ME" }),
        );
        let (status, body) = send(router.clone(), edit).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["industry"], "healthcare");
        assert_eq!(body["technology"], "addressable");

        let estimate = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/leads/estimate")
            .body(Body::empty())
            .expect("request builds");
        let (status, body) = send(router, estimate).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["leads"].as_array().map(Vec::len), Some(2));
        assert_eq!(state.session.lock().len(), 2);
    }

    #[tokio::test]
    async fn editing_unknown_lead_is_not_found() {
        let router = lead_routes(test_state(LeadSession::new()));
        let edit = json_request(Method::PATCH, "/api/v1/leads/7", json!({ "country": "NL" }));

        let (status, body) = send(router, edit).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.contains("lead 7 not found")));
    }

    #[tokio::test]
    async fn leads_cannot_be_deleted() {
        let router = lead_routes(test_state(LeadSession::new()));
        let delete = Request::builder()
            .method(Method::DELETE)
            .uri("/api/v1/leads/0")
            .body(Body::empty())
            .expect("request builds");

        let (status, _) = send(router, delete).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn list_reports_session_order() {
        let router = lead_routes(test_state(LeadSession::new()));
        let list = Request::builder()
            .uri("/api/v1/leads")
            .body(Body::empty())
            .expect("request builds");

        let (status, body) = send(router, list).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["leads"][0]["label"], "Lead 1");
        assert_eq!(body["leads"][0]["country"], "BE");
    }
}
