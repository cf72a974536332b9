use crate::infra::{build_advisor, AppState};
use artifact_advisor::advisor::{
    Advisor, CollectionQuery, CollectionSummary, HolderBuildSummary, ItemAdvice, Profile,
    ProfileDatabase, UpgradeSuggestion,
};
use artifact_advisor::error::AppError;
use artifact_advisor::inventory::{validate, InventoryImporter, InventorySource, ValidationReport};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeRequest {
    pub(crate) payload: Value,
    #[serde(default)]
    pub(crate) profiles: Vec<String>,
    #[serde(default)]
    pub(crate) query: CollectionQuery,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyzeResponse<'r, 'i> {
    pub(crate) source: InventorySource,
    pub(crate) source_label: &'r str,
    pub(crate) holder_count: usize,
    pub(crate) warnings: &'r [String],
    pub(crate) summary: &'r CollectionSummary<'i>,
    pub(crate) items: Vec<&'r ItemAdvice<'i>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpgradeRequest {
    pub(crate) payload: Value,
    pub(crate) holder: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpgradeResponse<'r, 'i> {
    pub(crate) holder: &'r str,
    pub(crate) in_inventory: bool,
    pub(crate) build: Option<HolderBuildSummary<'i>>,
    pub(crate) suggestions: Vec<UpgradeSuggestion<'i>>,
}

pub(crate) fn advisor_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/profiles", get(profiles_endpoint))
        .route("/api/v1/inventory/validate", post(validate_endpoint))
        .route("/api/v1/inventory/analyze", post(analyze_endpoint))
        .route("/api/v1/inventory/upgrades", post(upgrades_endpoint))
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
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

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn profiles_endpoint() -> Json<&'static [Profile]> {
    Json(ProfileDatabase::standard().list_profiles())
}

pub(crate) async fn validate_endpoint(Json(payload): Json<Value>) -> Json<ValidationReport> {
    Json(validate(&payload))
}

pub(crate) async fn analyze_endpoint(
    Extension(state): Extension<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Response, AppError> {
    let AnalyzeRequest {
        payload,
        profiles,
        query,
    } = request;

    let inventory = InventoryImporter::from_value(payload)?;
    let advisor = build_advisor(&state.analysis, &profiles, &inventory);
    let analysis = advisor.analyze_collection(&inventory.items);

    let body = AnalyzeResponse {
        source: inventory.source,
        source_label: &inventory.source_label,
        holder_count: inventory.holders.len(),
        warnings: &inventory.warnings,
        summary: &analysis.summary,
        items: analysis.query(&query),
    };
    Ok(Json(body).into_response())
}

pub(crate) async fn upgrades_endpoint(
    Json(request): Json<UpgradeRequest>,
) -> Result<Response, AppError> {
    let UpgradeRequest { payload, holder } = request;
    let holder = holder.trim().to_ascii_lowercase();

    let inventory = InventoryImporter::from_value(payload)?;
    let advisor = Advisor::standard();
    let equipped = inventory.equipped_items(&holder);

    let body = UpgradeResponse {
        holder: &holder,
        in_inventory: inventory.holder(&holder).is_some(),
        build: advisor.holder_build(&holder, &equipped),
        suggestions: advisor.suggest_upgrades(&holder, &equipped, &inventory.items),
    };
    Ok(Json(body).into_response())
}
