use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::aggregate::{SourceGeneration, NATIONAL_SCOPE};
use crate::errors::AppError;
use crate::resolve::{resolve_emissions, EmissionsSource};
use crate::AppState;

/// Static placeholder value, kept until a real renewables pipeline exists.
const RENEWABLE_SHARE: f64 = 65.5;

// ── Request / Response DTOs ──────────────────────────────────

#[derive(Serialize)]
pub struct GenerateKeyResponse {
    pub api_key: String,
    pub expires_at: String,
}

/// Emissions behavior flags, shared by the summary endpoints. Both default
/// to true when absent from the query string.
#[derive(Deserialize)]
pub struct EmissionsFlags {
    #[serde(default = "default_true")]
    pub estimate_emissions: bool,
    #[serde(default = "default_true")]
    pub use_manual_override: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Serialize)]
pub struct NationalSummaryResponse {
    pub total_generation: f64,
    pub total_emissions: f64,
    pub emissions_source: EmissionsSource,
    pub renewable_share: f64,
}

#[derive(Serialize)]
pub struct RegionSummaryResponse {
    pub region: String,
    pub total_generation: f64,
    pub by_source: Vec<SourceGeneration>,
    pub total_emissions: f64,
    pub emissions_source: EmissionsSource,
}

#[derive(Deserialize)]
pub struct SetEmissionsRequest {
    pub scope: String,
    pub value: f64,
}

#[derive(Serialize)]
pub struct SetEmissionsResponse {
    pub scope: String,
    pub value: f64,
}

#[derive(Serialize)]
pub struct ExampleUsageResponse {
    pub generate_key: &'static str,
    pub national_summary: &'static str,
    pub region_summary: &'static str,
    pub message: &'static str,
}

// ── Handlers ─────────────────────────────────────────────────

/// GET /api/generate-key — issue a fresh 30-minute API key (no auth)
pub async fn generate_key(State(state): State<Arc<AppState>>) -> Json<GenerateKeyResponse> {
    let issued = state.tokens.issue();
    Json(GenerateKeyResponse {
        api_key: issued.api_key,
        expires_at: issued
            .expires_at
            .to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}

/// GET /api/energy/summary — national generation and emissions totals
pub async fn national_summary(
    State(state): State<Arc<AppState>>,
    Query(flags): Query<EmissionsFlags>,
) -> Json<NationalSummaryResponse> {
    let resolved = resolve_emissions(
        NATIONAL_SCOPE,
        flags.estimate_emissions,
        flags.use_manual_override,
        &state.overrides,
        &state.aggregator,
    );
    Json(NationalSummaryResponse {
        total_generation: state.aggregator.national_generation(),
        total_emissions: resolved.total,
        emissions_source: resolved.source,
        renewable_share: RENEWABLE_SHARE,
    })
}

/// GET /api/energy/region/:name — per-region summary with source breakdown
pub async fn region_summary(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(flags): Query<EmissionsFlags>,
) -> Result<Json<RegionSummaryResponse>, AppError> {
    // Exact-match lookup: region names are case-sensitive.
    let region = state
        .regions
        .get(&name)
        .ok_or_else(|| AppError::UnknownRegion(name.clone()))?;

    let resolved = resolve_emissions(
        &name,
        flags.estimate_emissions,
        flags.use_manual_override,
        &state.overrides,
        &state.aggregator,
    );
    Ok(Json(RegionSummaryResponse {
        region: region.region.clone(),
        total_generation: region.total_generation,
        by_source: region.by_source.clone(),
        total_emissions: resolved.total,
        emissions_source: resolved.source,
    }))
}

/// POST /api/energy/emissions/override — record a manual emissions figure.
/// The scope is not checked against known regions: an override for a
/// nonexistent region is accepted and sits inert until something reads it.
pub async fn set_manual_emissions(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SetEmissionsRequest>,
) -> Result<Json<SetEmissionsResponse>, AppError> {
    let stored = state.overrides.set(&payload.scope, payload.value)?;
    tracing::info!(
        "manual emissions set: scope='{}' value={}",
        payload.scope,
        stored
    );
    Ok(Json(SetEmissionsResponse {
        scope: payload.scope,
        value: stored,
    }))
}

/// GET /api/energy/examples — usage hints (no auth)
pub async fn example_usage() -> Json<ExampleUsageResponse> {
    Json(ExampleUsageResponse {
        generate_key: "/api/generate-key",
        national_summary: "/api/energy/summary",
        region_summary: "/api/energy/region/Nairobi",
        message: "Fetch an API key from /api/generate-key and send it in the 'x-api-key' header.",
    })
}
