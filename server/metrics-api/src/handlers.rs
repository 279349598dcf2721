//! HTTP handlers. Thin: validate, snapshot the store, delegate to the engine.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use tracing::info;

use dora_engine::{calculator, filter_by_window, report, Deployment, Incident, MetricsReport};

use crate::error::ApiError;
use crate::query::{range_from_query, RangeQuery};
use crate::state::AppState;
use crate::types::{
  DeploymentList, DeploymentPayload, DurationMetric, IncidentList, IncidentPayload,
  ResolveResponse, ScalarMetric, StateSnapshot,
};

pub async fn health() -> &'static str {
  "ok"
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

pub async fn dora_report(
  State(state): State<Arc<AppState>>,
  Query(query): Query<RangeQuery>,
) -> Result<Json<MetricsReport>, ApiError> {
  let range = range_from_query(&query, Utc::now());
  let deployments = state.deployments.read().await;
  let incidents = state.incidents.read().await;

  let report = MetricsReport::build(&deployments, &incidents, &range)
    .map_err(|e| ApiError::Internal(e.to_string()))?;
  Ok(Json(report))
}

pub async fn deployment_frequency(
  State(state): State<Arc<AppState>>,
  Query(query): Query<RangeQuery>,
) -> Json<ScalarMetric> {
  let range = range_from_query(&query, Utc::now());
  let deployments = state.deployments.read().await;
  let windowed = filter_by_window(deployments.as_slice(), &range);

  Json(ScalarMetric {
    value: calculator::deployment_frequency(&windowed, &range),
    unit: "per_day",
  })
}

pub async fn lead_time(
  State(state): State<Arc<AppState>>,
  Query(query): Query<RangeQuery>,
) -> Json<DurationMetric> {
  let range = range_from_query(&query, Utc::now());
  let deployments = state.deployments.read().await;
  let windowed = filter_by_window(deployments.as_slice(), &range);

  let lead = calculator::lead_time(&windowed);
  Json(DurationMetric {
    value: report::humanize_duration(lead),
    seconds: lead.num_seconds(),
    unit: "duration",
  })
}

pub async fn mttr(
  State(state): State<Arc<AppState>>,
  Query(query): Query<RangeQuery>,
) -> Json<DurationMetric> {
  let range = range_from_query(&query, Utc::now());
  let incidents = state.incidents.read().await;
  let windowed = filter_by_window(incidents.as_slice(), &range);

  let mttr = calculator::mttr(&windowed);
  Json(DurationMetric {
    value: report::humanize_duration(mttr),
    seconds: mttr.num_seconds(),
    unit: "duration",
  })
}

pub async fn change_failure_rate(
  State(state): State<Arc<AppState>>,
  Query(query): Query<RangeQuery>,
) -> Json<ScalarMetric> {
  let range = range_from_query(&query, Utc::now());
  let deployments = state.deployments.read().await;
  let incidents = state.incidents.read().await;
  let windowed_deployments = filter_by_window(deployments.as_slice(), &range);
  let windowed_incidents = filter_by_window(incidents.as_slice(), &range);

  Json(ScalarMetric {
    value: calculator::change_failure_rate(&windowed_deployments, &windowed_incidents),
    unit: "ratio",
  })
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

pub async fn create_deployment(
  State(state): State<Arc<AppState>>,
  Json(payload): Json<DeploymentPayload>,
) -> Result<(StatusCode, Json<Deployment>), ApiError> {
  let deployment = payload.into_deployment(Utc::now())?;
  info!(
    id = %deployment.id,
    service = %deployment.service,
    environment = %deployment.environment,
    "deployment ingested"
  );
  state.deployments.write().await.push(deployment.clone());
  Ok((StatusCode::CREATED, Json(deployment)))
}

pub async fn list_deployments(
  State(state): State<Arc<AppState>>,
  Query(query): Query<RangeQuery>,
) -> Json<DeploymentList> {
  let range = range_from_query(&query, Utc::now());
  let deployments = state.deployments.read().await;
  let mut windowed = filter_by_window(deployments.as_slice(), &range);
  windowed.sort_by_key(|d| d.start_time);

  let count = windowed.len();
  Json(DeploymentList {
    deployments: windowed,
    count,
  })
}

pub async fn create_incident(
  State(state): State<Arc<AppState>>,
  Json(payload): Json<IncidentPayload>,
) -> Result<(StatusCode, Json<Incident>), ApiError> {
  let incident = payload.into_incident(Utc::now())?;
  info!(
    id = %incident.id,
    service = %incident.service,
    severity = ?incident.severity,
    "incident ingested"
  );
  state.incidents.write().await.push(incident.clone());
  Ok((StatusCode::CREATED, Json(incident)))
}

pub async fn list_incidents(
  State(state): State<Arc<AppState>>,
  Query(query): Query<RangeQuery>,
) -> Json<IncidentList> {
  let range = range_from_query(&query, Utc::now());
  let incidents = state.incidents.read().await;
  let mut windowed = filter_by_window(incidents.as_slice(), &range);
  windowed.sort_by_key(|i| i.start_time);

  let count = windowed.len();
  Json(IncidentList {
    incidents: windowed,
    count,
  })
}

/// Stamp the resolution time exactly once; a second resolve is a conflict.
pub async fn resolve_incident(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<ResolveResponse>, ApiError> {
  let mut incidents = state.incidents.write().await;
  let incident = incidents
    .iter_mut()
    .find(|i| i.id == id)
    .ok_or_else(|| ApiError::NotFound("incident not found".into()))?;

  if incident.resolved_time.is_some() {
    return Err(ApiError::Conflict("incident already resolved".into()));
  }

  let now = Utc::now();
  incident.resolved_time = Some(now);
  info!(id = %id, "incident resolved");
  Ok(Json(ResolveResponse { resolved_at: now }))
}

pub async fn list_state(
  State(state): State<Arc<AppState>>,
  Query(query): Query<RangeQuery>,
) -> Json<StateSnapshot> {
  let range = range_from_query(&query, Utc::now());
  let deployments = state.deployments.read().await;
  let incidents = state.incidents.read().await;

  let mut windowed_deployments = filter_by_window(deployments.as_slice(), &range);
  windowed_deployments.sort_by_key(|d| d.start_time);
  let mut windowed_incidents = filter_by_window(incidents.as_slice(), &range);
  windowed_incidents.sort_by_key(|i| i.start_time);

  Json(StateSnapshot {
    deployments: windowed_deployments,
    incidents: windowed_incidents,
  })
}
