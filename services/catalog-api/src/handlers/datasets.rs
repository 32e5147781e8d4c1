//! Dataset endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    Json,
};
use climate_catalog::{Coverage, DatasetInfo, FieldDescription, Language, Resolution};
use serde::{Deserialize, Serialize};

use super::record_request;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DatasetsQuery {
    pub resolution: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoverageQuery {
    /// Comma-separated dataset names
    pub dataset: Option<String>,
    pub resolution: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FieldsQuery {
    pub language: Option<String>,
}

/// A dataset together with its parameter names.
#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    #[serde(flatten)]
    pub info: DatasetInfo,
    pub parameters: Vec<String>,
}

/// GET /coverage - Parameter names per dataset, grouped by resolution
pub async fn coverage_handler(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<CoverageQuery>, QueryRejection>,
) -> Result<Json<Coverage>, ApiError> {
    record_request("coverage");
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;

    let datasets: Option<Vec<&str>> = query.dataset.as_deref().map(|d| {
        d.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    });
    let resolution = query
        .resolution
        .as_deref()
        .map(str::parse::<Resolution>)
        .transpose()?;

    let coverage = state
        .registry
        .coverage_filtered(datasets.as_deref(), resolution)?;
    Ok(Json(coverage))
}

/// GET /datasets - List datasets, optionally filtered by resolution
pub async fn list_datasets_handler(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<DatasetsQuery>, QueryRejection>,
) -> Result<Json<Vec<DatasetInfo>>, ApiError> {
    record_request("datasets");
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;

    let datasets = match query.resolution {
        Some(r) => state.registry.datasets_for(r.parse::<Resolution>()?),
        None => state.registry.list_datasets(),
    };

    Ok(Json(datasets.into_iter().cloned().collect()))
}

/// GET /datasets/:dataset - Dataset metadata
pub async fn get_dataset_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(dataset): Path<String>,
) -> Result<Json<DatasetResponse>, ApiError> {
    record_request("dataset");
    let info = state.registry.get_dataset(&dataset)?.clone();
    let parameters = state
        .registry
        .list_parameters(&dataset)?
        .iter()
        .map(|p| p.name.clone())
        .collect();

    Ok(Json(DatasetResponse { info, parameters }))
}

/// GET /datasets/:dataset/fields - Parameter descriptions in English or German
pub async fn fields_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(dataset): Path<String>,
    query: Result<Query<FieldsQuery>, QueryRejection>,
) -> Result<Json<Vec<FieldDescription>>, ApiError> {
    record_request("fields");
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;

    let language = match query.language {
        Some(l) => l.parse::<Language>()?,
        None => Language::default(),
    };

    Ok(Json(state.registry.describe(&dataset, language)?))
}
