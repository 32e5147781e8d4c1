//! Parameter endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    Json,
};
use climate_catalog::Metadata;
use serde::{Deserialize, Serialize};

use super::record_request;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    /// Value in the parameter's origin unit.
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct ConversionResponse {
    pub dataset: String,
    pub parameter: String,
    pub origin_unit: String,
    pub si_unit: String,
    pub origin_value: f64,
    pub si_value: f64,
    /// Whether the origin value satisfies the parameter's constraint.
    pub valid: bool,
}

/// GET /datasets/:dataset/parameters - Parameters in declaration order
pub async fn list_parameters_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(dataset): Path<String>,
) -> Result<Json<Vec<Metadata>>, ApiError> {
    record_request("parameters");
    Ok(Json(state.registry.list_parameters(&dataset)?.to_vec()))
}

/// GET /datasets/:dataset/parameters/:parameter - Parameter metadata
pub async fn lookup_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((dataset, parameter)): Path<(String, String)>,
) -> Result<Json<Metadata>, ApiError> {
    record_request("lookup");
    Ok(Json(state.registry.lookup(&dataset, &parameter)?.clone()))
}

/// GET /datasets/:dataset/parameters/:parameter/convert?value= - Convert to SI
pub async fn convert_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((dataset, parameter)): Path<(String, String)>,
    query: Result<Query<ConvertQuery>, QueryRejection>,
) -> Result<Json<ConversionResponse>, ApiError> {
    record_request("convert");
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;

    let meta = state.registry.lookup(&dataset, &parameter)?;
    let si_value = state.registry.convert_metadata(meta, query.value)?;

    Ok(Json(ConversionResponse {
        dataset: meta.dataset.clone(),
        parameter: meta.name.clone(),
        origin_unit: meta.origin_unit.clone(),
        si_unit: meta.si_unit.clone(),
        origin_value: query.value,
        si_value,
        valid: meta.is_valid(query.value),
    }))
}
