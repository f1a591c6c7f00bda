use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kitchencalc_core::converter::{all_converter_descriptors, ConverterDescriptor};
use kitchencalc_core::lookup::air_fryer::air_fryer_food_table;
use kitchencalc_core::lookup::cake_pan::cake_pan_table;
use kitchencalc_core::lookup::doneness::doneness_table;
use kitchencalc_core::lookup::meat::meat_table;
use kitchencalc_core::lookup::TableName;
use kitchencalc_core::{CalcError, CalculationRequest, CalculationResponse};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::AppState;

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub suggestions: Vec<String>,
}

pub enum ApiError {
    Calc(CalcError),
    Request(JsonRejection),
}

impl From<CalcError> for ApiError {
    fn from(err: CalcError) -> Self {
        ApiError::Calc(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Calc(err) => {
                let status = match err {
                    CalcError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    CalcError::NotFound { .. } => StatusCode::NOT_FOUND,
                    CalcError::Config(_) | CalcError::Io(_) | CalcError::Toml(_) => {
                        error!("engine configuration failure: {err}");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                let body = ErrorBody {
                    error: err.kind().to_string(),
                    message: err.to_string(),
                    suggestions: err.suggestions().to_vec(),
                };
                (status, body)
            }
            ApiError::Request(rejection) => (
                rejection.status(),
                ErrorBody {
                    error: "invalid_request".to_string(),
                    message: rejection.body_text(),
                    suggestions: Vec::new(),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn converters() -> Json<&'static [ConverterDescriptor]> {
    Json(all_converter_descriptors())
}

pub async fn calculate(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Json<CalculationResponse>, ApiError> {
    let Json(request) = payload.map_err(ApiError::Request)?;
    app_state
        .engine()
        .evaluate(&request)
        .map(Json)
        .map_err(|err| {
            debug!(kind = request.kind(), "calculation rejected: {err}");
            ApiError::from(err)
        })
}

pub async fn table(Path(name): Path<String>) -> Result<Response, ApiError> {
    let table: TableName = name.parse()?;
    let response = match table {
        TableName::Meat => Json(meat_table().profiles()).into_response(),
        TableName::Doneness => Json(doneness_table().rows()).into_response(),
        TableName::AirFryer => Json(air_fryer_food_table().entries()).into_response(),
        TableName::CakePans => Json(cake_pan_table().rows()).into_response(),
    };
    Ok(response)
}
