use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tax_core::calculations::{
    compute_batch, compute_tax, parse_deduction_kind, validate_deduction, validate_tax_request,
};
use tax_core::{BatchReport, DeductionConfig, TaxRequest, TaxResult};
use tax_data::BatchCsvLoader;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field carrying the batch CSV.
pub const TAX_FILE_FIELD: &str = "taxFile";

pub const GREETING: &str = "Hello, Tax API!";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeductionUpdate {
    pub amount: f64,
}

fn invalid_body(rejection: impl std::fmt::Display) -> ApiError {
    debug!(error = %rejection, "rejected request body");
    ApiError::InvalidBody
}

pub async fn root() -> &'static str {
    GREETING
}

/// POST /tax/calculations
pub async fn calculate_tax(
    State(state): State<AppState>,
    body: Result<Json<TaxRequest>, JsonRejection>,
) -> Result<Json<TaxResult>, ApiError> {
    let Json(request) = body.map_err(invalid_body)?;
    let record = validate_tax_request(request)
        .inspect_err(|e| debug!(error = %e, "rejected tax request"))?;

    let deductions = state.repo.current_deductions().await?;
    let result = compute_tax(&record, &deductions);

    info!(
        total_income = record.total_income,
        allowances = record.allowances.len(),
        tax = result.tax,
        tax_refund = result.tax_refund,
        "tax calculated"
    );
    Ok(Json(result))
}

/// POST /tax/calculations/upload-csv
pub async fn upload_csv(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<BatchReport>, ApiError> {
    let mut multipart = multipart.map_err(invalid_body)?;

    let mut contents = None;
    while let Some(field) = multipart.next_field().await.map_err(invalid_body)? {
        if field.name() == Some(TAX_FILE_FIELD) {
            contents = Some(field.bytes().await.map_err(invalid_body)?);
            break;
        }
    }
    let contents = contents.ok_or(ApiError::MissingTaxFile)?;

    let records = BatchCsvLoader::parse(&contents[..])
        .inspect_err(|e| debug!(error = %e, "rejected batch file"))?;

    let deductions = state.repo.current_deductions().await?;
    let report = compute_batch(&records, &deductions);

    info!(rows = report.taxes.len(), "batch calculated");
    Ok(Json(report))
}

/// POST /admin/deductions/:kind
pub async fn change_deduction(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Result<Json<DeductionUpdate>, JsonRejection>,
) -> Result<Json<Map<String, Value>>, ApiError> {
    let kind = parse_deduction_kind(&kind)
        .inspect_err(|e| debug!(error = %e, kind = %kind, "rejected deduction update"))?;
    let Json(update) = body.map_err(invalid_body)?;
    validate_deduction(kind, update.amount)
        .inspect_err(|e| debug!(error = %e, amount = update.amount, "rejected deduction update"))?;

    let updated = state.repo.set_deduction(kind, update.amount).await?;
    let value = updated.get(kind);

    info!(kind = kind.as_str(), amount = value, "deduction updated");

    let mut response = Map::new();
    response.insert(kind.response_key().to_string(), Value::from(value));
    Ok(Json(response))
}

/// GET /admin/deductions
pub async fn current_deductions(
    State(state): State<AppState>
) -> Result<Json<DeductionConfig>, ApiError> {
    let deductions = state.repo.current_deductions().await?;
    Ok(Json(deductions))
}
