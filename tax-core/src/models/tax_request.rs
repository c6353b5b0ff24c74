use serde::{Deserialize, Serialize};

/// Request body for a single tax calculation, exactly as it arrives on the wire.
///
/// The allowance type is kept as a raw string so an unknown tag surfaces as a
/// validation error rather than a malformed body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRequest {
    pub total_income: f64,
    #[serde(default)]
    pub wht: f64,
    #[serde(default)]
    pub allowances: Vec<AllowanceRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceRequest {
    pub allowance_type: String,
    pub amount: f64,
}
