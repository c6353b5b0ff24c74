use serde::{Deserialize, Serialize};

/// One row of batch input. Batch rows only carry a donation allowance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRecord {
    pub total_income: f64,
    pub wht: f64,
    pub donation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub total_income: f64,
    pub tax: f64,
    pub tax_refund: f64,
}

/// Per-row outcomes, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub taxes: Vec<BatchEntry>,
}
