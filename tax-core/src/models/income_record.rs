use serde::{Deserialize, Serialize};

use super::Allowance;

/// Validated input to the bracket engine.
///
/// Built per request from a [`super::TaxRequest`] (or a batch row) and
/// discarded once the result is computed. Allowances keep their input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub total_income: f64,
    pub wht: f64,
    pub allowances: Vec<Allowance>,
}
