use tracing::debug;

use super::bracket_engine::BracketEngine;
use crate::models::{Allowance, BatchEntry, BatchRecord, BatchReport, DeductionConfig, IncomeRecord};

/// Runs every row through the engine with one shared deduction snapshot.
///
/// Each row carries a single donation allowance. Output order matches input
/// order, and an empty input yields an empty report.
pub fn compute_batch(
    records: &[BatchRecord],
    deductions: &DeductionConfig,
) -> BatchReport {
    let engine = BracketEngine::default();

    let taxes = records
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let record = IncomeRecord {
                total_income: row.total_income,
                wht: row.wht,
                allowances: vec![Allowance::donation(row.donation)],
            };
            let result = engine.calculate(&record, deductions.personal, deductions.k_receipt);

            debug!(
                row = index + 1,
                total_income = row.total_income,
                tax = result.tax,
                tax_refund = result.tax_refund,
                "batch row computed"
            );

            BatchEntry {
                total_income: row.total_income,
                tax: result.tax,
                tax_refund: result.tax_refund,
            }
        })
        .collect();

    BatchReport { taxes }
}
