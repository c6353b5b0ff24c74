//! Progressive bracket engine for single-filer personal income tax.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Taxable base = total income - personal deduction (no floor) |
//! | 2    | Subtract each allowance in input order: donations capped at 100,000, k-receipts capped at the configured maximum |
//! | 3    | Walk the brackets in ascending order; each records the tax owed on the slice of the base it covers |
//! | 4    | Sum the bracket taxes |
//! | 5    | Net the total against withholding: the remainder is either tax payable or a refund |
//!
//! All arithmetic is plain `f64` and nothing is rounded. A base that ends up
//! negative is not clamped; it sits below every bracket and yields zero tax.
//!
//! # Example
//!
//! ```
//! use tax_core::calculations::BracketEngine;
//! use tax_core::{Allowance, IncomeRecord};
//!
//! let record = IncomeRecord {
//!     total_income: 500_000.0,
//!     wht: 0.0,
//!     allowances: vec![Allowance::donation(200_000.0)],
//! };
//!
//! let result = BracketEngine::default().calculate(&record, 60_000.0, 50_000.0);
//!
//! assert_eq!(result.tax, 19_000.0);
//! assert_eq!(result.tax_refund, 0.0);
//! assert_eq!(result.tax_level.len(), 5);
//! ```

use tracing::trace;

use crate::models::{
    Allowance, AllowanceType, DeductionConfig, IncomeRecord, TAX_BRACKETS, TaxBracket, TaxLevel,
    TaxResult,
};

/// Fixed cap on a single donation allowance. Not configurable.
pub const MAX_DONATION_DEDUCTION: f64 = 100_000.0;

/// Calculator over an ordered bracket schedule.
///
/// The engine holds no state beyond a borrowed schedule, so one instance can
/// be shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct BracketEngine<'a> {
    tax_brackets: &'a [TaxBracket],
}

impl Default for BracketEngine<'static> {
    fn default() -> Self {
        Self::new(&TAX_BRACKETS)
    }
}

impl<'a> BracketEngine<'a> {
    /// Creates an engine over `tax_brackets`, which must be sorted by
    /// `min_income` in ascending order.
    pub fn new(tax_brackets: &'a [TaxBracket]) -> Self {
        Self { tax_brackets }
    }

    /// Computes the tax breakdown for `record`.
    ///
    /// Inputs are not validated; any numeric input produces a result.
    pub fn calculate(
        &self,
        record: &IncomeRecord,
        personal_deduction: f64,
        max_k_receipt_deduction: f64,
    ) -> TaxResult {
        let base = self.taxable_base(record.total_income, personal_deduction);
        let base = self.apply_allowances(base, &record.allowances, max_k_receipt_deduction);

        let mut total_tax = 0.0;
        let mut tax_level = Vec::with_capacity(self.tax_brackets.len());
        for bracket in self.tax_brackets {
            let tax = self.bracket_tax(base, bracket);
            total_tax += tax;
            tax_level.push(TaxLevel {
                level: bracket.level.to_string(),
                tax,
            });
        }

        let (tax, tax_refund) = self.net_against_withholding(total_tax, record.wht);

        trace!(base, total_tax, tax, tax_refund, "bracket walk complete");

        TaxResult {
            tax,
            tax_refund,
            tax_level,
        }
    }

    /// Income minus the personal deduction. May be negative.
    fn taxable_base(
        &self,
        total_income: f64,
        personal_deduction: f64,
    ) -> f64 {
        total_income - personal_deduction
    }

    /// Subtracts every allowance, each capped on its own.
    fn apply_allowances(
        &self,
        base: f64,
        allowances: &[Allowance],
        max_k_receipt_deduction: f64,
    ) -> f64 {
        allowances.iter().fold(base, |base, allowance| {
            base - self.allowance_reduction(allowance, max_k_receipt_deduction)
        })
    }

    fn allowance_reduction(
        &self,
        allowance: &Allowance,
        max_k_receipt_deduction: f64,
    ) -> f64 {
        let cap = match allowance.allowance_type {
            AllowanceType::Donation => MAX_DONATION_DEDUCTION,
            AllowanceType::KReceipt => max_k_receipt_deduction,
        };
        allowance.amount.min(cap)
    }

    /// Tax owed on the slice of `base` that falls inside `bracket`.
    fn bracket_tax(
        &self,
        base: f64,
        bracket: &TaxBracket,
    ) -> f64 {
        if base <= bracket.min_income {
            0.0
        } else if base <= bracket.max_income {
            (base - bracket.min_income) * bracket.tax_rate
        } else {
            (bracket.max_income - bracket.min_income) * bracket.tax_rate
        }
    }

    /// Splits `total_tax - wht` into (payable, refund).
    fn net_against_withholding(
        &self,
        total_tax: f64,
        wht: f64,
    ) -> (f64, f64) {
        if total_tax >= wht {
            (total_tax - wht, 0.0)
        } else {
            (0.0, wht - total_tax)
        }
    }
}

/// Runs the default schedule with the deduction values from `deductions`.
pub fn compute_tax(
    record: &IncomeRecord,
    deductions: &DeductionConfig,
) -> TaxResult {
    BracketEngine::default().calculate(record, deductions.personal, deductions.k_receipt)
}
