//! Input checks that run before the engine or the deduction store is touched.
//!
//! The engine itself accepts any number; everything that can be rejected is
//! rejected here, with the message a client will see.

use thiserror::Error;

use crate::models::{
    Allowance, AllowanceType, BatchRecord, DeductionKind, IncomeRecord, TaxRequest,
};

/// Lower bound (exclusive) for the personal deduction.
pub const MIN_PERSONAL_DEDUCTION: f64 = 10_000.0;

/// Upper bound (inclusive) for either configurable deduction.
pub const MAX_DEDUCTION_SETTING: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("total income must be more than 0")]
    NegativeIncome,

    #[error("wht must be more than 0")]
    NegativeWht,

    #[error("allowance amount must be more than 0")]
    NegativeAllowance,

    #[error("donation must be more than 0")]
    NegativeDonation,

    #[error("Invalid allowance type")]
    UnknownAllowanceType(String),

    #[error("Invalid deduction type")]
    UnknownDeductionType(String),

    #[error("Amount must be more than 10,000")]
    PersonalTooLow,

    #[error("Amount must be more than 0")]
    KReceiptTooLow,

    #[error("Amount must not exceed 100,000")]
    DeductionTooHigh,
}

/// Turns a wire request into an engine input.
///
/// Checks run in field order and stop at the first failure: income, then
/// withholding, then each allowance (type before amount).
pub fn validate_tax_request(request: TaxRequest) -> Result<IncomeRecord, ValidationError> {
    if request.total_income < 0.0 {
        return Err(ValidationError::NegativeIncome);
    }
    if request.wht < 0.0 {
        return Err(ValidationError::NegativeWht);
    }

    let allowances = request
        .allowances
        .into_iter()
        .map(|a| {
            let allowance_type = AllowanceType::parse(&a.allowance_type)
                .ok_or(ValidationError::UnknownAllowanceType(a.allowance_type))?;
            if a.amount < 0.0 {
                return Err(ValidationError::NegativeAllowance);
            }
            Ok(Allowance {
                allowance_type,
                amount: a.amount,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IncomeRecord {
        total_income: request.total_income,
        wht: request.wht,
        allowances,
    })
}

/// Resolves the `{type}` path segment of an admin update.
pub fn parse_deduction_kind(raw: &str) -> Result<DeductionKind, ValidationError> {
    DeductionKind::parse(raw).ok_or_else(|| ValidationError::UnknownDeductionType(raw.to_string()))
}

/// Bounds for an admin update: personal must be in `(10_000, 100_000]`,
/// k-receipt in `(0, 100_000]`.
pub fn validate_deduction(
    kind: DeductionKind,
    amount: f64,
) -> Result<(), ValidationError> {
    match kind {
        DeductionKind::Personal if amount <= MIN_PERSONAL_DEDUCTION => {
            Err(ValidationError::PersonalTooLow)
        }
        DeductionKind::KReceipt if amount <= 0.0 => Err(ValidationError::KReceiptTooLow),
        _ if amount > MAX_DEDUCTION_SETTING => Err(ValidationError::DeductionTooHigh),
        _ => Ok(()),
    }
}

pub fn validate_batch_record(record: &BatchRecord) -> Result<(), ValidationError> {
    if record.total_income < 0.0 {
        return Err(ValidationError::NegativeIncome);
    }
    if record.wht < 0.0 {
        return Err(ValidationError::NegativeWht);
    }
    if record.donation < 0.0 {
        return Err(ValidationError::NegativeDonation);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::AllowanceRequest;

    fn request(
        total_income: f64,
        wht: f64,
        allowances: Vec<(&str, f64)>,
    ) -> TaxRequest {
        TaxRequest {
            total_income,
            wht,
            allowances: allowances
                .into_iter()
                .map(|(t, amount)| AllowanceRequest {
                    allowance_type: t.to_string(),
                    amount,
                })
                .collect(),
        }
    }

    // =========================================================================
    // validate_tax_request tests
    // =========================================================================

    #[test]
    fn valid_request_keeps_allowance_order() {
        let record = validate_tax_request(request(
            500_000.0,
            1_000.0,
            vec![("k-receipt", 10.0), ("donation", 20.0), ("k-receipt", 30.0)],
        ))
        .unwrap();

        assert_eq!(record.total_income, 500_000.0);
        assert_eq!(record.wht, 1_000.0);
        assert_eq!(
            record.allowances,
            vec![
                Allowance::k_receipt(10.0),
                Allowance::donation(20.0),
                Allowance::k_receipt(30.0),
            ]
        );
    }

    #[test]
    fn zero_values_are_accepted() {
        let record = validate_tax_request(request(0.0, 0.0, vec![("donation", 0.0)])).unwrap();

        assert_eq!(record.allowances, vec![Allowance::donation(0.0)]);
    }

    #[test]
    fn negative_income_is_rejected() {
        assert_eq!(
            validate_tax_request(request(-1.0, 0.0, vec![])),
            Err(ValidationError::NegativeIncome)
        );
    }

    #[test]
    fn negative_wht_is_rejected() {
        assert_eq!(
            validate_tax_request(request(100.0, -1.0, vec![])),
            Err(ValidationError::NegativeWht)
        );
    }

    #[test]
    fn income_is_checked_before_wht() {
        assert_eq!(
            validate_tax_request(request(-1.0, -1.0, vec![])),
            Err(ValidationError::NegativeIncome)
        );
    }

    #[test]
    fn unknown_allowance_type_is_rejected() {
        let err = validate_tax_request(request(100.0, 0.0, vec![("lottery", 5.0)])).unwrap_err();

        assert_eq!(err, ValidationError::UnknownAllowanceType("lottery".to_string()));
        assert_eq!(err.to_string(), "Invalid allowance type");
    }

    #[test]
    fn negative_allowance_is_rejected() {
        let err = validate_tax_request(request(100.0, 0.0, vec![("donation", -5.0)])).unwrap_err();

        assert_eq!(err.to_string(), "allowance amount must be more than 0");
    }

    // =========================================================================
    // parse_deduction_kind tests
    // =========================================================================

    #[test]
    fn deduction_kind_parses_path_segments() {
        assert_eq!(parse_deduction_kind("personal"), Ok(DeductionKind::Personal));
        assert_eq!(parse_deduction_kind("k-receipt"), Ok(DeductionKind::KReceipt));
    }

    #[test]
    fn unknown_deduction_kind_is_rejected() {
        let err = parse_deduction_kind("donation").unwrap_err();

        assert_eq!(err.to_string(), "Invalid deduction type");
    }

    // =========================================================================
    // validate_deduction tests
    // =========================================================================

    #[test]
    fn personal_bounds() {
        assert_eq!(
            validate_deduction(DeductionKind::Personal, 10_000.0),
            Err(ValidationError::PersonalTooLow)
        );
        assert_eq!(validate_deduction(DeductionKind::Personal, 10_000.01), Ok(()));
        assert_eq!(validate_deduction(DeductionKind::Personal, 100_000.0), Ok(()));
        assert_eq!(
            validate_deduction(DeductionKind::Personal, 100_000.01),
            Err(ValidationError::DeductionTooHigh)
        );
    }

    #[test]
    fn k_receipt_bounds() {
        assert_eq!(
            validate_deduction(DeductionKind::KReceipt, 0.0),
            Err(ValidationError::KReceiptTooLow)
        );
        assert_eq!(validate_deduction(DeductionKind::KReceipt, 0.5), Ok(()));
        assert_eq!(validate_deduction(DeductionKind::KReceipt, 100_000.0), Ok(()));
        assert_eq!(
            validate_deduction(DeductionKind::KReceipt, 200_000.0),
            Err(ValidationError::DeductionTooHigh)
        );
    }

    #[test]
    fn deduction_messages_match_client_contract() {
        assert_eq!(
            ValidationError::PersonalTooLow.to_string(),
            "Amount must be more than 10,000"
        );
        assert_eq!(ValidationError::KReceiptTooLow.to_string(), "Amount must be more than 0");
        assert_eq!(
            ValidationError::DeductionTooHigh.to_string(),
            "Amount must not exceed 100,000"
        );
    }

    // =========================================================================
    // validate_batch_record tests
    // =========================================================================

    #[test]
    fn batch_record_accepts_non_negative_values() {
        let record = BatchRecord {
            total_income: 500_000.0,
            wht: 0.0,
            donation: 0.0,
        };

        assert_eq!(validate_batch_record(&record), Ok(()));
    }

    #[test]
    fn batch_record_rejects_negative_donation() {
        let record = BatchRecord {
            total_income: 500_000.0,
            wht: 0.0,
            donation: -1.0,
        };

        assert_eq!(
            validate_batch_record(&record),
            Err(ValidationError::NegativeDonation)
        );
    }
}
