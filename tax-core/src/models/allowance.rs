use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllowanceType {
    #[serde(rename = "donation")]
    Donation,
    #[serde(rename = "k-receipt")]
    KReceipt,
}

impl AllowanceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Donation => "donation",
            Self::KReceipt => "k-receipt",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "donation" => Some(Self::Donation),
            "k-receipt" => Some(Self::KReceipt),
            _ => None,
        }
    }
}

/// A single itemized reduction to taxable income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allowance {
    pub allowance_type: AllowanceType,
    pub amount: f64,
}

impl Allowance {
    pub fn donation(amount: f64) -> Self {
        Self {
            allowance_type: AllowanceType::Donation,
            amount,
        }
    }

    pub fn k_receipt(amount: f64) -> Self {
        Self {
            allowance_type: AllowanceType::KReceipt,
            amount,
        }
    }
}
