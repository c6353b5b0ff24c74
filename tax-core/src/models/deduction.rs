use serde::{Deserialize, Serialize};

/// Which configurable deduction an admin update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeductionKind {
    Personal,
    KReceipt,
}

impl DeductionKind {
    /// Path segment used by the admin endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::KReceipt => "k-receipt",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "personal" => Some(Self::Personal),
            "k-receipt" => Some(Self::KReceipt),
            _ => None,
        }
    }

    /// JSON key used when echoing an updated value back to the caller.
    pub fn response_key(&self) -> &'static str {
        match self {
            Self::Personal => "personalDeduction",
            Self::KReceipt => "kReceipt",
        }
    }
}

/// Current deduction parameters: the personal deduction and the cap applied
/// to each k-receipt allowance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeductionConfig {
    #[serde(rename = "personalDeduction")]
    pub personal: f64,
    #[serde(rename = "kReceipt")]
    pub k_receipt: f64,
}

impl DeductionConfig {
    pub fn get(&self, kind: DeductionKind) -> f64 {
        match kind {
            DeductionKind::Personal => self.personal,
            DeductionKind::KReceipt => self.k_receipt,
        }
    }
}

impl Default for DeductionConfig {
    fn default() -> Self {
        Self {
            personal: 60_000.0,
            k_receipt: 50_000.0,
        }
    }
}
