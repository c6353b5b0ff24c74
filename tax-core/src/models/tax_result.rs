use serde::{Deserialize, Serialize};

/// Tax owed for a single bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxLevel {
    pub level: String,
    pub tax: f64,
}

/// Outcome of one calculation.
///
/// At most one of `tax` and `tax_refund` is non-zero. `tax_level` always has
/// one entry per bracket, in schedule order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    pub tax: f64,
    pub tax_refund: f64,
    pub tax_level: Vec<TaxLevel>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn serializes_with_wire_keys() {
        let result = TaxResult {
            tax: 4_000.0,
            tax_refund: 0.0,
            tax_level: vec![TaxLevel {
                level: "0 - 150,000".to_string(),
                tax: 0.0,
            }],
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({
                "tax": 4000.0,
                "taxRefund": 0.0,
                "taxLevel": [{ "level": "0 - 150,000", "tax": 0.0 }]
            })
        );
    }
}
