/// One range of the progressive schedule.
///
/// `min_income` is exclusive and `max_income` inclusive when deciding which
/// part of the taxable base falls into the bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBracket {
    pub min_income: f64,
    pub max_income: f64,
    pub tax_rate: f64,
    pub level: &'static str,
}

/// The fixed single-filer schedule, in ascending order.
pub static TAX_BRACKETS: [TaxBracket; 5] = [
    TaxBracket {
        min_income: 0.0,
        max_income: 150_000.0,
        tax_rate: 0.0,
        level: "0 - 150,000",
    },
    TaxBracket {
        min_income: 150_000.0,
        max_income: 500_000.0,
        tax_rate: 0.10,
        level: "150,001 - 500,000",
    },
    TaxBracket {
        min_income: 500_000.0,
        max_income: 1_000_000.0,
        tax_rate: 0.15,
        level: "500,001 - 1,000,000",
    },
    TaxBracket {
        min_income: 1_000_000.0,
        max_income: 2_000_000.0,
        tax_rate: 0.20,
        level: "1,000,001 - 2,000,000",
    },
    TaxBracket {
        min_income: 2_000_000.0,
        max_income: f64::INFINITY,
        tax_rate: 0.30,
        level: "2,000,001 ขึ้นไป",
    },
];
