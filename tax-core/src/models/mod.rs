mod allowance;
mod batch;
mod deduction;
mod income_record;
mod tax_bracket;
mod tax_request;
mod tax_result;

pub use allowance::{Allowance, AllowanceType};
pub use batch::{BatchEntry, BatchRecord, BatchReport};
pub use deduction::{DeductionConfig, DeductionKind};
pub use income_record::IncomeRecord;
pub use tax_bracket::{TAX_BRACKETS, TaxBracket};
pub use tax_request::{AllowanceRequest, TaxRequest};
pub use tax_result::{TaxLevel, TaxResult};
