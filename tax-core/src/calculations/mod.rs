//! Tax computation for a single filer.
//!
//! [`bracket_engine`] holds the progressive bracket walk, [`batch`] applies it
//! row by row, and [`validation`] guards every input that reaches either.

pub mod batch;
pub mod bracket_engine;
pub mod validation;

pub use batch::compute_batch;
pub use bracket_engine::{BracketEngine, MAX_DONATION_DEDUCTION, compute_tax};
pub use validation::{
    ValidationError, parse_deduction_kind, validate_batch_record, validate_deduction,
    validate_tax_request,
};
