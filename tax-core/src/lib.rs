pub mod calculations;
pub mod db;
pub mod models;

pub use db::repository::{DeductionRepository, RepositoryError};
pub use models::*;
