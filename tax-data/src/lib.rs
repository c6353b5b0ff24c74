mod loader;

pub use loader::{BATCH_CSV_HEADER, BatchCsvError, BatchCsvLoader};
