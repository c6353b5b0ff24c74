use sqlx::{Row, TypeInfo, ValueRef};
use tax_core::RepositoryError;

/// Reads a number from a row whether SQLite stored it as INTEGER or REAL.
///
/// NULL is an error: every numeric column this crate reads is `NOT NULL`.
pub fn get_f64(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<f64, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    // SQLite reports the declared column type for NULL cells too.
    if value_ref.is_null() {
        return Err(RepositoryError::Database(format!(
            "Unexpected NULL in column '{}'",
            column
        )));
    }

    let type_info = value_ref.type_info();
    let type_name = type_info.name();

    match type_name {
        "INTEGER" => {
            let val: i64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to get INTEGER from '{}': {}",
                    column, e
                ))
            })?;
            Ok(val as f64)
        }
        "REAL" => row.try_get(column).map_err(|e| {
            RepositoryError::Database(format!("Failed to get REAL from '{}': {}", column, e))
        }),
        _ => Err(RepositoryError::Database(format!(
            "Unexpected type '{}' for column '{}'",
            type_name, column
        ))),
    }
}
