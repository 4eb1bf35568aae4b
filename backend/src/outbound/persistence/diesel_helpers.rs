//! Shared helpers for the Diesel repositories.

use diesel::define_sql_function;
use diesel::sql_types::{Nullable, Text};
use tracing::debug;

use crate::domain::ports::StoreError;

use super::pool::PoolError;

define_sql_function! {
    /// PostgreSQL `lower(text)`.
    fn lower(value: Text) -> Text;
}

define_sql_function! {
    /// PostgreSQL `lower(text)` over a nullable column.
    #[sql_name = "lower"]
    fn lower_nullable(value: Nullable<Text>) -> Nullable<Text>;
}

/// Map pool errors to store connection errors.
pub fn map_pool_error(error: PoolError) -> StoreError {
    StoreError::from(error)
}

/// Map Diesel errors to store errors.
///
/// Unique violations become [`StoreError::Duplicate`] carrying the violated
/// constraint name so services can re-read the conflicting row.
pub fn map_diesel_error(error: diesel::result::Error) -> StoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => StoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => StoreError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreError::duplicate(info.constraint_name().unwrap_or("unique constraint").to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            StoreError::query(format!(
                "foreign key violation on {}",
                info.constraint_name().unwrap_or("unknown constraint")
            ))
        }
        DieselError::DatabaseError(_, _) => StoreError::query("database error"),
        _ => StoreError::query("database error"),
    }
}

/// Saturating conversion of a row count into the `i64` counters the forum
/// tables use.
pub fn row_count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}
