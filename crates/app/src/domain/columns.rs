//! Column conversions shared by the repositories.

use sqlx::{Row, postgres::PgRow};

/// Read a non-negative `INTEGER` column (stock, quantity) as `u32`.
pub(crate) fn try_get_count(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let count: i32 = row.try_get(col)?;

    u32::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Convert a count into the `INTEGER` representation used for binding.
pub(crate) fn count_to_i32(count: u32, col: &str) -> Result<i32, sqlx::Error> {
    i32::try_from(count).map_err(|e| {
        sqlx::Error::Encode(format!("cannot bind {count} as `{col}`: {e}").into())
    })
}
