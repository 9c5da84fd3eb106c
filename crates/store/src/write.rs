use duckdb::params;
use prodline_core::error::{ProdlineError, Result};
use prodline_core::model::Reading;

use crate::Store;

impl Store {
    /// Appends one row. A reading whose `time` is already stored is rejected
    /// with [`ProdlineError::Conflict`] and the existing row is left as is.
    pub fn insert_reading(&self, reading: &Reading) -> Result<()> {
        let conn = self.conn();
        let table = self.table();

        let existing = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {table} WHERE time = ?"),
                params![reading.time],
                |row| row.get::<_, i64>(0),
            )
            .map_err(|e| ProdlineError::Store(format!("duplicate check failed: {e}")))?;
        if existing > 0 {
            return Err(ProdlineError::Conflict(format!(
                "duplicate timestamp: {}",
                reading.time
            )));
        }

        conn.execute(
            &format!(
                "INSERT INTO {table}
                 (time, typeA_orders, typeB_orders, typeC_orders, typeA_defects, typeB_defects, typeC_defects)
                 VALUES (?, ?, ?, ?, ?, ?, ?)"
            ),
            params![
                reading.time,
                reading.orders.type_a,
                reading.orders.type_b,
                reading.orders.type_c,
                reading.defects.type_a,
                reading.defects.type_b,
                reading.defects.type_c,
            ],
        )
        .map_err(|e| ProdlineError::Store(format!("insert reading failed: {e}")))?;

        tracing::debug!(time = %reading.time, orders = reading.orders.total(), "reading stored");
        Ok(())
    }
}
