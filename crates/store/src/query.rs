use prodline_core::error::{ProdlineError, Result};
use prodline_core::model::{Reading, TypeCounts};
use prodline_core::query::{LatestTotals, OrdersSeries};

use crate::Store;
use crate::db::first_row;

impl Store {
    /// Total orders per row in arrival order, `None` for an empty table.
    pub fn orders_series(&self) -> Result<Option<OrdersSeries>> {
        let conn = self.conn();
        let table = self.table();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT time, typeA_orders, typeB_orders, typeC_orders
                 FROM {table}
                 ORDER BY rowid ASC"
            ))
            .map_err(|e| ProdlineError::Store(format!("prepare orders series failed: {e}")))?;

        let rows = stmt
            .query_map([], |row| {
                let time = row.get::<_, String>(0)?;
                let orders = TypeCounts::new(
                    row.get::<_, i32>(1)?,
                    row.get::<_, i32>(2)?,
                    row.get::<_, i32>(3)?,
                );
                Ok((time, orders.total()))
            })
            .map_err(|e| ProdlineError::Store(format!("query orders series failed: {e}")))?;

        let mut series = OrdersSeries::default();
        for row in rows {
            let (time, total) = row
                .map_err(|e| ProdlineError::Store(format!("map orders series row failed: {e}")))?;
            series.push(time, total);
        }

        Ok((!series.is_empty()).then_some(series))
    }

    /// The row with the greatest `time`, compared as text.
    pub fn latest_reading(&self) -> Result<Option<Reading>> {
        let conn = self.conn();
        let table = self.table();
        first_row(
            &conn,
            &format!(
                "SELECT time, typeA_orders, typeB_orders, typeC_orders,
                        typeA_defects, typeB_defects, typeC_defects
                 FROM {table}
                 ORDER BY time DESC
                 LIMIT 1"
            ),
            |row| {
                Ok(Reading {
                    time: row.get::<_, String>(0)?,
                    orders: TypeCounts::new(
                        row.get::<_, i32>(1)?,
                        row.get::<_, i32>(2)?,
                        row.get::<_, i32>(3)?,
                    ),
                    defects: TypeCounts::new(
                        row.get::<_, i32>(4)?,
                        row.get::<_, i32>(5)?,
                        row.get::<_, i32>(6)?,
                    ),
                })
            },
        )
    }

    pub fn latest_orders_by_type(&self) -> Result<TypeCounts> {
        Ok(self
            .latest_reading()?
            .map(|r| r.orders)
            .unwrap_or_default())
    }

    pub fn latest_totals(&self) -> Result<LatestTotals> {
        Ok(self
            .latest_reading()?
            .map(|r| LatestTotals {
                defects: r.defects.total(),
                orders: r.orders.total(),
            })
            .unwrap_or_default())
    }
}
