use serde::{Deserialize, Serialize};

use crate::model::counts::TypeCounts;

/// One observation of cumulative order and defect counters.
///
/// This is both the `/submitData` request body and the shape of a stored
/// `order_data` row. `time` is the primary key and is kept verbatim, it is
/// never reparsed or normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reading {
    pub orders: TypeCounts,
    pub defects: TypeCounts,
    pub time: String,
}

pub type MetricRow = Reading;

impl Reading {
    /// Defect counters are assumed to never exceed order counters. Nothing
    /// enforces this, it only holds for simulator-produced readings.
    pub fn defects_within_orders(&self) -> bool {
        self.defects
            .iter()
            .all(|(ty, defects)| defects <= self.orders.get(ty))
    }
}
