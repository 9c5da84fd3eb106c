use serde::{Deserialize, Serialize};

/// Total orders per stored row, in arrival order. Feeds the line chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OrdersSeries {
    pub times: Vec<String>,
    pub totals: Vec<i64>,
}

impl OrdersSeries {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn push(&mut self, time: String, total: i64) {
        self.times.push(time);
        self.totals.push(total);
    }
}

/// Summed counters of the most recent row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LatestTotals {
    pub defects: i64,
    pub orders: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreStatus {
    pub db_path: String,
    pub db_size_bytes: u64,
    pub rows: usize,
    pub newest_time: Option<String>,
}
