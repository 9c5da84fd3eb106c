pub mod counts;
pub mod reading;

pub use counts::{OrderType, TypeCounts};
pub use reading::{MetricRow, Reading};
