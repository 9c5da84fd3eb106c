use chrono::{Duration, TimeZone, Utc};
use prodline_core::model::{Reading, TypeCounts};
use prodline_core::time::format_reading_time;

pub fn reading(time: &str, orders: [i32; 3], defects: [i32; 3]) -> Reading {
    Reading {
        orders: TypeCounts::new(orders[0], orders[1], orders[2]),
        defects: TypeCounts::new(defects[0], defects[1], defects[2]),
        time: time.to_string(),
    }
}

/// A plausible simulator run: `count` readings 15 seconds apart with
/// cumulative counters.
pub fn sample_run(count: usize) -> Vec<Reading> {
    let base = Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap();
    let increments = [[7, 5, 9], [10, 6, 8], [5, 5, 5], [9, 10, 6]];
    let defect_steps = [[0, 0, 1], [0, 0, 0], [1, 0, 0], [0, 0, 0]];

    let mut orders = [0i32; 3];
    let mut defects = [0i32; 3];
    (0..count)
        .map(|i| {
            let inc = increments[i % increments.len()];
            let dfx = defect_steps[i % defect_steps.len()];
            for t in 0..3 {
                orders[t] += inc[t];
                defects[t] += dfx[t];
            }
            let ts = base + Duration::seconds(15 * i as i64);
            reading(&format_reading_time(ts), orders, defects)
        })
        .collect()
}
