use owo_colors::OwoColorize;
use prodline_core::dashboard::{DashboardSummary, NotificationKind};
use prodline_core::query::StoreStatus;

pub fn print_summary_human(v: &DashboardSummary) {
    let rate = match (v.defect_rate, v.defect_to_target) {
        (Some(rate), Some(delta)) if delta > 0.0 => format!("{rate:.2}%").red().to_string(),
        (Some(rate), _) => format!("{rate:.2}%").green().to_string(),
        (None, _) => "N/A".to_string(),
    };
    let delta = v
        .defect_to_target
        .map(|d| format!("{d:+.2}"))
        .unwrap_or_else(|| "N/A".to_string());

    println!("DASHBOARD v{}", v.version);
    println!(
        "orders={} defects={} defect_rate={} vs_target={}",
        v.total_orders, v.total_defects, rate, delta
    );
    println!(
        "finished={} queued={} complete_rate={}%",
        display_opt(v.finished_orders),
        display_opt(v.queue_orders),
        v.completion_rate
    );
    println!("-- notifications ({} alarms) --", v.alarm_count);
    for n in &v.notifications {
        let label = match n.kind {
            NotificationKind::Alarm => "ALARM".red().to_string(),
            NotificationKind::Warning => "WARN".yellow().to_string(),
            NotificationKind::Info => "INFO".green().to_string(),
        };
        println!("{label} {}", n.message);
    }
}

pub fn print_status_human(v: &StoreStatus) {
    println!("db_path={}", v.db_path);
    println!("db_size_bytes={}", v.db_size_bytes);
    println!("rows={}", v.rows);
    println!(
        "newest={}",
        v.newest_time.clone().unwrap_or_else(|| "-".to_string())
    );
}

fn display_opt(value: Option<i64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
