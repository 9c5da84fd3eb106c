//! Derived dashboard figures.
//!
//! Everything here is plain arithmetic over [`LatestTotals`]. A store with no
//! orders yields `None` for every ratio so callers can render "N/A" instead
//! of dividing by zero.

use serde::{Deserialize, Serialize};

use crate::query::LatestTotals;

pub const DEFAULT_COMPLETION_RATE: f64 = 82.6;
pub const DEFAULT_DEFECT_TARGET: f64 = 5.0;
pub const DASHBOARD_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSettings {
    /// Percentage of orders assumed finished.
    pub completion_rate: f64,
    /// Defect rate (percent) the line is expected to stay under.
    pub defect_target: f64,
    pub version: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            completion_rate: DEFAULT_COMPLETION_RATE,
            defect_target: DEFAULT_DEFECT_TARGET,
            version: DASHBOARD_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Alarm,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn color(self) -> &'static str {
        match self {
            Self::Alarm => "red",
            Self::Warning => "orange",
            Self::Info => "green",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub color: String,
}

impl Notification {
    fn new(message: &str, kind: NotificationKind) -> Self {
        Self {
            message: message.to_string(),
            kind,
            color: kind.color().to_string(),
        }
    }
}

/// Fixed notification feed for a dashboard version. Version 1 (`1.x` or
/// `v1`) carries the line alerts; any later version only announces the
/// upgrade.
pub fn notifications(version: &str) -> Vec<Notification> {
    if major_version(version) == Some(1) {
        vec![
            Notification::new("Production Line 2 is offline.", NotificationKind::Alarm),
            Notification::new("A new order has been submitted.", NotificationKind::Warning),
            Notification::new("A new order has been submitted.", NotificationKind::Warning),
            Notification::new("Order #1108 is ready for shipping.", NotificationKind::Info),
        ]
    } else {
        vec![Notification::new(
            "Dashboard version is upgraded successfully.",
            NotificationKind::Info,
        )]
    }
}

fn major_version(version: &str) -> Option<u32> {
    let version = version.trim();
    let version = version.strip_prefix(['v', 'V']).unwrap_or(version);
    version.split('.').next()?.parse().ok()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub total_orders: i64,
    pub total_defects: i64,
    pub defect_rate: Option<f64>,
    pub defect_to_target: Option<f64>,
    pub finished_orders: Option<i64>,
    pub queue_orders: Option<i64>,
    pub completion_rate: f64,
    pub notifications: Vec<Notification>,
    pub alarm_count: usize,
    pub version: String,
}

impl DashboardSummary {
    pub fn compute(totals: LatestTotals, settings: &DashboardSettings) -> Self {
        let defect_rate = defect_rate(totals.defects, totals.orders);
        let finished_orders = finished_orders(totals.orders, settings.completion_rate);
        let notifications = notifications(&settings.version);
        let alarm_count = notifications
            .iter()
            .filter(|n| n.kind == NotificationKind::Alarm)
            .count();

        Self {
            total_orders: totals.orders,
            total_defects: totals.defects,
            defect_rate,
            defect_to_target: defect_rate.map(|rate| round2(rate - settings.defect_target)),
            finished_orders,
            queue_orders: finished_orders.map(|done| totals.orders - done),
            completion_rate: settings.completion_rate,
            notifications,
            alarm_count,
            version: settings.version.clone(),
        }
    }
}

/// `defects / orders * 100`, two decimals. `None` when there are no orders.
pub fn defect_rate(defects: i64, orders: i64) -> Option<f64> {
    if orders == 0 {
        return None;
    }
    Some(round2(defects as f64 / orders as f64 * 100.0))
}

/// Estimated finished orders, rounded half to even.
pub fn finished_orders(orders: i64, completion_rate: f64) -> Option<i64> {
    if orders == 0 {
        return None;
    }
    Some((orders as f64 * completion_rate / 100.0).round_ties_even() as i64)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
