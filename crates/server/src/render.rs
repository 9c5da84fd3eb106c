//! Server-side HTML for the dashboard page.
//!
//! Charts are left to whatever consumes `/api/*`; the page itself only
//! carries numbers and tables and reloads on the refresh interval.

use std::fmt::Write;
use std::time::Duration;

use prodline_core::dashboard::DashboardSummary;
use prodline_core::model::TypeCounts;
use prodline_core::query::OrdersSeries;

const NOT_AVAILABLE: &str = "N/A";

pub fn render_dashboard(
    summary: &DashboardSummary,
    by_type: &TypeCounts,
    series: Option<&OrdersSeries>,
    refresh_interval: Duration,
) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"{}\">\n\
         <title>Production line dashboard</title>\n</head>\n<body>\n",
        refresh_interval.as_secs().max(1)
    );
    let _ = writeln!(out, "<h1>Production line dashboard v{}</h1>", escape(&summary.version));

    out.push_str("<section id=\"summary\">\n<dl>\n");
    push_metric(&mut out, "Total orders", &summary.total_orders.to_string());
    push_metric(&mut out, "Defect rate", &percent(summary.defect_rate));
    push_metric(&mut out, "Defect vs target", &percent(summary.defect_to_target));
    push_metric(&mut out, "Finished orders", &optional(summary.finished_orders));
    push_metric(&mut out, "Queued orders", &optional(summary.queue_orders));
    push_metric(&mut out, "Complete rate", &format!("{}%", summary.completion_rate));
    out.push_str("</dl>\n</section>\n");

    let _ = writeln!(
        out,
        "<section id=\"notifications\">\n<h2>Notifications ({} alarms)</h2>\n<ul>",
        summary.alarm_count
    );
    for n in &summary.notifications {
        let _ = writeln!(
            out,
            "<li style=\"color: {}\">{}</li>",
            escape(&n.color),
            escape(&n.message)
        );
    }
    out.push_str("</ul>\n</section>\n");

    out.push_str("<section id=\"products\">\n<h2>Orders by type</h2>\n<table>\n");
    for (ty, count) in by_type.iter() {
        let _ = writeln!(out, "<tr><th>{}</th><td>{count}</td></tr>", ty.display_label());
    }
    out.push_str("</table>\n</section>\n");

    out.push_str("<section id=\"orders\">\n<h2>Orders count</h2>\n");
    match series {
        Some(series) => {
            out.push_str("<table>\n<tr><th>time</th><th>orders</th></tr>\n");
            for (time, total) in series.times.iter().zip(&series.totals) {
                let _ = writeln!(out, "<tr><td>{}</td><td>{total}</td></tr>", escape(time));
            }
            out.push_str("</table>\n");
        }
        None => out.push_str("<p>No readings yet.</p>\n"),
    }
    out.push_str("</section>\n</body>\n</html>\n");
    out
}

pub fn render_not_found() -> String {
    "<!DOCTYPE html>\n<html>\n<head><title>Not found</title></head>\n\
     <body>\n<h1>404</h1>\n<p>The page you requested does not exist.</p>\n\
     <p><a href=\"/\">Back to dashboard</a></p>\n</body>\n</html>\n"
        .to_string()
}

fn push_metric(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "<dt>{label}</dt><dd>{}</dd>", escape(value));
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.2}%"))
}

fn optional(value: Option<i64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
