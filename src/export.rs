//! File exports: campaign CSV, plain-text summary report, chart-series
//! JSON. All serialization works from typed values; failures surface as
//! `anyhow::Result` so callers can log and keep the loop alive.

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::campaigns::CampaignRow;
use crate::format::{format_currency, format_number};
use crate::series::SeriesBundle;
use crate::simulator::{PerformanceMetric, RealTimeSample};

fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)
                .with_context(|| format!("create export dir {}", parent.display()))?;
        }
    }
    let file =
        File::create(path).with_context(|| format!("create export file {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// CSV of campaign rows, one line per row plus a header. Campaign names are
/// quoted.
pub fn write_campaign_csv(path: &Path, rows: &[CampaignRow]) -> Result<()> {
    let mut w = create_writer(path)?;
    writeln!(w, "Campaign,Status,Clicks,Conversions,Cost,Revenue,ROI")?;
    for row in rows {
        writeln!(
            w,
            "\"{}\",{},{},{},{},{},{}",
            row.campaign,
            row.status.as_str(),
            row.clicks,
            row.conversions,
            row.cost,
            row.revenue,
            row.roi
        )?;
    }
    w.flush()?;
    Ok(())
}

/// Plain-text dashboard report: key metrics, latest real-time activity,
/// component list and a campaign summary with totals.
pub fn write_summary_report(
    path: &Path,
    sample: &RealTimeSample,
    metrics: &[PerformanceMetric],
    campaigns: &[CampaignRow],
) -> Result<()> {
    let mut w = create_writer(path)?;

    writeln!(w, "INSIGHTFX ANALYTICS DASHBOARD REPORT")?;
    writeln!(
        w,
        "Generated: {}",
        Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    )?;
    writeln!(w)?;

    writeln!(w, "== Key Metrics Summary ==")?;
    for m in metrics {
        writeln!(w, "{}: {} ({})", m.title, m.value, m.change)?;
    }
    writeln!(w)?;

    writeln!(w, "== Real-time Activity ==")?;
    writeln!(w, "Active Users: {}", format_number(sample.active_users))?;
    writeln!(w, "Page Views: {}", format_number(sample.page_views))?;
    writeln!(w, "Conversions: {}", format_number(sample.conversions))?;
    writeln!(w, "Revenue: {}", format_currency(sample.revenue))?;
    writeln!(w, "Conversion Rate: {:.1}%", sample.conversion_rate)?;
    writeln!(w, "Avg Order Value: ${:.2}", sample.avg_order_value)?;
    writeln!(w)?;

    writeln!(w, "== Dashboard Components ==")?;
    writeln!(w, "- Revenue Trend: daily revenue over the last 30 days")?;
    writeln!(w, "- Active Users: daily active users for the past 2 weeks")?;
    writeln!(w, "- Monthly Performance: revenue vs costs by month")?;
    writeln!(w, "- Traffic Sources: breakdown of traffic by source")?;
    writeln!(w)?;

    writeln!(w, "== Campaign Performance Summary ==")?;
    let mut total_clicks = 0u64;
    let mut total_conversions = 0u64;
    let mut total_cost = 0u64;
    let mut total_revenue = 0u64;
    for row in campaigns {
        writeln!(
            w,
            "{} [{}]: {} revenue, {} conversions, ROI {}%",
            row.campaign,
            row.status.as_str(),
            format_currency(row.revenue),
            format_number(row.conversions),
            row.roi
        )?;
        total_clicks += row.clicks;
        total_conversions += row.conversions;
        total_cost += row.cost;
        total_revenue += row.revenue;
    }
    writeln!(
        w,
        "Totals: {} campaigns, {} clicks, {} conversions, {} cost, {} revenue",
        campaigns.len(),
        format_number(total_clicks),
        format_number(total_conversions),
        format_currency(total_cost),
        format_currency(total_revenue)
    )?;

    w.flush()?;
    Ok(())
}

/// Chart series as pretty-printed JSON for the rendering layer.
pub fn write_series_json(path: &Path, bundle: &SeriesBundle) -> Result<()> {
    let mut w = create_writer(path)?;
    let json = serde_json::to_string_pretty(bundle).context("serialize series bundle")?;
    w.write_all(json.as_bytes())?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}
