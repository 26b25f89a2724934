//! Dashboard loop binary.
//!
//! Spawns the tick loop, polls a marker file for manual refresh requests,
//! and on Ctrl-C exports the campaign CSV, summary report and chart series
//! before shutting the loop down.

use std::path::Path;

use anyhow::Result;
use tokio::time::{sleep, Duration};

use insightfx::campaigns::{seed_campaigns, CampaignQuery};
use insightfx::config::Config;
use insightfx::export;
use insightfx::logging::{self, obj, v_num, v_str, Domain, Level};
use insightfx::rng::ThreadRngSource;
use insightfx::runtime;
use insightfx::series::SeriesBundle;
use insightfx::simulator::Simulator;

fn log_export_result(kind: &str, path: &Path, result: Result<()>) {
    match result {
        Ok(()) => logging::log_export(kind, &path.to_string_lossy(), "ok"),
        Err(err) => logging::log_export(kind, &path.to_string_lossy(), &format!("error: {:#}", err)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    logging::log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("tick_ms", v_num(cfg.tick_ms as f64)),
            ("refresh_file", v_str(&cfg.refresh_file)),
            ("export_dir", v_str(&cfg.export_dir)),
        ]),
    );

    let campaigns = seed_campaigns();
    let query = CampaignQuery {
        page_size: cfg.page_size,
        ..Default::default()
    };
    let page = query.apply(&campaigns);
    logging::log_table("default", page.total_rows, page.page, page.total_pages);

    let mut rng = ThreadRngSource;
    let series = SeriesBundle::generate(&mut rng);

    let handle = runtime::spawn(cfg.clone(), Simulator::new(ThreadRngSource));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = sleep(Duration::from_millis(250)) => {
                let marker = Path::new(&cfg.refresh_file);
                if marker.exists() {
                    let _ = std::fs::remove_file(marker);
                    if handle.request_refresh() {
                        logging::log_refresh("accepted");
                    } else {
                        logging::log_refresh("rejected_busy");
                    }
                }
            }
        }
    }

    // Export from the latest published snapshot; a failed export is logged
    // and must not abort the shutdown sequence.
    if let Some(snap) = handle.latest() {
        let dir = Path::new(&cfg.export_dir);
        let csv_path = dir.join("campaigns.csv");
        log_export_result(
            "campaigns_csv",
            &csv_path,
            export::write_campaign_csv(&csv_path, &campaigns),
        );
        let report_path = dir.join("summary.txt");
        log_export_result(
            "summary_report",
            &report_path,
            export::write_summary_report(&report_path, &snap.sample, &snap.metrics, &campaigns),
        );
        let series_path = dir.join("series.json");
        log_export_result(
            "series_json",
            &series_path,
            export::write_series_json(&series_path, &series),
        );
    }

    handle.shutdown().await;
    logging::log(Level::Info, Domain::System, "shutdown", obj(&[]));
    Ok(())
}
