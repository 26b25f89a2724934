//! Smoke tests: end-to-end validation that the dashboard's claims are real.
//!
//! These tests drive the simulator, the loop task and the exporters together
//! and verify invariants. They are the gate between "code compiles" and
//! "system works."

use std::path::Path;
use std::time::Duration;

use insightfx::campaigns::{seed_campaigns, CampaignQuery, CampaignStatus, SortDirection, SortField};
use insightfx::config::Config;
use insightfx::export::{write_campaign_csv, write_series_json, write_summary_report};
use insightfx::rng::{MidpointSource, SeededSource};
use insightfx::runtime::{spawn, DashboardSnapshot};
use insightfx::series::SeriesBundle;
use insightfx::simulator::{ChangeType, MetricKind, SimulationState, Simulator, Trend};
use tokio::time::timeout;

fn loop_config(tick_ms: u64, refresh_delay_ms: u64) -> Config {
    Config {
        tick_ms,
        refresh_delay_ms,
        refresh_file: String::new(),
        export_dir: String::new(),
        page_size: 5,
    }
}

async fn next_snapshot(
    rx: &mut tokio::sync::watch::Receiver<Option<DashboardSnapshot>>,
) -> DashboardSnapshot {
    timeout(Duration::from_secs(5), rx.changed())
        .await
        .expect("snapshot timeout")
        .expect("loop dropped");
    rx.borrow_and_update().clone().expect("empty snapshot")
}

// ---------------------------------------------------------------------------
// S01: Known scenario — midpoint draws produce the documented figures
// ---------------------------------------------------------------------------
#[test]
fn s01_midpoint_scenario_exact() {
    let state = SimulationState::new().with_trend(Trend::Flat);
    let mut sim = Simulator::with_state(state, MidpointSource);
    let (sample, metrics) = sim.tick();

    assert_eq!(sample.active_users, 2_400);
    assert_eq!(sample.page_views, 10_800);
    assert_eq!(sample.conversions, 378);
    assert_eq!(sample.revenue, 75_600);
    assert_eq!(metrics[0].value, "$847,427");
    assert_eq!(metrics[3].value, "23.4%");
    assert_eq!(metrics[3].change, "\u{b1}0.0%");
}

// ---------------------------------------------------------------------------
// S02: Correlation invariants hold over a long seeded run
// ---------------------------------------------------------------------------
#[test]
fn s02_invariants_over_long_run() {
    let mut sim = Simulator::new(SeededSource::new(42));
    let mut prev_revenue = 0.0;
    for _ in 0..1_000 {
        let (sample, metrics) = sim.tick();

        assert!(sample.conversions <= sample.page_views);
        assert!(sample.conversion_rate > 0.0);
        assert!(sample.avg_order_value >= 130.0 && sample.avg_order_value < 270.0);

        assert_eq!(metrics.len(), 4);
        assert_eq!(metrics[0].kind, MetricKind::Revenue);
        assert_eq!(
            metrics[3].change_type == ChangeType::Neutral,
            sample.trend_direction == 0
        );

        // Baselines only accumulate.
        let revenue = sim.snapshot().base_revenue();
        assert!(revenue >= prev_revenue);
        prev_revenue = revenue;
    }
}

// ---------------------------------------------------------------------------
// S03: Deterministic replay — same seed, same stream
// ---------------------------------------------------------------------------
#[test]
fn s03_deterministic_replay() {
    let mut a = Simulator::new(SeededSource::new(7));
    let mut b = Simulator::new(SeededSource::new(7));
    for _ in 0..200 {
        assert_eq!(a.tick(), b.tick());
    }
}

// ---------------------------------------------------------------------------
// S04: Loop task publishes monotonically sequenced snapshots
// ---------------------------------------------------------------------------
#[tokio::test]
async fn s04_loop_publishes_snapshots() {
    let handle = spawn(loop_config(10, 1_000), Simulator::new(SeededSource::new(1)));
    let mut rx = handle.snapshots();

    let mut last_seq = 0;
    for _ in 0..5 {
        let snap = next_snapshot(&mut rx).await;
        assert!(snap.seq > last_seq);
        last_seq = snap.seq;
    }
    handle.shutdown().await;
}

// ---------------------------------------------------------------------------
// S05: Manual refresh is guarded — overlap rejected, shutdown never blocks
// ---------------------------------------------------------------------------
#[tokio::test]
async fn s05_refresh_guard_and_cancellation() {
    let handle = spawn(loop_config(60_000, 30_000), Simulator::new(SeededSource::new(2)));
    let mut rx = handle.snapshots();
    next_snapshot(&mut rx).await;

    assert!(handle.request_refresh());
    assert!(!handle.request_refresh());

    timeout(Duration::from_secs(2), handle.shutdown())
        .await
        .expect("shutdown waited out the refresh delay");
}

// ---------------------------------------------------------------------------
// S06: Campaign query pipeline — filter, sort, paginate in one pass
// ---------------------------------------------------------------------------
#[test]
fn s06_campaign_query_pipeline() {
    let data = seed_campaigns();
    let page = CampaignQuery {
        status: Some(CampaignStatus::Active),
        sort_field: SortField::Roi,
        sort_direction: SortDirection::Desc,
        page: 1,
        page_size: 3,
        ..Default::default()
    }
    .apply(&data);

    assert_eq!(page.total_rows, 5);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.rows.len(), 3);
    assert_eq!(page.rows[0].campaign, "Black Friday Preview");
    let rois: Vec<u64> = page.rows.iter().map(|r| r.roi).collect();
    assert!(rois.windows(2).all(|w| w[0] >= w[1]));
}

// ---------------------------------------------------------------------------
// S07: Exports — all three artifacts written and readable
// ---------------------------------------------------------------------------
#[test]
fn s07_exports_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let state = SimulationState::new().with_trend(Trend::Flat);
    let mut sim = Simulator::with_state(state, MidpointSource);
    let (sample, metrics) = sim.tick();
    let campaigns = seed_campaigns();

    let csv = dir.path().join("campaigns.csv");
    write_campaign_csv(&csv, &campaigns).unwrap();
    let report = dir.path().join("summary.txt");
    write_summary_report(&report, &sample, &metrics, &campaigns).unwrap();
    let series = dir.path().join("series.json");
    let mut rng = SeededSource::new(3);
    write_series_json(&series, &SeriesBundle::generate(&mut rng)).unwrap();

    for path in [&csv, &report, &series] {
        assert!(Path::new(path).exists());
        assert!(std::fs::metadata(path).unwrap().len() > 0);
    }

    let content = std::fs::read_to_string(&report).unwrap();
    assert!(content.contains("Total Revenue: $847,427"));
    assert!(content.contains("Totals: 8 campaigns"));
}
