//! Synthetic chart series for the rendering layer.
//!
//! Each generator draws from the injected uniform source and labels points
//! with calendar dates ending today, so the charts read as a live history.

use chrono::{Duration, Months, Utc};
use serde::Serialize;

use crate::rng::UniformSource;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePoint {
    pub date: String,
    pub desktop: u64,
    pub mobile: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyUsersPoint {
    pub date: String,
    pub users: u64,
    pub sessions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub revenue: u64,
    pub costs: u64,
    pub profit: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrafficSource {
    pub name: &'static str,
    pub value: u64,
}

/// "Jun 05"-style labels for the last `days` days, oldest first.
fn day_labels(days: usize) -> Vec<String> {
    (0..days)
        .map(|i| {
            (Utc::now() - Duration::days((days - 1 - i) as i64))
                .format("%b %d")
                .to_string()
        })
        .collect()
}

/// Daily revenue split by device, with a mild upward drift over the window.
pub fn revenue_series<R: UniformSource>(rng: &mut R, days: usize) -> Vec<RevenuePoint> {
    day_labels(days)
        .into_iter()
        .enumerate()
        .map(|(i, date)| RevenuePoint {
            date,
            desktop: (rng.next_f64() * 50_000.0).floor() as u64 + 20_000 + i as u64 * 500,
            mobile: (rng.next_f64() * 30_000.0).floor() as u64 + 15_000 + i as u64 * 300,
        })
        .collect()
}

/// Daily active users and sessions.
pub fn daily_active_users<R: UniformSource>(rng: &mut R, days: usize) -> Vec<DailyUsersPoint> {
    day_labels(days)
        .into_iter()
        .enumerate()
        .map(|(i, date)| DailyUsersPoint {
            date,
            users: (rng.next_f64() * 5_000.0).floor() as u64 + 8_000 + i as u64 * 100,
            sessions: (rng.next_f64() * 8_000.0).floor() as u64 + 12_000 + i as u64 * 150,
        })
        .collect()
}

/// Monthly revenue against costs, oldest month first.
pub fn monthly_performance<R: UniformSource>(rng: &mut R, months: usize) -> Vec<MonthlyPoint> {
    let today = Utc::now().date_naive();
    (0..months)
        .map(|i| {
            let month = today
                .checked_sub_months(Months::new((months - 1 - i) as u32))
                .unwrap_or(today)
                .format("%b")
                .to_string();
            let revenue = (rng.next_f64() * 100_000.0).floor() as u64 + 50_000;
            let costs = (rng.next_f64() * 40_000.0).floor() as u64 + 20_000;
            MonthlyPoint {
                month,
                revenue,
                costs,
                profit: revenue as i64 - costs as i64,
            }
        })
        .collect()
}

/// Fixed traffic-source breakdown for the pie chart.
pub fn traffic_sources() -> Vec<TrafficSource> {
    vec![
        TrafficSource { name: "Organic Search", value: 4_500 },
        TrafficSource { name: "Paid Ads", value: 3_200 },
        TrafficSource { name: "Social Media", value: 2_800 },
        TrafficSource { name: "Direct", value: 2_100 },
        TrafficSource { name: "Email", value: 1_500 },
        TrafficSource { name: "Referral", value: 800 },
    ]
}

/// Everything the chart layer needs, generated in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesBundle {
    pub revenue: Vec<RevenuePoint>,
    pub daily_users: Vec<DailyUsersPoint>,
    pub monthly: Vec<MonthlyPoint>,
    pub traffic: Vec<TrafficSource>,
}

impl SeriesBundle {
    pub fn generate<R: UniformSource>(rng: &mut R) -> Self {
        Self {
            revenue: revenue_series(rng, 30),
            daily_users: daily_active_users(rng, 14),
            monthly: monthly_performance(rng, 12),
            traffic: traffic_sources(),
        }
    }
}
