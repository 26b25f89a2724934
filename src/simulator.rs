//! Correlated synthetic-metrics simulator.
//!
//! One owned [`SimulationState`] drives two derived views: instantaneous
//! activity samples ([`RealTimeSample`]) and cumulative KPI metrics
//! ([`PerformanceMetric`], exactly four per tick). Activity, page views,
//! conversions and revenue are correlated through a shared market-mood
//! trend and damped momentum terms, so the numbers move together instead of
//! jittering independently.
//!
//! The simulator has no I/O and cannot fail; it is deterministic up to the
//! injected [`UniformSource`].

use chrono::Utc;
use serde::Serialize;

use crate::format::{format_currency, format_number, format_percentage, signed_percentage};
use crate::rng::UniformSource;

/// Probability per tick that the market mood is redrawn. This is per call,
/// not per unit of elapsed time: changing the tick period changes the
/// perceived volatility.
const TREND_SHIFT_PROB: f64 = 0.10;

/// Damping applied to every velocity term each tick. Damping below 1.0 keeps
/// the random walk inside a finite stationary envelope; without it the drift
/// is unbounded and chart scales break.
const VELOCITY_DAMPING: f64 = 0.95;

/// How much one tick of activity feeds the cumulative baselines. Fixed rate
/// per call, not scaled by wall-clock time between calls.
const BASELINE_SMOOTHING: f64 = 0.001;

/// Current market mood. Biases activity volume, conversion rate and order
/// value in the same direction so the derived figures stay correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Flat,
    Down,
}

impl Trend {
    /// Numeric direction: +1, 0 or -1.
    pub fn direction(&self) -> i8 {
        match self {
            Trend::Up => 1,
            Trend::Flat => 0,
            Trend::Down => -1,
        }
    }

    /// Multiplier applied to activity volume.
    pub fn multiplier(&self) -> f64 {
        match self {
            Trend::Up => 1.2,
            Trend::Flat => 1.0,
            Trend::Down => 0.8,
        }
    }
}

/// Cumulative simulation state. Constructed explicitly, owned by one
/// [`Simulator`], mutated only through [`Simulator::sample_activity`] and
/// [`SimulationState::advance`]; consumers get clones via
/// [`Simulator::snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationState {
    base_revenue: f64,
    base_users: f64,
    base_conversions: f64,
    base_growth_rate: f64,
    daily_trend: Trend,
    revenue_velocity: f64,
    user_velocity: f64,
    conversion_velocity: f64,
    /// Advisory only; never load-bearing for correctness.
    last_update_ms: i64,
}

impl SimulationState {
    pub fn new() -> Self {
        Self {
            base_revenue: 847_352.0,
            base_users: 24_567.0,
            base_conversions: 3_428.0,
            base_growth_rate: 23.4,
            daily_trend: Trend::Up,
            revenue_velocity: 0.0,
            user_velocity: 0.0,
            conversion_velocity: 0.0,
            last_update_ms: 0,
        }
    }

    pub fn with_baselines(mut self, revenue: f64, users: f64, conversions: f64, growth_rate: f64) -> Self {
        self.base_revenue = revenue;
        self.base_users = users;
        self.base_conversions = conversions;
        self.base_growth_rate = growth_rate;
        self
    }

    pub fn with_trend(mut self, trend: Trend) -> Self {
        self.daily_trend = trend;
        self
    }

    pub fn with_velocities(mut self, revenue: f64, user: f64, conversion: f64) -> Self {
        self.revenue_velocity = revenue;
        self.user_velocity = user;
        self.conversion_velocity = conversion;
        self
    }

    /// Feed one tick of activity into the cumulative baselines.
    pub fn advance(&mut self, sample: &RealTimeSample) {
        self.base_revenue += sample.revenue as f64 * BASELINE_SMOOTHING;
        self.base_users += sample.active_users as f64 * BASELINE_SMOOTHING * 0.1;
        self.base_conversions += sample.conversions as f64 * BASELINE_SMOOTHING;
    }

    pub fn base_revenue(&self) -> f64 {
        self.base_revenue
    }

    pub fn base_users(&self) -> f64 {
        self.base_users
    }

    pub fn base_conversions(&self) -> f64 {
        self.base_conversions
    }

    pub fn base_growth_rate(&self) -> f64 {
        self.base_growth_rate
    }

    pub fn daily_trend(&self) -> Trend {
        self.daily_trend
    }

    pub fn revenue_velocity(&self) -> f64 {
        self.revenue_velocity
    }

    pub fn user_velocity(&self) -> f64 {
        self.user_velocity
    }

    pub fn conversion_velocity(&self) -> f64 {
        self.conversion_velocity
    }

    pub fn last_update_ms(&self) -> i64 {
        self.last_update_ms
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Instantaneous activity for one tick. Fresh value object, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RealTimeSample {
    pub active_users: u64,
    pub page_views: u64,
    pub conversions: u64,
    pub revenue: u64,
    /// Percent, e.g. 3.5 for a 3.5% conversion rate.
    pub conversion_rate: f64,
    pub avg_order_value: f64,
    pub trend_direction: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
    Neutral,
}

/// Fixed emission order of the four KPI metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Revenue,
    Users,
    Conversions,
    GrowthRate,
}

/// Symbolic icon tag for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricIcon {
    Dollar,
    Users,
    Target,
    TrendingUp,
}

/// One KPI card: formatted cumulative value plus a growth annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetric {
    pub kind: MetricKind,
    pub title: &'static str,
    pub value: String,
    pub change: String,
    pub change_type: ChangeType,
    pub icon: MetricIcon,
}

/// Owns the simulation state and the random source. All reads and mutations
/// of the state go through this owner; callers that need concurrency put one
/// `Simulator` behind a single task and fan out immutable snapshots.
pub struct Simulator<R: UniformSource> {
    state: SimulationState,
    rng: R,
}

impl<R: UniformSource> Simulator<R> {
    pub fn new(rng: R) -> Self {
        Self::with_state(SimulationState::new(), rng)
    }

    pub fn with_state(state: SimulationState, rng: R) -> Self {
        Self { state, rng }
    }

    /// Immutable copy of the current cumulative state.
    pub fn snapshot(&self) -> SimulationState {
        self.state.clone()
    }

    /// Produce one instantaneous activity sample, advancing trend and
    /// momentum as a side effect.
    pub fn sample_activity(&mut self) -> RealTimeSample {
        // Occasionally the mood shifts: 70% up, the rest split evenly
        // between flat and down.
        if self.rng.next_f64() < TREND_SHIFT_PROB {
            self.state.daily_trend = if self.rng.next_f64() < 0.7 {
                Trend::Up
            } else if self.rng.next_f64() < 0.5 {
                Trend::Flat
            } else {
                Trend::Down
            };
        }

        // Momentum: independent zero-centered noise per term, then damp.
        self.state.revenue_velocity += (self.rng.next_f64() - 0.5) * 100.0;
        self.state.user_velocity += (self.rng.next_f64() - 0.5) * 50.0;
        self.state.conversion_velocity += (self.rng.next_f64() - 0.5) * 5.0;
        self.state.revenue_velocity *= VELOCITY_DAMPING;
        self.state.user_velocity *= VELOCITY_DAMPING;
        self.state.conversion_velocity *= VELOCITY_DAMPING;

        let mult = self.state.daily_trend.multiplier();
        let dir = self.state.daily_trend.direction();

        // Floor at zero: a deep negative user velocity must not produce
        // negative activity.
        let active_users = (self.rng.range(2000.0, 2800.0) * mult + self.state.user_velocity)
            .floor()
            .max(0.0) as u64;
        let page_views = (active_users as f64 * self.rng.range(3.5, 5.5)).floor() as u64;
        let conversion_rate = (self.rng.range(2.5, 4.5) + dir as f64 * 0.5) / 100.0;
        let conversions = (page_views as f64 * conversion_rate).floor() as u64;
        let avg_order_value = self.rng.range(150.0, 250.0) + dir as f64 * 20.0;
        let revenue = (conversions as f64 * avg_order_value).floor() as u64;

        self.state.last_update_ms = Utc::now().timestamp_millis();

        RealTimeSample {
            active_users,
            page_views,
            conversions,
            revenue,
            conversion_rate: conversion_rate * 100.0,
            avg_order_value,
            trend_direction: dir,
        }
    }

    /// Roll the most recent sample into the cumulative baselines and emit
    /// the four KPI metrics, always in the order Revenue, Users,
    /// Conversions, GrowthRate. The baselines are advanced first so the
    /// metrics never read stale state.
    pub fn roll_up_metrics(&mut self, sample: &RealTimeSample) -> [PerformanceMetric; 4] {
        self.state.advance(sample);

        let dir = self.state.daily_trend.direction() as f64;
        let revenue_growth = 8.0 + self.rng.next_f64() * 8.0 + dir * 4.0;
        let user_growth = 5.0 + self.rng.next_f64() * 6.0 + dir * 3.0;
        let conversion_growth = 10.0 + self.rng.next_f64() * 10.0 + dir * 5.0;
        let growth_rate = self.state.base_growth_rate + (self.rng.next_f64() - 0.5) * 2.0 + dir;

        let trend_change = dir * 2.1;
        let (growth_change, growth_change_type) = match self.state.daily_trend {
            Trend::Up => (format!("+{:.1}%", trend_change), ChangeType::Increase),
            Trend::Down => (format!("{:.1}%", trend_change), ChangeType::Decrease),
            Trend::Flat => (format!("\u{b1}{:.1}%", trend_change), ChangeType::Neutral),
        };

        [
            PerformanceMetric {
                kind: MetricKind::Revenue,
                title: "Total Revenue",
                value: format_currency(self.state.base_revenue.floor() as u64),
                change: signed_percentage(revenue_growth),
                change_type: change_type_for(revenue_growth),
                icon: MetricIcon::Dollar,
            },
            PerformanceMetric {
                kind: MetricKind::Users,
                title: "Active Users",
                value: format_number(self.state.base_users.floor() as u64),
                change: signed_percentage(user_growth),
                change_type: change_type_for(user_growth),
                icon: MetricIcon::Users,
            },
            PerformanceMetric {
                kind: MetricKind::Conversions,
                title: "Conversions",
                value: format_number(self.state.base_conversions.floor() as u64),
                change: signed_percentage(conversion_growth),
                change_type: change_type_for(conversion_growth),
                icon: MetricIcon::Target,
            },
            PerformanceMetric {
                kind: MetricKind::GrowthRate,
                title: "Growth Rate",
                value: format_percentage(growth_rate),
                change: growth_change,
                change_type: growth_change_type,
                icon: MetricIcon::TrendingUp,
            },
        ]
    }

    /// One full tick: sample, then roll up. Keeping the pair here guarantees
    /// metrics are always computed from the state advanced by this sample.
    pub fn tick(&mut self) -> (RealTimeSample, [PerformanceMetric; 4]) {
        let sample = self.sample_activity();
        let metrics = self.roll_up_metrics(&sample);
        (sample, metrics)
    }
}

fn change_type_for(growth: f64) -> ChangeType {
    if growth > 0.0 {
        ChangeType::Increase
    } else {
        ChangeType::Decrease
    }
}
