//! Structured JSON logging for the dashboard loop.
//!
//! One JSON object per line, mirrored to stdout and appended to a per-run
//! `events.jsonl` under `LOG_DIR/RUN_ID`. Levels filter via `LOG_LEVEL`,
//! domains via `LOG_DOMAINS` (comma-separated list or "all").

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

use crate::simulator::{PerformanceMetric, RealTimeSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("trace") => Level::Trace,
            Ok("debug") => Level::Debug,
            Ok("info") => Level::Info,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

/// Log categories for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Sample,  // real-time activity samples
    Metrics, // KPI roll-ups
    Table,   // campaign table queries
    Export,  // file exports
    System,  // startup, shutdown, refresh lifecycle
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Sample => "sample",
            Domain::Metrics => "metrics",
            Domain::Table => "table",
            Domain::Export => "export",
            Domain::System => "system",
        }
    }

    pub fn is_enabled(&self) -> bool {
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);
static RUN_CONTEXT: OnceLock<RunContext> = OnceLock::new();

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug)]
struct RunContext {
    run_id: String,
    events: Mutex<BufWriter<File>>,
}

fn ensure_run_context() -> &'static RunContext {
    RUN_CONTEXT.get_or_init(|| {
        let run_id = std::env::var("RUN_ID")
            .unwrap_or_else(|_| format!("r-{}-{}", ts_epoch_ms(), process::id()));
        let base = std::env::var("LOG_DIR").unwrap_or_else(|_| "out/runs".to_string());
        let mut run_dir = PathBuf::from(base);
        run_dir.push(&run_id);
        if let Err(err) = create_dir_all(&run_dir) {
            eprintln!("[log] failed to create run dir: {}", err);
        }

        let _ = std::fs::write(
            run_dir.join("manifest.json"),
            json!({
                "run_id": run_id,
                "ts": ts_now(),
                "pid": process::id(),
                "log_dir": run_dir.to_string_lossy(),
            })
            .to_string(),
        );

        let events = File::create(run_dir.join("events.jsonl")).unwrap_or_else(|err| {
            eprintln!("[log] failed to create events log: {}", err);
            File::create("/tmp/insightfx-events.jsonl").expect("events fallback")
        });

        RunContext {
            run_id,
            events: Mutex::new(BufWriter::new(events)),
        }
    })
}

/// RFC3339 timestamp with milliseconds.
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Epoch milliseconds.
pub fn ts_epoch_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// Emit a structured log entry.
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    if level < Level::from_env() || !domain.is_enabled() {
        return;
    }

    let ctx = ensure_run_context();
    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("run_id".to_string(), json!(ctx.run_id.clone()));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("domain".to_string(), json!(domain.as_str()));
    entry.insert("event".to_string(), json!(event));
    entry.insert("data".to_string(), Value::Object(fields));

    let line = Value::Object(entry).to_string();
    if let Ok(mut w) = ctx.events.lock() {
        let _ = writeln!(w, "{}", line);
        let _ = w.flush();
    }
    println!("{}", line);
}

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

// =============================================================================
// Domain-specific helpers
// =============================================================================

pub fn log_sample(tick_seq: u64, sample: &RealTimeSample) {
    let data = serde_json::to_value(sample).unwrap_or(Value::Null);
    log(
        Level::Info,
        Domain::Sample,
        "activity",
        obj(&[("tick", json!(tick_seq)), ("sample", data)]),
    );
}

pub fn log_metrics(tick_seq: u64, metrics: &[PerformanceMetric]) {
    let data = serde_json::to_value(metrics).unwrap_or(Value::Null);
    log(
        Level::Info,
        Domain::Metrics,
        "roll_up",
        obj(&[("tick", json!(tick_seq)), ("metrics", data)]),
    );
}

pub fn log_refresh(status: &str) {
    log(
        Level::Info,
        Domain::System,
        "refresh",
        obj(&[("status", v_str(status))]),
    );
}

pub fn log_table(query_desc: &str, total_rows: usize, page: usize, total_pages: usize) {
    log(
        Level::Debug,
        Domain::Table,
        "query",
        obj(&[
            ("query", v_str(query_desc)),
            ("total_rows", json!(total_rows)),
            ("page", json!(page)),
            ("total_pages", json!(total_pages)),
        ]),
    );
}

pub fn log_export(kind: &str, path: &str, result: &str) {
    log(
        Level::Info,
        Domain::Export,
        "export",
        obj(&[
            ("kind", v_str(kind)),
            ("path", v_str(path)),
            ("result", v_str(result)),
        ]),
    );
}
