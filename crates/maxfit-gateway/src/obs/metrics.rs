//! Minimal metrics registry for the gateway.
//!
//! Counters with dynamic labels backed by `DashMap`. Labels are flattened into
//! sorted key vectors so rendering order does not depend on call sites.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for an exact label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| {
                let labels = r
                    .key()
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                (labels, r.value().load(Ordering::Relaxed))
            })
            .collect();
        rows.sort();
        for (labels, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", name, labels, val);
        }
    }
}

#[derive(Default)]
pub struct GatewayMetrics {
    pub gate_decisions: CounterVec,
    pub profile_updates: CounterVec,
}

impl GatewayMetrics {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.gate_decisions.render("maxfit_gate_decisions_total", &mut out);
        self.profile_updates.render("maxfit_profile_updates_total", &mut out);
        out
    }
}
