//! Navigation metrics.
//!
//! # Metrics
//! - `router_navigations_total` (counter): applied navigations by kind
//! - `router_unmatched_total` (counter): locations no route matched
//! - `router_route_depth` (histogram): levels in each match chain
//! - `router_config_reloads_total` (counter): route file reloads by outcome
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every call is a no-op

use metrics::{counter, histogram};

use crate::navigation::controller::NavigationKind;

pub fn record_navigation(kind: NavigationKind) {
    counter!("router_navigations_total", "kind" => kind.as_str()).increment(1);
}

pub fn record_unmatched() {
    counter!("router_unmatched_total").increment(1);
}

pub fn record_match_depth(depth: usize) {
    histogram!("router_route_depth").record(depth as f64);
}

pub fn record_config_reload(outcome: &'static str) {
    counter!("router_config_reloads_total", "outcome" => outcome).increment(1);
}
