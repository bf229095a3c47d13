//! Runtime counters for engine activity.
//!
//! Query logic MUST NOT read these counters to make decisions; they are a
//! reporting surface only.

use std::sync::atomic::{AtomicU64, Ordering};

static QUERIES_EXECUTED: AtomicU64 = AtomicU64::new(0);
static ROWS_SCANNED: AtomicU64 = AtomicU64::new(0);
static RESOLVE_EXACT: AtomicU64 = AtomicU64::new(0);
static RESOLVE_FUZZY: AtomicU64 = AtomicU64::new(0);
static RESOLVE_MISSING: AtomicU64 = AtomicU64::new(0);

///
/// ResolveOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolveOutcome {
    Exact,
    Fuzzy,
    Missing,
}

///
/// MetricsReport
/// Point-in-time snapshot of the engine counters.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MetricsReport {
    pub queries_executed: u64,
    pub rows_scanned: u64,
    pub resolve_exact: u64,
    pub resolve_fuzzy: u64,
    pub resolve_missing: u64,
}

#[must_use]
pub fn report() -> MetricsReport {
    MetricsReport {
        queries_executed: QUERIES_EXECUTED.load(Ordering::Relaxed),
        rows_scanned: ROWS_SCANNED.load(Ordering::Relaxed),
        resolve_exact: RESOLVE_EXACT.load(Ordering::Relaxed),
        resolve_fuzzy: RESOLVE_FUZZY.load(Ordering::Relaxed),
        resolve_missing: RESOLVE_MISSING.load(Ordering::Relaxed),
    }
}

pub fn reset_all() {
    QUERIES_EXECUTED.store(0, Ordering::Relaxed);
    ROWS_SCANNED.store(0, Ordering::Relaxed);
    RESOLVE_EXACT.store(0, Ordering::Relaxed);
    RESOLVE_FUZZY.store(0, Ordering::Relaxed);
    RESOLVE_MISSING.store(0, Ordering::Relaxed);
}

pub(crate) fn record_query(rows_scanned: u64) {
    QUERIES_EXECUTED.fetch_add(1, Ordering::Relaxed);
    ROWS_SCANNED.fetch_add(rows_scanned, Ordering::Relaxed);
}

pub(crate) fn record_resolution(outcome: ResolveOutcome) {
    let counter = match outcome {
        ResolveOutcome::Exact => &RESOLVE_EXACT,
        ResolveOutcome::Fuzzy => &RESOLVE_FUZZY,
        ResolveOutcome::Missing => &RESOLVE_MISSING,
    };

    counter.fetch_add(1, Ordering::Relaxed);
}

///
/// TESTS
///
