//! Statistics Tests.
//!
//! Counter updates per access outcome, derived metrics, and the three report
//! forms (summary line, results file, JSON).

use std::fs;

use csim_core::SimStats;
use csim_core::cache::AccessResult;
use pretty_assertions::assert_eq;

#[test]
fn record_updates_exactly_one_counter() {
    let mut stats = SimStats::default();

    stats.record(AccessResult::HIT);
    assert_eq!(
        stats,
        SimStats {
            hits: 1,
            misses: 0,
            evictions: 0
        }
    );

    stats.record(AccessResult::MISS);
    assert_eq!(
        stats,
        SimStats {
            hits: 1,
            misses: 1,
            evictions: 0
        }
    );

    stats.record(AccessResult::MISS_EVICTION);
    assert_eq!(
        stats,
        SimStats {
            hits: 1,
            misses: 2,
            evictions: 1
        }
    );
}

#[test]
fn miss_rate_handles_empty_run() {
    assert_eq!(SimStats::default().accesses(), 0);
    assert!(SimStats::default().miss_rate().abs() < f64::EPSILON);

    let stats = SimStats {
        hits: 3,
        misses: 1,
        evictions: 0,
    };
    assert_eq!(stats.accesses(), 4);
    assert!((stats.miss_rate() - 0.25).abs() < f64::EPSILON);
}

#[test]
fn summary_line_format() {
    let stats = SimStats {
        hits: 211,
        misses: 27,
        evictions: 18,
    };
    assert_eq!(stats.summary(), "hits:211 misses:27 evictions:18");
}

#[test]
fn results_file_holds_three_counts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".csim_results");
    let stats = SimStats {
        hits: 4,
        misses: 5,
        evictions: 3,
    };

    stats.write_results(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "4 5 3\n");

    // Rewritten, not appended.
    SimStats::default().write_results(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "0 0 0\n");
}

#[test]
fn json_report_includes_derived_metrics() {
    let stats = SimStats {
        hits: 1,
        misses: 3,
        evictions: 2,
    };
    let value = serde_json::to_value(stats.report()).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "hits": 1,
            "misses": 3,
            "evictions": 2,
            "accesses": 4,
            "miss_rate": 0.75,
        })
    );
}
