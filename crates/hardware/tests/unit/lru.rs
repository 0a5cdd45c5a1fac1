//! LRU Set Scan Tests.
//!
//! `SetScan` is the single pass behind every access: hit way, first empty way,
//! LRU victim (lowest way on ties) and the largest recency stamp.

use csim_core::cache::CacheLine;
use csim_core::cache::lru::SetScan;

fn line(valid: bool, tag: u64, recency: u64) -> CacheLine {
    CacheLine {
        valid,
        tag,
        recency,
    }
}

#[test]
fn fresh_set_picks_first_way_everywhere() {
    let lines = [CacheLine::default(); 4];
    let scan = SetScan::new(&lines, 0);

    assert_eq!(scan.hit_way, None, "tag 0 in an invalid line is not a hit");
    assert_eq!(scan.empty_way, Some(0));
    assert_eq!(scan.lru_way, 0);
    assert_eq!(scan.max_recency, 0);
    assert_eq!(scan.next_recency(), 1);
}

#[test]
fn finds_valid_matching_tag() {
    let lines = [line(true, 3, 1), line(true, 9, 2), line(false, 9, 0)];
    let scan = SetScan::new(&lines, 9);
    assert_eq!(scan.hit_way, Some(1));
    assert_eq!(scan.empty_way, Some(2));
}

#[test]
fn victim_is_smallest_recency() {
    let lines = [line(true, 1, 7), line(true, 2, 3), line(true, 3, 5)];
    let scan = SetScan::new(&lines, 42);

    assert_eq!(scan.hit_way, None);
    assert_eq!(scan.empty_way, None);
    assert_eq!(scan.lru_way, 1);
    assert_eq!(scan.max_recency, 7);
    assert_eq!(scan.next_recency(), 8);
}

#[test]
fn recency_ties_go_to_lowest_way() {
    let lines = [line(true, 1, 4), line(true, 2, 2), line(true, 3, 2), line(true, 4, 2)];
    assert_eq!(SetScan::new(&lines, 0).lru_way, 1);
}

#[test]
fn first_empty_way_wins() {
    let lines = [line(true, 1, 1), line(false, 0, 0), line(false, 0, 0)];
    assert_eq!(SetScan::new(&lines, 5).empty_way, Some(1));
}
