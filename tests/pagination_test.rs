//! Integration tests for the pagination calculator.
//!
//! The calculator reproduces the lenient arithmetic of the existing
//! callers: no clamping of out-of-range pages or limits, signed offsets,
//! and ceiling division for the page count.

use pg_gateway::gateway::pagination::{Pagination, offset, paginate};

#[test]
fn test_descriptor_for_a_middle_page() {
    let p = paginate(2, 10, 25);
    assert_eq!(
        p,
        Pagination {
            total: 25,
            page: 2,
            limit: 10,
            total_pages: 3,
            has_next: true,
            has_prev: true,
        }
    );
    assert_eq!(offset(2, 10), 10);
}

#[test]
fn test_total_pages_is_ceiling_division() {
    assert_eq!(paginate(1, 10, 0).total_pages, 0);
    assert_eq!(paginate(1, 10, 1).total_pages, 1);
    assert_eq!(paginate(1, 10, 10).total_pages, 1);
    assert_eq!(paginate(1, 10, 11).total_pages, 2);
    assert_eq!(paginate(1, 1, 1000).total_pages, 1000);
}

#[test]
fn test_has_next_iff_page_below_total_pages() {
    for page in 1..=4 {
        let p = paginate(page, 10, 25);
        assert_eq!(p.has_next, page < 3, "page {page}");
        assert_eq!(p.has_prev, page > 1, "page {page}");
    }
}

#[test]
fn test_out_of_range_pages_are_reproduced_faithfully() {
    let p = paginate(0, 10, 25);
    assert_eq!(p.page, 0);
    assert!(!p.has_prev);
    assert_eq!(offset(0, 10), -10);

    let p = paginate(-3, 10, 25);
    assert_eq!(p.page, -3);
    assert_eq!(offset(-3, 10), -40);
}

#[test]
fn test_zero_limit_has_no_pages() {
    let p = paginate(1, 0, 25);
    assert_eq!(p.limit, 0);
    assert_eq!(p.total_pages, 0);
    assert!(!p.has_next);
    assert_eq!(offset(5, 0), 0);
}

#[test]
fn test_page_past_the_end() {
    let p = paginate(99, 10, 25);
    assert!(!p.has_next);
    assert!(p.has_prev);
    assert_eq!(offset(99, 10), 980);
}
