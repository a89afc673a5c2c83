//! Pure event-list ordering and pagination
//!
//! The backend returns events in arbitrary order; presentation order is a
//! client concern. Upcoming events come first (soonest first), past events
//! after (most recent first), and the combined sequence is paginated with
//! fixed-size pages.

use chrono::NaiveDate;
use stagelink_api::types::Event;
use std::cmp::Reverse;

/// One page of an ordered event list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageView {
    /// Events on this page
    pub items: Vec<Event>,
    /// 1-based page number this view shows
    pub page: u32,
    /// Total pages for the whole sequence
    pub total_pages: u32,
}

fn event_day(event: &Event) -> Option<NaiveDate> {
    event.start_date.map(|d| d.date_naive())
}

/// Whether an event counts as upcoming relative to `today`
///
/// Day granularity: an event later today is upcoming. Events with no start
/// date are not.
#[must_use]
pub fn is_upcoming(event: &Event, today: NaiveDate) -> bool {
    event_day(event).is_some_and(|day| day >= today)
}

/// Split events into (upcoming, past) without reordering either side
#[must_use]
pub fn partition(events: Vec<Event>, today: NaiveDate) -> (Vec<Event>, Vec<Event>) {
    events
        .into_iter()
        .partition(|event| is_upcoming(event, today))
}

/// Order events for display: upcoming ascending, then past descending
///
/// Sorting is by a total key so dated events always compare with each
/// other even when undated events sit between them. Undated events land
/// after every dated past event; the stable sort keeps their incoming
/// relative order.
#[must_use]
pub fn order(events: Vec<Event>, today: NaiveDate) -> Vec<Event> {
    let (mut upcoming, mut past) = partition(events, today);
    // The upcoming side never holds a missing date
    upcoming.sort_by_key(event_day);
    // Reverse puts None last: descending dated, then undated
    past.sort_by_key(|event| Reverse(event_day(event)));
    upcoming.append(&mut past);
    upcoming
}

/// Total pages needed for `len` items at `page_size` per page
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> u32 {
    debug_assert!(page_size > 0, "page_size must be positive");
    (len.div_ceil(page_size)) as u32
}

/// Slice one 1-based page out of an ordered sequence
///
/// Pages beyond the end are empty, never an error. `page_size` must be
/// positive (debug-asserted).
#[must_use]
pub fn paginate(events: &[Event], page: u32, page_size: usize) -> PageView {
    debug_assert!(page_size > 0, "page_size must be positive");
    let start = page_size.saturating_mul(page.saturating_sub(1) as usize);
    let end = start.saturating_add(page_size).min(events.len());
    let items = if start < events.len() {
        events[start..end].to_vec()
    } else {
        Vec::new()
    };
    PageView {
        items,
        page,
        total_pages: total_pages(events.len(), page_size),
    }
}
