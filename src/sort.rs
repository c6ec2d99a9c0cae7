use crate::types::Event;
use crate::utils::date;

/// Sort events by start date ascending with undated events last.
///
/// "Undated" covers both a missing start date and one that no known format
/// can parse. The sort is stable, so ties and the whole undated block keep
/// their pre-sort order.
pub fn sort_by_start_date(events: &mut [Event]) {
    events.sort_by_cached_key(|event| {
        let parsed = event.start_date.as_deref().and_then(date::parse);
        (parsed.is_none(), parsed)
    });
}
