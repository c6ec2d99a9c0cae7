use crate::types::Event;
use std::collections::HashSet;
use tracing::{debug, info};

/// Reduce a title to its identity key: lowercase, everything outside
/// `[a-z0-9]` stripped. "AI Hack!!" and "ai hack" collide on purpose.
pub fn title_key(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Drop events whose title key was already seen, keeping the first
/// occurrence in input order regardless of which source produced it.
pub fn dedupe(events: Vec<Event>) -> Vec<Event> {
    let total = events.len();
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(total);

    for event in events {
        if seen.insert(title_key(&event.name)) {
            unique.push(event);
        } else {
            debug!("Removing duplicate listing: {} ({})", event.name, event.website);
        }
    }

    let removed_count = total - unique.len();
    if removed_count > 0 {
        info!("Removed {} duplicate listings", removed_count);
    }

    unique
}
