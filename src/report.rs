use crate::types::Event;
use chrono::Utc;
use serde::Serialize;

/// One spreadsheet row per event, in the column order the sheet appender
/// expects.
#[derive(Debug, Clone, Serialize)]
pub struct SheetRow {
    pub website: String,
    pub name: String,
    pub url: String,
    pub added_at: String,
}

/// Rows for the spreadsheet-append collaborator. Every row in one batch
/// shares the same timestamp.
pub fn sheet_rows(events: &[Event]) -> Vec<SheetRow> {
    let added_at = Utc::now().to_rfc3339();

    events
        .iter()
        .map(|event| SheetRow {
            website: event.website.clone(),
            name: event.name.clone(),
            url: event.url.clone().unwrap_or_default(),
            added_at: added_at.clone(),
        })
        .collect()
}

/// One plain-text message per event for the notifier collaborator. Absent
/// fields drop their lines instead of printing placeholders.
pub fn chat_message(event: &Event) -> String {
    let mut lines = vec![format!("{} ({})", event.name, event.website)];

    match (&event.start_date, &event.end_date) {
        (Some(start), Some(end)) => lines.push(format!("When: {} to {}", start, end)),
        (Some(start), None) => lines.push(format!("When: {}", start)),
        (None, Some(end)) => lines.push(format!("When: until {}", end)),
        (None, None) => {}
    }

    lines.push(format!("Where: {}", event.location));

    if let Some(prize) = &event.prize {
        lines.push(format!("Prize: {}", prize));
    }
    if let Some(description) = &event.description {
        lines.push(description.clone());
    }
    if let Some(url) = &event.url {
        lines.push(url.clone());
    }
    if !event.tags.is_empty() {
        lines.push(event.tags.join(", "));
    }

    lines.join("\n")
}
