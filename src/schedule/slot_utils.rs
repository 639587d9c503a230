use chrono::{NaiveTime, Timelike};
use super::types::Slot;

/// Parses a 24-hour time string (H:MM or HH:MM) to fractional hours
pub fn parse_time_24h(time_str: &str) -> Option<f64> {
    let time = NaiveTime::parse_from_str(time_str.trim(), "%H:%M").ok()?;
    Some(time.hour() as f64 + time.minute() as f64 / 60.0)
}

/// Parses the start of a slot label like "09:00 - 10:30" to fractional hours.
/// Labels that do not parse sort first, so they map to 0.0.
pub fn parse_slot_start(slot_label: &str) -> f64 {
    let parts: Vec<&str> = slot_label.trim().split('-').collect();
    if parts.len() != 2 {
        return 0.0;
    }
    parse_time_24h(parts[0]).unwrap_or(0.0)
}

/// Stable sort of slots by start time
pub fn sort_chronologically(slots: &mut [Slot]) {
    slots.sort_by(|a, b| parse_slot_start(&a.label).total_cmp(&parse_slot_start(&b.label)));
}
