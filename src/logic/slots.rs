//! Slot pool: every court at every match start of every configured day.

use crate::config::SlotConfig;
use crate::models::TimeSlot;
use chrono::Duration;

/// Enumerate the slot pool.
///
/// Order is date, window, start, court. Each window is tiled from its start in steps of
/// the match duration; only slots that end by the window's end are emitted, so 11:00-13:00
/// at 30 minutes gives starts 11:00, 11:30, 12:00 and 12:30. Tiling stops where the
/// calendar runs out.
pub fn time_slots(config: &SlotConfig) -> Vec<TimeSlot> {
    let duration = config.match_duration();
    if duration <= Duration::zero() {
        return Vec::new();
    }

    let mut slots = Vec::new();
    for date in &config.dates {
        for window in &config.windows {
            let courts = config.courts_for(window);
            let end = date.and_time(window.end);
            let mut start = date.and_time(window.start);
            while let Some(slot_end) = start.checked_add_signed(duration) {
                if slot_end > end {
                    break;
                }
                for &court in courts {
                    slots.push(TimeSlot::new(court, start, slot_end));
                }
                start = slot_end;
            }
        }
    }
    slots
}
