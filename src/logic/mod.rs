//! Schedule logic: round robin, slot pool, assignment and reporting.

mod assign;
mod report;
mod round_robin;
mod schedule;
mod slots;

pub use assign::{assign_times, assign_times_seeded, trim_slots};
pub use report::{render_csv, render_json, ReportOptions, HEADER};
pub use round_robin::{generate_all_matches, round_robin};
pub use schedule::{generate_schedule, generate_schedule_with_retries, Schedule, ScheduleId};
pub use slots::time_slots;
