//! Round-robin schedule maker: library with models, configuration and scheduling logic.

pub mod config;
pub mod logic;
pub mod models;

pub use config::{CompetitionConfig, CompetitorConfig, GroupConfig, SlotConfig, WindowConfig};
pub use logic::{
    assign_times, assign_times_seeded, generate_all_matches, generate_schedule,
    generate_schedule_with_retries, render_csv, render_json, round_robin, time_slots,
    trim_slots, ReportOptions, Schedule, ScheduleId,
};
pub use models::{
    Competition, Competitor, ConfigError, Group, Infeasible, InvalidTeamError, Match, Player,
    PlayerId, ReportError, ScheduleError, Team, TimeSlot,
};
