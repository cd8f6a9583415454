//! Errors raised while configuring, assigning and reporting a schedule.

use crate::models::player::InvalidTeamError;
use chrono::NaiveDateTime;
use std::fmt;

/// No conflict-free assignment was found.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Infeasible {
    /// More matches than slots; only a configuration change helps.
    NotEnoughSlots { matches: usize, slots: usize },
    /// The random fill order got stuck at the slot starting at `start`; a new seed may succeed.
    DeadEnd {
        start: NaiveDateTime,
        unassigned: usize,
    },
}

impl Infeasible {
    /// Whether re-running with another seed can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Infeasible::DeadEnd { .. })
    }
}

impl fmt::Display for Infeasible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasible::NotEnoughSlots { matches, slots } => {
                write!(f, "Nr of matches {} > nr of time slots {}", matches, slots)
            }
            Infeasible::DeadEnd { start, unassigned } => write!(
                f,
                "Every one of the {} unassigned matches conflicts at {}",
                unassigned,
                start.format("%Y-%m-%d %H:%M")
            ),
        }
    }
}

impl std::error::Error for Infeasible {}

/// Invalid competition configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io { path: String, message: String },
    /// The configuration is not valid JSON for this schema.
    Parse(String),
    /// A player or group name is empty after trimming.
    EmptyName,
    /// Two groups share a name.
    DuplicateGroup(String),
    /// A player appears in more than one competitor of the same group.
    PlayerTwiceInGroup { group: String, player: String },
    InvalidTeam(InvalidTeamError),
    /// Match duration must be at least one minute.
    ZeroMatchDuration,
    /// Match duration is longer than a day.
    MatchTooLong(i64),
    /// A daily window ends at or before it starts.
    EmptyWindow { start: String, end: String },
    /// The same date is listed twice.
    DuplicateDate(String),
    /// The same court is listed twice in one court list.
    DuplicateCourt(u32),
    /// Two windows overlap in time on a shared court.
    OverlappingWindows {
        first: String,
        second: String,
        court: u32,
    },
    /// The slot pool would exceed [`crate::config::MAX_SLOTS`].
    TooManySlots(usize),
    /// More round-robin matches than any allowed slot pool could hold.
    TooManyMatches(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => write!(f, "Could not read {}: {}", path, message),
            ConfigError::Parse(message) => write!(f, "Invalid configuration: {}", message),
            ConfigError::EmptyName => write!(f, "Names must not be empty"),
            ConfigError::DuplicateGroup(name) => write!(f, "Group {} is defined twice", name),
            ConfigError::PlayerTwiceInGroup { group, player } => {
                write!(f, "{} appears more than once in {}", player, group)
            }
            ConfigError::InvalidTeam(e) => fmt::Display::fmt(e, f),
            ConfigError::ZeroMatchDuration => write!(f, "Match duration must be positive"),
            ConfigError::MatchTooLong(minutes) => {
                write!(f, "Match duration of {} minutes is longer than a day", minutes)
            }
            ConfigError::EmptyWindow { start, end } => {
                write!(f, "Window {}-{} ends before it starts", start, end)
            }
            ConfigError::DuplicateDate(date) => write!(f, "Date {} is listed twice", date),
            ConfigError::DuplicateCourt(court) => write!(f, "Court {} is listed twice", court),
            ConfigError::OverlappingWindows {
                first,
                second,
                court,
            } => write!(f, "Windows {} and {} overlap on court {}", first, second, court),
            ConfigError::TooManySlots(slots) => write!(
                f,
                "{} time slots is more than the limit of {}",
                slots,
                crate::config::MAX_SLOTS
            ),
            ConfigError::TooManyMatches(matches) => write!(
                f,
                "{} matches is more than the limit of {}",
                matches,
                crate::config::MAX_SLOTS
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<InvalidTeamError> for ConfigError {
    fn from(e: InvalidTeamError) -> Self {
        ConfigError::InvalidTeam(e)
    }
}

/// The report could not be rendered.
#[derive(Debug)]
pub enum ReportError {
    /// A match reached the reporter without a slot.
    Unassigned { group: String, players: String },
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Unassigned { group, players } => {
                write!(f, "Match {} in {} has no time slot", players, group)
            }
            ReportError::Csv(e) => write!(f, "Could not write CSV: {}", e),
            ReportError::Json(e) => write!(f, "Could not write JSON: {}", e),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<csv::Error> for ReportError {
    fn from(e: csv::Error) -> Self {
        ReportError::Csv(e)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        ReportError::Json(e)
    }
}

/// Anything that can stop the schedule pipeline.
#[derive(Debug)]
pub enum ScheduleError {
    Config(ConfigError),
    Infeasible(Infeasible),
    Report(ReportError),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::Config(e) => fmt::Display::fmt(e, f),
            ScheduleError::Infeasible(e) => fmt::Display::fmt(e, f),
            ScheduleError::Report(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for ScheduleError {}

impl From<ConfigError> for ScheduleError {
    fn from(e: ConfigError) -> Self {
        ScheduleError::Config(e)
    }
}

impl From<Infeasible> for ScheduleError {
    fn from(e: Infeasible) -> Self {
        ScheduleError::Infeasible(e)
    }
}

impl From<ReportError> for ScheduleError {
    fn from(e: ReportError) -> Self {
        ScheduleError::Report(e)
    }
}
