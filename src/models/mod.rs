//! Data structures for the schedule: players, teams, matches, time slots, errors.

mod competition;
mod error;
mod game;
mod player;

pub use competition::{Competition, Group};
pub use error::{ConfigError, Infeasible, ReportError, ScheduleError};
pub use game::{Match, TimeSlot};
pub use player::{Competitor, InvalidTeamError, Player, PlayerId, Team};
