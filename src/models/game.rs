//! Match and TimeSlot.

use crate::models::player::{Competitor, PlayerId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A court booked from `start` (inclusive) to `end` (exclusive).
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub court: u32,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeSlot {
    pub fn new(court: u32, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { court, start, end }
    }

    /// Slots starting at the same instant (on other courts) are simultaneous.
    pub fn is_simultaneous(&self, other: &TimeSlot) -> bool {
        self.start == other.start
    }
}

/// One round-robin pairing inside a group, plus its slot once assigned.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub group: String,
    pub competitor_1: Competitor,
    pub competitor_2: Competitor,
    /// None until the assigner binds a slot.
    pub time: Option<TimeSlot>,
}

impl Match {
    pub fn new(competitor_1: Competitor, competitor_2: Competitor, group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            competitor_1,
            competitor_2,
            time: None,
        }
    }

    /// Every player on either side.
    pub fn players(&self) -> BTreeSet<PlayerId> {
        let mut players = self.competitor_1.players();
        players.extend(self.competitor_2.players());
        players
    }
}
