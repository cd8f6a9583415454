//! Group and Competition: the validated roster the pipeline runs on.

use crate::config::SlotConfig;
use crate::models::player::{Competitor, Player};
use serde::{Deserialize, Serialize};

/// A named group; every competitor plays every other once.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub competitors: Vec<Competitor>,
}

impl Group {
    pub fn new(name: impl Into<String>, competitors: Vec<Competitor>) -> Self {
        Self {
            name: name.into(),
            competitors,
        }
    }
}

/// Groups with interned players, plus the slot calendar. Built once at startup and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct Competition {
    pub players: Vec<Player>,
    pub groups: Vec<Group>,
    pub slots: SlotConfig,
}
