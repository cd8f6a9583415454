//! Player, Team and the Competitor variant used by the scheduler.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque identifier for a player, interned from the roster.
///
/// Two players are the same person iff their ids are equal; names are only for display.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// A single person taking part in the competition.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A team was built from two entries naming the same player.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidTeamError {
    pub name: String,
}

impl fmt::Display for InvalidTeamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A team needs two different players ({} was given twice)", self.name)
    }
}

impl std::error::Error for InvalidTeamError {}

/// Two distinct players playing doubles together.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub player_1: Player,
    pub player_2: Player,
}

impl Team {
    pub fn new(player_1: Player, player_2: Player) -> Result<Self, InvalidTeamError> {
        if player_1.id == player_2.id {
            return Err(InvalidTeamError {
                name: player_1.name,
            });
        }
        Ok(Self { player_1, player_2 })
    }

    /// Ids of both members.
    pub fn players(&self) -> BTreeSet<PlayerId> {
        BTreeSet::from([self.player_1.id, self.player_2.id])
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.player_1, self.player_2)
    }
}

/// Whoever plays one side of a match: a single player or a team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Competitor {
    Player(Player),
    Team(Team),
}

impl Competitor {
    /// The one (singles) or two (doubles) players behind this competitor.
    pub fn players(&self) -> BTreeSet<PlayerId> {
        match self {
            Competitor::Player(p) => BTreeSet::from([p.id]),
            Competitor::Team(t) => t.players(),
        }
    }

    /// True when the two competitors share no player.
    pub fn is_disjoint(&self, other: &Competitor) -> bool {
        self.players().is_disjoint(&other.players())
    }
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Competitor::Player(p) => fmt::Display::fmt(p, f),
            Competitor::Team(t) => fmt::Display::fmt(t, f),
        }
    }
}

impl From<Player> for Competitor {
    fn from(p: Player) -> Self {
        Competitor::Player(p)
    }
}

impl From<Team> for Competitor {
    fn from(t: Team) -> Self {
        Competitor::Team(t)
    }
}
