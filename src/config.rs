//! Competition configuration: groups, rosters and the slot calendar.
//!
//! The configuration is plain JSON. A competitor is either a name (singles) or a
//! two-name array (a doubles team):
//!
//! ```json
//! { "name": "Doubles", "competitors": [["Ann", "Bo"], ["Cy", "Di"]] }
//! ```
//!
//! [`CompetitionConfig::build`] validates it and interns every player name into a
//! [`PlayerId`], so the scheduler never compares names.

use crate::models::{Competition, Competitor, ConfigError, Group, Player, PlayerId, Team};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

const EMBEDDED: &str = include_str!("../config/default.json");

/// A match must fit into one day.
pub const MAX_MATCH_MINUTES: i64 = 24 * 60;

/// Upper bound on the enumerated slot pool, and so on the number of matches.
pub const MAX_SLOTS: usize = 100_000;

/// Everything needed to produce a schedule.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CompetitionConfig {
    pub groups: Vec<GroupConfig>,
    pub slots: SlotConfig,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub name: String,
    pub competitors: Vec<CompetitorConfig>,
}

/// `"Name"` for a player, `["Name", "Name"]` for a team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompetitorConfig {
    Player(String),
    Team([String; 2]),
}

/// Calendar, daily windows, match length and courts the slot pool is built from.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub dates: Vec<NaiveDate>,
    pub windows: Vec<WindowConfig>,
    pub match_minutes: i64,
    pub courts: Vec<u32>,
}

/// Daily playing window. `courts` overrides the default court list for this window only.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courts: Option<Vec<u32>>,
}

impl WindowConfig {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            courts: None,
        }
    }

    /// Restrict this window to the given courts.
    pub fn with_courts(mut self, courts: Vec<u32>) -> Self {
        self.courts = Some(courts);
        self
    }
}

impl SlotConfig {
    /// Zero when `match_minutes` is out of range.
    pub fn match_duration(&self) -> Duration {
        Duration::try_minutes(self.match_minutes).unwrap_or_else(Duration::zero)
    }

    /// Courts in use during `window`.
    pub fn courts_for<'a>(&'a self, window: &'a WindowConfig) -> &'a [u32] {
        window.courts.as_deref().unwrap_or(&self.courts)
    }

    /// Reject settings that would put two slots on one court at the same time, or a pool
    /// larger than [`MAX_SLOTS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.match_minutes <= 0 {
            return Err(ConfigError::ZeroMatchDuration);
        }
        if self.match_minutes > MAX_MATCH_MINUTES {
            return Err(ConfigError::MatchTooLong(self.match_minutes));
        }

        let mut dates = HashSet::new();
        for date in &self.dates {
            if !dates.insert(date) {
                return Err(ConfigError::DuplicateDate(date.to_string()));
            }
        }
        check_courts(&self.courts)?;

        for (i, w) in self.windows.iter().enumerate() {
            if w.end <= w.start {
                return Err(ConfigError::EmptyWindow {
                    start: w.start.format("%H:%M").to_string(),
                    end: w.end.format("%H:%M").to_string(),
                });
            }
            if let Some(courts) = &w.courts {
                check_courts(courts)?;
            }
            for other in &self.windows[..i] {
                if other.start < w.end && w.start < other.end {
                    let courts = self.courts_for(other);
                    if let Some(&court) = self.courts_for(w).iter().find(|c| courts.contains(c)) {
                        return Err(ConfigError::OverlappingWindows {
                            first: format_window(other),
                            second: format_window(w),
                            court,
                        });
                    }
                }
            }
        }

        let per_day: usize = self
            .windows
            .iter()
            .map(|w| {
                let starts = (w.end - w.start).num_minutes() / self.match_minutes;
                starts as usize * self.courts_for(w).len()
            })
            .sum();
        let pool = per_day.saturating_mul(self.dates.len());
        if pool > MAX_SLOTS {
            return Err(ConfigError::TooManySlots(pool));
        }
        Ok(())
    }
}

fn check_courts(courts: &[u32]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for &court in courts {
        if !seen.insert(court) {
            return Err(ConfigError::DuplicateCourt(court));
        }
    }
    Ok(())
}

fn format_window(w: &WindowConfig) -> String {
    format!("{}-{}", w.start.format("%H:%M"), w.end.format("%H:%M"))
}

impl CompetitionConfig {
    /// The configuration compiled into the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(EMBEDDED)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Validate and intern players. The same name (ignoring case and extra whitespace)
    /// in several groups or teams is the same player.
    pub fn build(&self) -> Result<Competition, ConfigError> {
        self.slots.validate()?;

        let mut roster = Roster::default();
        let mut group_names = HashSet::new();
        let mut groups = Vec::with_capacity(self.groups.len());

        for g in &self.groups {
            let name = normalize_name(&g.name);
            if name.is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if !group_names.insert(name.to_lowercase()) {
                return Err(ConfigError::DuplicateGroup(name));
            }

            let mut competitors: Vec<Competitor> = Vec::with_capacity(g.competitors.len());
            for c in &g.competitors {
                let competitor = match c {
                    CompetitorConfig::Player(n) => Competitor::Player(roster.intern(n)?),
                    CompetitorConfig::Team([a, b]) => {
                        Competitor::Team(Team::new(roster.intern(a)?, roster.intern(b)?)?)
                    }
                };
                if let Some(existing) = competitors.iter().find(|e| !e.is_disjoint(&competitor)) {
                    let shared = existing.players();
                    let player = competitor
                        .players()
                        .into_iter()
                        .find(|id| shared.contains(id))
                        .map(|id| roster.name(id).to_string())
                        .unwrap_or_else(|| competitor.to_string());
                    return Err(ConfigError::PlayerTwiceInGroup {
                        group: name,
                        player,
                    });
                }
                competitors.push(competitor);
            }
            groups.push(Group::new(name, competitors));
        }

        let matches: usize = groups
            .iter()
            .map(|g| g.competitors.len() * g.competitors.len().saturating_sub(1) / 2)
            .sum();
        if matches > MAX_SLOTS {
            return Err(ConfigError::TooManyMatches(matches));
        }

        log::debug!(
            "Built competition: {} players in {} groups",
            roster.players.len(),
            groups.len()
        );
        Ok(Competition {
            players: roster.players,
            groups,
            slots: self.slots.clone(),
        })
    }
}

/// Trim and collapse inner whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Name-to-id table; ids are handed out in first-seen order.
#[derive(Default)]
struct Roster {
    players: Vec<Player>,
    by_key: HashMap<String, PlayerId>,
}

impl Roster {
    fn intern(&mut self, raw: &str) -> Result<Player, ConfigError> {
        let name = normalize_name(raw);
        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        let key = name.to_lowercase();
        if let Some(id) = self.by_key.get(&key) {
            return Ok(self.players[id.0 as usize].clone());
        }
        let id = PlayerId(self.players.len() as u32);
        let player = Player::new(id, name);
        self.by_key.insert(key, id);
        self.players.push(player.clone());
        Ok(player)
    }

    fn name(&self, id: PlayerId) -> &str {
        &self.players[id.0 as usize].name
    }
}
