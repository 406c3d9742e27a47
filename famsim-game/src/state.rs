use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Job title the engine uses for a player without employment.
pub const JOB_UNEMPLOYED: &str = "无业";
/// Relationship status for a player who is dating someone.
pub const RELATIONSHIP_DATING: &str = "恋爱中";
/// Relationship status for a single player.
pub const RELATIONSHIP_SINGLE: &str = "单身";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Season {
    #[default]
    #[serde(rename = "春季", alias = "spring")]
    Spring,
    #[serde(rename = "夏季", alias = "summer")]
    Summer,
    #[serde(rename = "秋季", alias = "autumn")]
    Autumn,
    #[serde(rename = "冬季", alias = "winter")]
    Winter,
}

impl Season {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }

    #[must_use]
    pub fn i18n_key(self) -> String {
        format!("season.{}", self.as_str())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EconomyStatus {
    #[serde(rename = "繁荣", alias = "boom")]
    Boom,
    #[default]
    #[serde(rename = "正常", alias = "normal")]
    Normal,
    #[serde(rename = "衰退", alias = "recession")]
    Recession,
}

impl EconomyStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boom => "boom",
            Self::Normal => "normal",
            Self::Recession => "recession",
        }
    }

    #[must_use]
    pub fn i18n_key(self) -> String {
        format!("economy.{}", self.as_str())
    }
}

impl fmt::Display for EconomyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the engine's event log, e.g. `{"date": "第3天", "event": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub event: String,
}

/// Business owned by the player, present only when `has_business` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Business {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub scale: f64,
    #[serde(default)]
    pub profit: f64,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub employees: u32,
    #[serde(default)]
    pub reputation: f64,
}

/// Name-keyed summary of the player's spouse. The name is a lookup key into
/// the family list, not an owned link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SpouseSummary {
    pub name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub job: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age: u32,

    // Gauges, nominally within [0, 100].
    #[serde(default)]
    pub health: f64,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub appearance: f64,
    #[serde(default)]
    pub charm: f64,
    #[serde(default)]
    pub intelligence: f64,
    #[serde(default)]
    pub emotional_intelligence: f64,
    #[serde(default)]
    pub financial_intelligence: f64,
    #[serde(default)]
    pub luck: f64,
    #[serde(default)]
    pub happiness: f64,
    #[serde(default)]
    pub stress_level: f64,

    #[serde(default = "default_job")]
    pub job: String,
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub assets: f64,
    #[serde(default)]
    pub debt: f64,
    #[serde(default)]
    pub education_level: String,
    #[serde(default)]
    pub relationship_status: String,
    #[serde(default)]
    pub mental_state: String,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub weight_status: String,

    #[serde(default)]
    pub has_business: bool,
    #[serde(default)]
    pub business: Option<Business>,
    #[serde(default)]
    pub investments: BTreeMap<String, f64>,
    #[serde(default)]
    pub network: BTreeMap<String, f64>,
    #[serde(default)]
    pub spouse: Option<SpouseSummary>,
    #[serde(default)]
    pub parents: Vec<String>,
}

fn default_job() -> String {
    JOB_UNEMPLOYED.to_string()
}

impl Player {
    #[must_use]
    pub fn is_unemployed(&self) -> bool {
        self.job == JOB_UNEMPLOYED
    }

    /// The engine reports business ownership with a flag and, separately, the
    /// business record; either one counts.
    #[must_use]
    pub const fn owns_business(&self) -> bool {
        self.has_business || self.business.is_some()
    }

    #[must_use]
    pub fn spouse_name(&self) -> Option<&str> {
        self.spouse.as_ref().map(|s| s.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FamilyMember {
    pub name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub parents: Option<Vec<String>>,
}

/// Authoritative snapshot received from the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default = "first_day")]
    pub current_day: u32,
    #[serde(default)]
    pub current_season: Season,
    #[serde(default)]
    pub economy_status: EconomyStatus,
    #[serde(default)]
    pub family_fortune: f64,
    #[serde(default)]
    pub family_prestige: f64,
    #[serde(default)]
    pub events: Vec<EventRecord>,
    #[serde(default)]
    pub family_members: Vec<FamilyMember>,
    #[serde(default)]
    pub player: Option<Player>,
}

const fn first_day() -> u32 {
    1
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            current_day: first_day(),
            current_season: Season::default(),
            economy_status: EconomyStatus::default(),
            family_fortune: 0.0,
            family_prestige: 0.0,
            events: Vec::new(),
            family_members: Vec::new(),
            player: None,
        }
    }
}

impl GameState {
    #[must_use]
    pub const fn has_player(&self) -> bool {
        self.player.is_some()
    }

    /// Parse a snapshot from the engine's JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a game state.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl FromStr for GameState {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}
