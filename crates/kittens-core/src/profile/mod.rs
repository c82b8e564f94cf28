//! Behavioural profiles of rival bots.
//!
//! Profiles are produced offline (see [`analyzer`]) or written by hand and
//! loaded as a registry; the decision path only ever reads them.

pub mod analyzer;

pub use analyzer::analyze_source;

use crate::model::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_VETO_CHANCE: f32 = 0.5;
pub const DEFAULT_COMBO_CHANCE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProfileRecord", into = "ProfileRecord")]
pub struct OpponentProfile {
    veto_chance: f32,
    combo_chance: f32,
    aggression: f32,
}

impl OpponentProfile {
    pub fn new(veto_chance: f32, combo_chance: f32) -> Self {
        let veto_chance = sanitize(veto_chance, DEFAULT_VETO_CHANCE);
        let combo_chance = sanitize(combo_chance, DEFAULT_COMBO_CHANCE);
        Self {
            veto_chance,
            combo_chance,
            aggression: ((veto_chance + combo_chance) / 2.0).clamp(0.0, 1.0),
        }
    }

    pub fn veto_chance(&self) -> f32 {
        self.veto_chance
    }

    pub fn combo_chance(&self) -> f32 {
        self.combo_chance
    }

    pub fn aggression(&self) -> f32 {
        self.aggression
    }
}

impl Default for OpponentProfile {
    fn default() -> Self {
        Self::new(DEFAULT_VETO_CHANCE, DEFAULT_COMBO_CHANCE)
    }
}

fn sanitize(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

/// On-disk shape; aggression is derived, so it is written but never trusted on read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ProfileRecord {
    #[serde(default = "default_veto")]
    veto_chance: f32,
    #[serde(default = "default_combo")]
    combo_chance: f32,
    #[serde(default, skip_deserializing)]
    aggression: f32,
}

fn default_veto() -> f32 {
    DEFAULT_VETO_CHANCE
}

fn default_combo() -> f32 {
    DEFAULT_COMBO_CHANCE
}

impl From<ProfileRecord> for OpponentProfile {
    fn from(record: ProfileRecord) -> Self {
        OpponentProfile::new(record.veto_chance, record.combo_chance)
    }
}

impl From<OpponentProfile> for ProfileRecord {
    fn from(profile: OpponentProfile) -> Self {
        ProfileRecord {
            veto_chance: profile.veto_chance,
            combo_chance: profile.combo_chance,
            aggression: profile.aggression,
        }
    }
}

/// Rival id to profile. Unknown rivals read as the neutral default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileRegistry {
    profiles: BTreeMap<PlayerId, OpponentProfile>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, player: PlayerId, profile: OpponentProfile) {
        self.profiles.insert(player, profile);
    }

    pub fn get(&self, player: &PlayerId) -> Option<&OpponentProfile> {
        self.profiles.get(player)
    }

    pub fn profile_or_default(&self, player: &PlayerId) -> OpponentProfile {
        self.get(player).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &OpponentProfile)> {
        self.profiles.iter()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
