mod combo;
mod donate;
mod introspect;
mod model;
mod params;
mod placement;
mod play;
mod react;
mod risk;
mod tracker;

pub use combo::{ComboCandidate, ComboPlanner};
pub use donate::{DonationPlanner, donation_rank};
pub use introspect::RuntimeIntrospector;
pub use model::OpponentModel;
pub use params::BotParams;
pub use placement::PlacementPlanner;
pub use play::TurnPlanner;
pub use react::ReactPlanner;
pub use risk::{DANGER_THRESHOLD, RiskEstimator, probability_of_losing_draw};
pub use tracker::KnownUpcoming;

use core::fmt;
use core::str::FromStr;
use kittens_core::model::hand::Hand;
use kittens_core::model::player::PlayerId;
use kittens_core::model::view::BotView;

/// How much a bot is allowed to know about its rivals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotVariant {
    /// Only the restricted view and its own foreknowledge.
    #[default]
    Fair,
    /// Fair plus the read-only profile registry.
    OpponentAware,
    /// Opponent-aware plus the authoritative state, when a trusted harness provides it.
    Omniscient,
}

impl BotVariant {
    pub const fn as_str(self) -> &'static str {
        match self {
            BotVariant::Fair => "fair",
            BotVariant::OpponentAware => "aware",
            BotVariant::Omniscient => "omniscient",
        }
    }

    pub const fn uses_profiles(self) -> bool {
        !matches!(self, BotVariant::Fair)
    }
}

impl fmt::Display for BotVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVariantError(String);

impl fmt::Display for ParseVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown bot variant '{}'", self.0)
    }
}

impl std::error::Error for ParseVariantError {}

impl FromStr for BotVariant {
    type Err = ParseVariantError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fair" | "default" => Ok(BotVariant::Fair),
            "aware" | "opponent_aware" | "profiled" => Ok(BotVariant::OpponentAware),
            "omniscient" | "cheat" => Ok(BotVariant::Omniscient),
            other => Err(ParseVariantError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotFeatures {
    variant: BotVariant,
    danger_threshold: f32,
    decision_details: bool,
}

impl BotFeatures {
    pub const fn new(variant: BotVariant, danger_threshold: f32) -> Self {
        Self {
            variant,
            danger_threshold,
            decision_details: false,
        }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub const fn variant(self) -> BotVariant {
        self.variant
    }

    pub const fn danger_threshold(self) -> f32 {
        self.danger_threshold
    }

    pub const fn decision_details(self) -> bool {
        self.decision_details
    }

    pub fn with_variant(mut self, variant: BotVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_decision_details(mut self, enabled: bool) -> Self {
        self.decision_details = enabled;
        self
    }

    pub fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let variant = read("KIT_BOT_VARIANT")
            .and_then(|raw| raw.parse::<BotVariant>().ok())
            .unwrap_or_default();

        let danger_threshold = read("KIT_DANGER_THRESHOLD")
            .and_then(|raw| raw.trim().parse::<f32>().ok())
            .filter(|value| value.is_finite() && *value >= 0.0 && *value <= 1.0)
            .unwrap_or(DANGER_THRESHOLD);

        let decision_details = read("KIT_DECISION_DETAILS")
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
            .unwrap_or(false);

        Self {
            variant,
            danger_threshold,
            decision_details,
        }
    }
}

impl Default for BotFeatures {
    fn default() -> Self {
        Self::new(BotVariant::Fair, DANGER_THRESHOLD)
    }
}

/// Everything a planner may consult for one decision.
#[derive(Debug, Clone, Copy)]
pub struct BotContext<'a> {
    pub view: &'a BotView<'a>,
    pub known: &'a KnownUpcoming,
    pub model: &'a OpponentModel<'a>,
    pub params: &'a BotParams,
    pub features: BotFeatures,
}

impl<'a> BotContext<'a> {
    pub fn new(
        view: &'a BotView<'a>,
        known: &'a KnownUpcoming,
        model: &'a OpponentModel<'a>,
        params: &'a BotParams,
        features: BotFeatures,
    ) -> Self {
        Self {
            view,
            known,
            model,
            params,
            features,
        }
    }

    pub fn hand(&self) -> &'a Hand {
        self.view.my_hand()
    }

    pub fn me(&self) -> &'a PlayerId {
        self.view.my_id()
    }

    pub fn risk(&self) -> RiskEstimator {
        RiskEstimator::new(self.features.danger_threshold())
    }

    pub fn draw_probability(&self) -> f32 {
        self.risk().probability_of_losing_draw(self.view, self.known)
    }

    pub fn is_dangerous_to_draw(&self) -> bool {
        self.risk().is_dangerous(self.view, self.known)
    }
}
