//! Replays a described decision point through a freshly built bot.
//!
//! A scenario names the acting player, their hand, the visible table and the
//! events seen so far. An optional `full_state` block is the only source of
//! authoritative information; it reaches the bot through a [`StateProbe`]
//! and only when the config grants `trusted_debug_access`.

use crate::config::{BenchConfig, ConfigError, ValidationError};
use kittens_bot::{Bot, StrategyBot};
use kittens_core::game::{FullState, SharedState};
use kittens_core::model::action::Action;
use kittens_core::model::card::{Card, CardKind};
use kittens_core::model::event::GameEvent;
use kittens_core::model::hand::Hand;
use kittens_core::model::player::PlayerId;
use kittens_core::model::view::{BotView, ChatLog};
use kittens_core::profile::ProfileRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{Level, event};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Scenario {
    #[serde(default = "default_me")]
    pub me: PlayerId,
    #[serde(default)]
    pub hand: Vec<CardKind>,
    pub draw_pile: usize,
    pub rivals: Vec<RivalSeat>,
    /// Replayed through `on_event` before the decision, in order.
    #[serde(default)]
    pub events: Vec<GameEvent>,
    pub decision: DecisionPoint,
    #[serde(default)]
    pub full_state: Option<FullState>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RivalSeat {
    pub id: PlayerId,
    pub cards: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionPoint {
    Turn,
    React { trigger: GameEvent },
    Placement {
        #[serde(default)]
        pile_size: Option<usize>,
    },
    Donate { requester: PlayerId },
    Explode,
}

/// The bot's answer, tagged by decision point.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Turn { action: Action },
    React { action: Option<Action> },
    Placement { depth: usize },
    Donate { card: Option<Card> },
    Explode { chat: Vec<String> },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DecisionReport {
    pub run_id: String,
    pub bot: String,
    pub variant: String,
    pub known_upcoming: Vec<CardKind>,
    #[serde(flatten)]
    pub decision: Decision,
}

fn default_me() -> PlayerId {
    PlayerId::new("me")
}

impl Scenario {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let scenario: Scenario =
            serde_yaml::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        scenario.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.rivals.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "rivals".to_string(),
                message: "at least one rival must be seated".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for rival in &self.rivals {
            if rival.id == self.me {
                return Err(ValidationError::InvalidField {
                    field: "rivals".to_string(),
                    message: format!("'{}' cannot be their own rival", rival.id),
                });
            }
            if !seen.insert(&rival.id) {
                return Err(ValidationError::InvalidField {
                    field: "rivals".to_string(),
                    message: format!("rival '{}' seated more than once", rival.id),
                });
            }
        }

        if let DecisionPoint::Donate { requester } = &self.decision {
            if !seen.contains(requester) {
                return Err(ValidationError::InvalidField {
                    field: "decision.requester".to_string(),
                    message: format!("requester '{requester}' is not seated"),
                });
            }
        }
        Ok(())
    }

    fn view<'a>(&self, chat: &'a ChatLog) -> BotView<'a> {
        self.rivals.iter().fold(
            BotView::new(self.me.clone(), Hand::from_kinds(&self.hand), self.draw_pile)
                .with_chat(chat),
            |view, rival| view.with_rival(rival.id.clone(), rival.cards),
        )
    }
}

/// Builds the configured bot and asks it for one decision.
pub fn run_scenario(
    config: &BenchConfig,
    profiles: ProfileRegistry,
    scenario: &Scenario,
) -> DecisionReport {
    let bot_config = &config.bot;
    let features = bot_config.features(config.logging.decision_details);
    let mut bot = StrategyBot::new(features, bot_config.bot_params(), bot_config.seed)
        .with_name(format!("{}-{}", config.run_id, features.variant()))
        .with_profiles(profiles);
    if let Some(state) = scenario.full_state.clone() {
        bot = bot.with_state_probe(
            bot_config.trusted_debug_access,
            Box::new(SharedState::new(state)),
        );
    }

    let chat = ChatLog::new();
    let view = scenario.view(&chat);
    for game_event in &scenario.events {
        bot.on_event(game_event, &view);
    }

    let decision = match &scenario.decision {
        DecisionPoint::Turn => Decision::Turn {
            action: bot.take_turn(&view),
        },
        DecisionPoint::React { trigger } => Decision::React {
            action: bot.react(&view, trigger),
        },
        DecisionPoint::Placement { pile_size } => Decision::Placement {
            depth: bot.choose_defuse_position(&view, pile_size.unwrap_or(scenario.draw_pile)),
        },
        DecisionPoint::Donate { requester } => Decision::Donate {
            card: bot.choose_card_to_give(&view, requester),
        },
        DecisionPoint::Explode => {
            bot.on_explode(&view);
            Decision::Explode {
                chat: chat.lines().into_iter().map(|(_, line)| line).collect(),
            }
        }
    };

    event!(
        target: "kittens_bench::scenario",
        Level::INFO,
        run_id = %config.run_id,
        bot = bot.name(),
        events = scenario.events.len(),
        omniscient_input = scenario.full_state.is_some(),
        "scenario decided",
    );

    DecisionReport {
        run_id: config.run_id.clone(),
        bot: bot.name().to_string(),
        variant: bot.effective_variant().to_string(),
        known_upcoming: bot.known().to_vec(),
        decision,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> BenchConfig {
        let mut cfg: BenchConfig = serde_yaml::from_str(yaml).expect("parse config");
        cfg.validate().expect("validate config");
        cfg
    }

    const TURN: &str = r#"
hand: [skip]
draw_pile: 10
rivals:
  - id: rival
    cards: 5
events:
  - kind: future_seen
    data:
      player_id: me
      revealed: [exploding_kitten, nope, favor]
decision:
  kind: turn
"#;

    #[test]
    fn replayed_peek_drives_the_turn() {
        let scenario: Scenario = serde_yaml::from_str(TURN).expect("parse scenario");
        scenario.validate().expect("valid scenario");
        let report = run_scenario(&config("run_id: peek\n"), ProfileRegistry::new(), &scenario);

        assert_eq!(report.variant, "fair");
        assert_eq!(
            report.known_upcoming,
            vec![CardKind::ExplodingKitten, CardKind::Nope, CardKind::Favor]
        );
        assert_eq!(
            report.decision,
            Decision::Turn {
                action: Action::play(Card::new(CardKind::Skip))
            }
        );
    }

    #[test]
    fn report_serializes_flat() {
        let scenario: Scenario = serde_yaml::from_str(TURN).expect("parse scenario");
        let report = run_scenario(&config("run_id: flat\n"), ProfileRegistry::new(), &scenario);
        let json = serde_json::to_value(&report).expect("json");
        assert_eq!(json["decision"], "turn");
        assert_eq!(json["action"]["action"], "play_card");
        assert_eq!(json["action"]["card"]["kind"], "skip");
        assert_eq!(json["run_id"], "flat");
    }

    #[test]
    fn rejects_requester_outside_the_table() {
        let yaml = TURN.replace("  kind: turn", "  kind: donate\n  requester: ghost");
        let scenario: Scenario = serde_yaml::from_str(&yaml).expect("parse scenario");
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn rejects_self_as_rival() {
        let yaml = TURN.replace("id: rival", "id: me");
        let scenario: Scenario = serde_yaml::from_str(&yaml).expect("parse scenario");
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn explode_reports_the_chat_line() {
        let yaml = TURN.replace("  kind: turn", "  kind: explode");
        let scenario: Scenario = serde_yaml::from_str(&yaml).expect("parse scenario");
        let report = run_scenario(&config("run_id: boom\n"), ProfileRegistry::new(), &scenario);
        match report.decision {
            Decision::Explode { chat } => assert_eq!(chat.len(), 1),
            other => panic!("unexpected decision {other:?}"),
        }
    }
}
