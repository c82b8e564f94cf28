use crate::model::card::CardKind;
use crate::model::player::PlayerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    CardDrawn,
    DeckShuffled,
    BotChat,
    CardPlayed,
    ComboPlayed,
    FutureSeen,
    KittenInserted,
    PlayerExploded,
}

/// Typed event data. Fields that do not apply to an event kind stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub card_kind: Option<CardKind>,
    #[serde(default)]
    pub target_player_id: Option<PlayerId>,
    #[serde(default)]
    pub combo_size: Option<usize>,
    /// Top of the draw pile, front first. Only set on `FutureSeen`.
    #[serde(default)]
    pub revealed: Vec<CardKind>,
    /// Insertion depth. Only the inserting player's own notification carries it.
    #[serde(default)]
    pub position: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    #[serde(default)]
    pub data: EventPayload,
}

impl GameEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            data: EventPayload::default(),
        }
    }

    pub fn card_drawn(player: impl Into<PlayerId>) -> Self {
        Self::new(EventKind::CardDrawn).by(player)
    }

    pub fn deck_shuffled() -> Self {
        Self::new(EventKind::DeckShuffled)
    }

    pub fn card_played(player: impl Into<PlayerId>, kind: CardKind) -> Self {
        let mut event = Self::new(EventKind::CardPlayed).by(player);
        event.data.card_kind = Some(kind);
        event
    }

    pub fn combo_played(player: impl Into<PlayerId>, size: usize) -> Self {
        let mut event = Self::new(EventKind::ComboPlayed).by(player);
        event.data.combo_size = Some(size);
        event
    }

    pub fn future_seen(player: impl Into<PlayerId>, revealed: Vec<CardKind>) -> Self {
        let mut event = Self::new(EventKind::FutureSeen).by(player);
        event.data.revealed = revealed;
        event
    }

    pub fn kitten_inserted(player: impl Into<PlayerId>, position: Option<usize>) -> Self {
        let mut event = Self::new(EventKind::KittenInserted).by(player);
        event.data.position = position;
        event
    }

    pub fn by(mut self, player: impl Into<PlayerId>) -> Self {
        self.data.player_id = Some(player.into());
        self
    }

    pub fn targeting(mut self, target: impl Into<PlayerId>) -> Self {
        self.data.target_player_id = Some(target.into());
        self
    }

    pub fn player(&self) -> Option<&PlayerId> {
        self.data.player_id.as_ref()
    }

    pub fn target(&self) -> Option<&PlayerId> {
        self.data.target_player_id.as_ref()
    }

    pub fn targets(&self, player: &PlayerId) -> bool {
        self.target() == Some(player)
    }

    pub fn is_by(&self, player: &PlayerId) -> bool {
        self.player() == Some(player)
    }
}
