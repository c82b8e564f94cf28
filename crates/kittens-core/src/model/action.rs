use crate::model::card::{Card, CardKind};
use crate::model::player::PlayerId;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComboKind {
    /// Two of a kind: blind steal from a rival.
    Pair,
    /// Three of a kind: name a card a rival must hand over.
    Triple,
    /// Five distinct kinds: take a named card from the discard pile.
    FiveDistinct,
}

impl ComboKind {
    pub const fn size(self) -> usize {
        match self {
            ComboKind::Pair => 2,
            ComboKind::Triple => 3,
            ComboKind::FiveDistinct => 5,
        }
    }

    pub const fn needs_target(self) -> bool {
        !matches!(self, ComboKind::FiveDistinct)
    }

    pub const fn from_size(size: usize) -> Option<Self> {
        match size {
            2 => Some(ComboKind::Pair),
            3 => Some(ComboKind::Triple),
            5 => Some(ComboKind::FiveDistinct),
            _ => None,
        }
    }
}

/// The single intent a bot returns for the engine to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Draw,
    PlayCard {
        card: Card,
        target: Option<PlayerId>,
        requested_kind: Option<CardKind>,
    },
    PlayCombo {
        cards: Vec<Card>,
        target: Option<PlayerId>,
        requested_kind: Option<CardKind>,
    },
}

impl Action {
    pub fn play(card: Card) -> Self {
        Action::PlayCard {
            card,
            target: None,
            requested_kind: None,
        }
    }

    pub fn play_at(card: Card, target: PlayerId) -> Self {
        Action::PlayCard {
            card,
            target: Some(target),
            requested_kind: None,
        }
    }

    pub fn target(&self) -> Option<&PlayerId> {
        match self {
            Action::Draw => None,
            Action::PlayCard { target, .. } | Action::PlayCombo { target, .. } => target.as_ref(),
        }
    }

    /// Cards this action takes out of the acting player's hand.
    pub fn cards(&self) -> &[Card] {
        match self {
            Action::Draw => &[],
            Action::PlayCard { card, .. } => std::slice::from_ref(card),
            Action::PlayCombo { cards, .. } => cards,
        }
    }

    pub fn combo_kind(&self) -> Option<ComboKind> {
        match self {
            Action::PlayCombo { cards, .. } => ComboKind::from_size(cards.len()),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Draw => f.write_str("draw"),
            Action::PlayCard { card, target, .. } => match target {
                Some(target) => write!(f, "play {card} at {target}"),
                None => write!(f, "play {card}"),
            },
            Action::PlayCombo { cards, target, .. } => {
                write!(f, "combo x{}", cards.len())?;
                if let Some(target) = target {
                    write!(f, " at {target}")?;
                }
                Ok(())
            }
        }
    }
}
