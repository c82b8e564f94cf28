use kittens_core::model::card::CardKind;
use kittens_core::model::event::{EventKind, GameEvent};
use kittens_core::model::player::PlayerId;
use std::collections::VecDeque;
use tracing::{Level, event};

/// Cards we believe sit on top of the draw pile, front first.
///
/// Never longer than what was actually revealed; cleared on any shuffle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownUpcoming {
    cards: VecDeque<CardKind>,
}

impl KnownUpcoming {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_kinds(kinds: impl IntoIterator<Item = CardKind>) -> Self {
        Self {
            cards: kinds.into_iter().collect(),
        }
    }

    pub fn record_peek(&mut self, revealed: &[CardKind]) {
        self.cards = revealed.iter().copied().collect();
    }

    pub fn note_draw(&mut self) {
        self.cards.pop_front();
    }

    pub fn note_shuffle(&mut self) {
        self.cards.clear();
    }

    /// We put a kitten back ourselves. Depths up to the end of the known
    /// prefix stay contiguous, so the kitten joins the queue; deeper ones are lost.
    pub fn note_own_insert(&mut self, depth: usize) {
        if depth <= self.cards.len() {
            self.cards.insert(depth, CardKind::ExplodingKitten);
        }
    }

    /// Someone else hid a kitten at an unknown depth.
    pub fn note_foreign_insert(&mut self) {
        self.cards.clear();
    }

    pub fn observe(&mut self, game_event: &GameEvent, me: &PlayerId) {
        let before = self.cards.len();
        match game_event.kind {
            EventKind::BotChat => return,
            EventKind::DeckShuffled => self.note_shuffle(),
            EventKind::CardDrawn => self.note_draw(),
            EventKind::FutureSeen => {
                if game_event.player().is_none_or(|player| player == me) {
                    self.record_peek(&game_event.data.revealed);
                }
            }
            EventKind::KittenInserted => {
                if game_event.is_by(me) {
                    if let Some(depth) = game_event.data.position {
                        self.note_own_insert(depth);
                    }
                } else {
                    self.note_foreign_insert();
                }
            }
            EventKind::CardPlayed | EventKind::ComboPlayed | EventKind::PlayerExploded => {}
        }
        if before != self.cards.len() {
            event!(
                target: "kittens_bot::tracker",
                Level::DEBUG,
                me = %me,
                event = ?game_event.kind,
                before,
                after = self.cards.len(),
            );
        }
    }

    pub fn front(&self) -> Option<CardKind> {
        self.cards.front().copied()
    }

    pub fn next_is_kitten(&self) -> bool {
        self.front() == Some(CardKind::ExplodingKitten)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardKind> {
        self.cards.iter()
    }

    pub fn to_vec(&self) -> Vec<CardKind> {
        self.cards.iter().copied().collect()
    }
}
