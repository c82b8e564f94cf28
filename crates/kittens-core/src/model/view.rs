//! The restricted, per-decision view the engine hands to a bot.

use crate::model::hand::Hand;
use crate::model::player::PlayerId;
use core::fmt;
use std::cell::RefCell;
use std::collections::HashMap;

/// Fire-and-forget channel for cosmetic table talk.
pub trait ChatSink {
    fn say(&self, speaker: &PlayerId, message: &str);
}

/// Sink that keeps every line in memory; handy for harnesses and tests.
#[derive(Debug, Default)]
pub struct ChatLog {
    lines: RefCell<Vec<(PlayerId, String)>>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(PlayerId, String)> {
        self.lines.borrow().clone()
    }
}

impl ChatSink for ChatLog {
    fn say(&self, speaker: &PlayerId, message: &str) {
        self.lines
            .borrow_mut()
            .push((speaker.clone(), message.to_string()));
    }
}

/// Everything a bot may legitimately know at a decision point.
///
/// Rivals are listed in turn order starting with the player who acts after us.
/// Only their card counts are exposed, never their contents.
#[derive(Clone)]
pub struct BotView<'a> {
    my_id: PlayerId,
    my_hand: Hand,
    other_players: Vec<PlayerId>,
    other_card_counts: HashMap<PlayerId, usize>,
    draw_pile_count: usize,
    chat: Option<&'a dyn ChatSink>,
}

impl<'a> BotView<'a> {
    pub fn new(my_id: impl Into<PlayerId>, my_hand: Hand, draw_pile_count: usize) -> Self {
        Self {
            my_id: my_id.into(),
            my_hand,
            other_players: Vec::new(),
            other_card_counts: HashMap::new(),
            draw_pile_count,
            chat: None,
        }
    }

    /// Appends a rival in turn order. Re-adding an id only updates its count.
    pub fn with_rival(mut self, id: impl Into<PlayerId>, card_count: usize) -> Self {
        let id = id.into();
        if !self.other_card_counts.contains_key(&id) {
            self.other_players.push(id.clone());
        }
        self.other_card_counts.insert(id, card_count);
        self
    }

    pub fn with_chat(mut self, chat: &'a dyn ChatSink) -> Self {
        self.chat = Some(chat);
        self
    }

    pub fn my_id(&self) -> &PlayerId {
        &self.my_id
    }

    pub fn my_hand(&self) -> &Hand {
        &self.my_hand
    }

    pub fn other_players(&self) -> &[PlayerId] {
        &self.other_players
    }

    pub fn card_count(&self, player: &PlayerId) -> Option<usize> {
        self.other_card_counts.get(player).copied()
    }

    pub fn is_rival(&self, player: &PlayerId) -> bool {
        self.other_card_counts.contains_key(player)
    }

    pub fn draw_pile_count(&self) -> usize {
        self.draw_pile_count
    }

    /// Rivals plus ourselves.
    pub fn active_player_count(&self) -> usize {
        self.other_players.len() + 1
    }

    pub fn say(&self, message: &str) {
        if let Some(chat) = self.chat {
            chat.say(&self.my_id, message);
        }
    }
}

impl fmt::Debug for BotView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotView")
            .field("my_id", &self.my_id)
            .field("my_hand", &self.my_hand)
            .field("other_players", &self.other_players)
            .field("other_card_counts", &self.other_card_counts)
            .field("draw_pile_count", &self.draw_pile_count)
            .field("chat", &self.chat.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::card::CardKind;

    #[test]
    fn rivals_keep_turn_order_and_counts() {
        let view = BotView::new("me", Hand::new(), 12)
            .with_rival("left", 4)
            .with_rival("across", 7)
            .with_rival("left", 5);
        let ids: Vec<&str> = view.other_players().iter().map(PlayerId::as_str).collect();
        assert_eq!(ids, vec!["left", "across"]);
        assert_eq!(view.card_count(&PlayerId::new("left")), Some(5));
        assert_eq!(view.card_count(&PlayerId::new("me")), None);
        assert_eq!(view.active_player_count(), 3);
    }

    #[test]
    fn say_routes_to_chat_sink() {
        let log = ChatLog::new();
        let view = BotView::new("me", Hand::from_kinds(&[CardKind::Skip]), 3).with_chat(&log);
        view.say("hello");
        assert_eq!(log.lines(), vec![(PlayerId::new("me"), "hello".to_string())]);
    }

    #[test]
    fn say_without_sink_is_silent() {
        let view = BotView::new("me", Hand::new(), 0);
        view.say("nobody hears this");
    }
}
