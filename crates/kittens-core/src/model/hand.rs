use crate::model::card::{Card, CardKind};
use std::vec::Vec;

/// Unordered multiset of cards held by one player.
///
/// Insertion order is preserved so that "first card of a kind" lookups are
/// stable between calls; nothing in the policy layer depends on it beyond that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn from_kinds(kinds: &[CardKind]) -> Self {
        Self {
            cards: kinds.iter().copied().map(Card::new).collect(),
        }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn contains_kind(&self, kind: CardKind) -> bool {
        self.cards.iter().any(|card| card.kind == kind)
    }

    pub fn count_kind(&self, kind: CardKind) -> usize {
        self.cards.iter().filter(|card| card.kind == kind).count()
    }

    pub fn find_kind(&self, kind: CardKind) -> Option<Card> {
        self.cards.iter().copied().find(|card| card.kind == kind)
    }

    pub fn has_defuse(&self) -> bool {
        self.contains_kind(CardKind::Defuse)
    }

    /// True when every card in `cards` can be drawn from this hand, respecting multiplicity.
    pub fn contains_all(&self, cards: &[Card]) -> bool {
        let mut remaining = self.cards.clone();
        cards.iter().all(|card| {
            if let Some(index) = remaining.iter().position(|c| c == card) {
                remaining.swap_remove(index);
                true
            } else {
                false
            }
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::{Card, CardKind};

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        let card = Card::new(CardKind::Skip);
        hand.add(card);
        assert!(hand.contains(card));
        assert!(hand.remove(card));
        assert!(!hand.contains(card));
        assert!(!hand.remove(card));
    }

    #[test]
    fn counts_and_lookups_by_kind() {
        let hand = Hand::from_kinds(&[
            CardKind::TacoCat,
            CardKind::Defuse,
            CardKind::TacoCat,
            CardKind::Nope,
        ]);
        assert_eq!(hand.count_kind(CardKind::TacoCat), 2);
        assert_eq!(hand.count_kind(CardKind::Skip), 0);
        assert!(hand.has_defuse());
        assert_eq!(hand.find_kind(CardKind::Nope), Some(Card::new(CardKind::Nope)));
        assert_eq!(hand.find_kind(CardKind::Attack), None);
    }

    #[test]
    fn contains_all_respects_multiplicity() {
        let hand = Hand::from_kinds(&[CardKind::BeardCat, CardKind::BeardCat, CardKind::Skip]);
        let pair = [Card::new(CardKind::BeardCat); 2];
        let triple = [Card::new(CardKind::BeardCat); 3];
        assert!(hand.contains_all(&pair));
        assert!(!hand.contains_all(&triple));
    }
}
