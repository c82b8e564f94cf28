use kittens_core::model::action::ComboKind;
use kittens_core::model::card::{Card, CardKind};
use kittens_core::model::hand::Hand;
use std::collections::BTreeMap;

const FIVE_DISTINCT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboCandidate {
    pub kind: ComboKind,
    pub cards: Vec<Card>,
}

/// Finds playable combos. Deciding whether one is worth playing is the turn planner's job.
pub struct ComboPlanner;

impl ComboPlanner {
    pub fn find(hand: &Hand) -> Option<ComboCandidate> {
        Self::find_all(hand).into_iter().next()
    }

    /// Triples first, then pairs, then the five-distinct set; kinds in enum order.
    pub fn find_all(hand: &Hand) -> Vec<ComboCandidate> {
        let by_kind = group_by_kind(hand);
        let mut candidates = Vec::new();

        for cards in by_kind.values() {
            if cards.len() >= ComboKind::Triple.size() {
                candidates.push(ComboCandidate {
                    kind: ComboKind::Triple,
                    cards: cards[..3].to_vec(),
                });
            }
        }

        for cards in by_kind.values() {
            if cards.len() >= ComboKind::Pair.size() {
                candidates.push(ComboCandidate {
                    kind: ComboKind::Pair,
                    cards: cards[..2].to_vec(),
                });
            }
        }

        if by_kind.len() >= FIVE_DISTINCT {
            candidates.push(ComboCandidate {
                kind: ComboKind::FiveDistinct,
                cards: by_kind
                    .values()
                    .take(FIVE_DISTINCT)
                    .map(|cards| cards[0])
                    .collect(),
            });
        }

        candidates
    }
}

fn group_by_kind(hand: &Hand) -> BTreeMap<CardKind, Vec<Card>> {
    let mut by_kind: BTreeMap<CardKind, Vec<Card>> = BTreeMap::new();
    for card in hand.iter().filter(|card| card.can_combo) {
        by_kind.entry(card.kind).or_default().push(*card);
    }
    by_kind
}
