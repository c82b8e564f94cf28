//! Authoritative game state, exposed only through an explicit harness capability.
//!
//! Production engine wiring never hands a [`StateProbe`] to a bot. Simulation
//! and test harnesses may, to exercise the omniscient bot variant.

use crate::model::card::CardKind;
use crate::model::player::PlayerId;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Defuses in a box; one is dealt per player and up to two spares go back in the pile.
const DEFUSE_TOTAL: usize = 6;
const STARTING_HAND_SIZE: usize = 7;

/// Everything else in the box.
const PLAYABLE_COUNTS: [(CardKind, usize); 11] = [
    (CardKind::Attack, 4),
    (CardKind::Skip, 4),
    (CardKind::Favor, 4),
    (CardKind::Nope, 5),
    (CardKind::Shuffle, 4),
    (CardKind::SeeTheFuture, 5),
    (CardKind::TacoCat, 4),
    (CardKind::BeardCat, 4),
    (CardKind::RainbowRalphingCat, 4),
    (CardKind::HairyPotatoCat, 4),
    (CardKind::Cattermelon, 4),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullState {
    /// Front is the next card to be drawn.
    pub draw_pile: Vec<CardKind>,
    #[serde(default)]
    pub discard_pile: Vec<CardKind>,
    pub hands: BTreeMap<PlayerId, Vec<CardKind>>,
}

impl FullState {
    /// Deals a fresh game: seven cards plus one defuse each, then one kitten
    /// per player minus one and the spare defuses are shuffled into the pile.
    pub fn deal(players: &[PlayerId], seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pile: Vec<CardKind> = PLAYABLE_COUNTS
            .iter()
            .flat_map(|&(kind, count)| std::iter::repeat_n(kind, count))
            .collect();
        pile.shuffle(&mut rng);

        let mut hands = BTreeMap::new();
        for player in players {
            let take = STARTING_HAND_SIZE.min(pile.len());
            let mut hand: Vec<CardKind> = pile.drain(..take).collect();
            hand.push(CardKind::Defuse);
            hands.insert(player.clone(), hand);
        }

        let kittens = players.len().saturating_sub(1);
        let spare_defuses = DEFUSE_TOTAL.saturating_sub(players.len()).min(2);
        pile.extend(std::iter::repeat_n(CardKind::ExplodingKitten, kittens));
        pile.extend(std::iter::repeat_n(CardKind::Defuse, spare_defuses));
        pile.shuffle(&mut rng);

        Self {
            draw_pile: pile,
            discard_pile: Vec::new(),
            hands,
        }
    }

    pub fn hand_of(&self, player: &PlayerId) -> Option<&[CardKind]> {
        self.hands.get(player).map(Vec::as_slice)
    }

    /// `None` when the player is unknown to this snapshot.
    pub fn holds(&self, player: &PlayerId, kind: CardKind) -> Option<bool> {
        self.hand_of(player).map(|hand| hand.contains(&kind))
    }

    pub fn kittens_in_pile(&self) -> usize {
        self.draw_pile
            .iter()
            .filter(|kind| **kind == CardKind::ExplodingKitten)
            .count()
    }
}

/// Read access to the authoritative state.
pub trait StateProbe: Send + Sync {
    /// Stamp that changes whenever the state mutates; cheap to query.
    fn generation(&self) -> Option<u64>;

    fn snapshot(&self) -> Option<FullState>;
}

/// Harness-side state cell. Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<RwLock<(u64, FullState)>>,
}

impl SharedState {
    pub fn new(state: FullState) -> Self {
        Self {
            inner: Arc::new(RwLock::new((0, state))),
        }
    }

    /// Applies `mutate` and bumps the generation. Returns false if the lock is poisoned.
    pub fn update<F>(&self, mutate: F) -> bool
    where
        F: FnOnce(&mut FullState),
    {
        match self.inner.write() {
            Ok(mut guard) => {
                guard.0 = guard.0.wrapping_add(1);
                mutate(&mut guard.1);
                true
            }
            Err(_) => false,
        }
    }
}

impl StateProbe for SharedState {
    fn generation(&self) -> Option<u64> {
        self.inner.read().ok().map(|guard| guard.0)
    }

    fn snapshot(&self) -> Option<FullState> {
        self.inner.read().ok().map(|guard| guard.1.clone())
    }
}
