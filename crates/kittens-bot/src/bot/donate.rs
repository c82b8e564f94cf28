use kittens_core::model::card::{Card, CardKind};
use kittens_core::model::hand::Hand;

/// Lower ranks are handed over first.
pub const fn donation_rank(kind: CardKind) -> u8 {
    match kind {
        CardKind::TacoCat
        | CardKind::BeardCat
        | CardKind::RainbowRalphingCat
        | CardKind::HairyPotatoCat
        | CardKind::Cattermelon => 1,
        CardKind::Skip | CardKind::Shuffle => 2,
        CardKind::SeeTheFuture => 3,
        CardKind::Attack => 4,
        CardKind::Favor => 5,
        CardKind::Nope => 6,
        CardKind::ExplodingKitten => 50,
        CardKind::Defuse => 100,
    }
}

/// Picks the card to surrender to a favor.
pub struct DonationPlanner;

impl DonationPlanner {
    pub fn choose(hand: &Hand) -> Option<Card> {
        let mut ranked: Vec<Card> = hand.cards().to_vec();
        ranked.sort_by_key(|card| donation_rank(card.kind));

        let keeps_combo = |card: &Card| card.kind.is_filler() && hand.count_kind(card.kind) >= 2;
        ranked
            .iter()
            .copied()
            .find(|card| !keeps_combo(card) && !card.is_defuse())
            .or_else(|| hand.iter().copied().find(|card| !card.is_defuse()))
            .or_else(|| hand.iter().copied().next())
    }
}
