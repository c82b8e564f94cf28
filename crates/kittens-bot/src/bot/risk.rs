use super::KnownUpcoming;
use kittens_core::model::card::CardKind;
use kittens_core::model::view::BotView;

/// Drawing is "dangerous" once the kitten odds exceed this.
pub const DANGER_THRESHOLD: f32 = 0.30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskEstimator {
    threshold: f32,
}

impl RiskEstimator {
    pub const fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn probability_of_losing_draw(&self, view: &BotView<'_>, known: &KnownUpcoming) -> f32 {
        probability_of_losing_draw(
            view.draw_pile_count(),
            view.active_player_count(),
            known.front(),
        )
    }

    pub fn is_dangerous(&self, view: &BotView<'_>, known: &KnownUpcoming) -> bool {
        self.probability_of_losing_draw(view, known) > self.threshold
    }
}

impl Default for RiskEstimator {
    fn default() -> Self {
        Self::new(DANGER_THRESHOLD)
    }
}

/// The pile is seeded with one kitten per player minus one.
pub fn estimated_remaining_kittens(active_players: usize) -> usize {
    active_players.saturating_sub(1)
}

/// Odds that the next card off the pile is an exploding kitten.
///
/// `known_front` is the foreknown top card, if any. A known safe top card
/// removes one card from the unknown part of the pile.
pub fn probability_of_losing_draw(
    draw_pile: usize,
    active_players: usize,
    known_front: Option<CardKind>,
) -> f32 {
    if draw_pile == 0 {
        return 0.0;
    }
    let kittens = estimated_remaining_kittens(active_players) as f32;
    let probability = match known_front {
        Some(CardKind::ExplodingKitten) => return 1.0,
        Some(_) => kittens / draw_pile.saturating_sub(1).max(1) as f32,
        None => kittens / draw_pile as f32,
    };
    probability.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kittens_core::model::hand::Hand;

    #[test]
    fn empty_pile_is_safe() {
        assert_eq!(probability_of_losing_draw(0, 4, None), 0.0);
        assert_eq!(probability_of_losing_draw(0, 2, Some(CardKind::ExplodingKitten)), 0.0);
    }

    #[test]
    fn known_kitten_on_top_is_certain() {
        assert_eq!(probability_of_losing_draw(17, 3, Some(CardKind::ExplodingKitten)), 1.0);
    }

    #[test]
    fn known_safe_top_shrinks_denominator() {
        let p = probability_of_losing_draw(11, 2, Some(CardKind::Skip));
        assert!((p - 0.1).abs() < 1e-6);
        let p = probability_of_losing_draw(1, 2, Some(CardKind::Skip));
        assert!((p - 1.0).abs() < 1e-6);
    }

    #[test]
    fn probability_stays_in_unit_interval() {
        for pile in 0..40 {
            for players in 2..8 {
                for front in [None, Some(CardKind::Defuse), Some(CardKind::ExplodingKitten)] {
                    let p = probability_of_losing_draw(pile, players, front);
                    assert!((0.0..=1.0).contains(&p), "pile {pile} players {players}: {p}");
                }
            }
        }
    }

    #[test]
    fn danger_threshold_is_strict() {
        let known = KnownUpcoming::new();
        let estimator = RiskEstimator::default();
        let ten = BotView::new("me", Hand::new(), 10).with_rival("a", 3);
        assert!((estimator.probability_of_losing_draw(&ten, &known) - 0.1).abs() < 1e-6);
        assert!(!estimator.is_dangerous(&ten, &known));

        let three = BotView::new("me", Hand::new(), 3).with_rival("a", 3);
        assert!(estimator.is_dangerous(&three, &known));
    }
}
