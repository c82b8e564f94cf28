use super::{BotParams, OpponentModel};
use kittens_core::model::view::BotView;
use rand::Rng;

/// Where to hide a defused kitten. Depth 0 is the top of the pile.
pub struct PlacementPlanner;

impl PlacementPlanner {
    pub fn choose_depth<R: Rng + ?Sized>(
        view: &BotView<'_>,
        pile_size: usize,
        model: &OpponentModel<'_>,
        params: &BotParams,
        rng: &mut R,
    ) -> usize {
        if model.has_hand_knowledge() {
            return Self::targeted_depth(view, pile_size, model);
        }

        let alive = view.active_player_count();
        if alive <= 2 {
            0
        } else if alive == 3 {
            params.three_player_depth.min(pile_size)
        } else {
            let low = params.random_depth_min.min(params.random_depth_max);
            let high = params.random_depth_max.max(low);
            rng.gen_range(low..=high).min(pile_size)
        }
    }

    /// Rivals draw in turn order, so the i-th rival takes the card at depth i.
    pub fn targeted_depth(
        view: &BotView<'_>,
        pile_size: usize,
        model: &OpponentModel<'_>,
    ) -> usize {
        view.other_players()
            .iter()
            .position(|rival| model.lacks_defuse(rival))
            .map(|index| index.min(pile_size))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kittens_core::game::FullState;
    use kittens_core::model::card::CardKind;
    use kittens_core::model::hand::Hand;
    use kittens_core::model::player::PlayerId;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::BTreeMap;

    fn view_with(rivals: usize) -> BotView<'static> {
        (0..rivals).fold(BotView::new("me", Hand::new(), 20), |view, i| {
            view.with_rival(format!("r{i}"), 4)
        })
    }

    fn depth(view: &BotView<'_>, pile: usize, rng: &mut SmallRng) -> usize {
        let model = OpponentModel::fair();
        PlacementPlanner::choose_depth(view, pile, &model, &BotParams::default(), rng)
    }

    #[test]
    fn heads_up_goes_on_top() {
        let mut rng = SmallRng::seed_from_u64(1);
        for pile in [1, 5, 40] {
            assert_eq!(depth(&view_with(1), pile, &mut rng), 0);
        }
    }

    #[test]
    fn three_players_use_depth_two_clamped() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(depth(&view_with(2), 10, &mut rng), 2);
        assert_eq!(depth(&view_with(2), 1, &mut rng), 1);
        assert_eq!(depth(&view_with(2), 0, &mut rng), 0);
    }

    #[test]
    fn crowded_tables_randomize_within_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        let view = view_with(4);
        let mut seen = [false; 5];
        for _ in 0..200 {
            let d = depth(&view, 10, &mut rng);
            assert!((2..=4).contains(&d));
            seen[d] = true;
        }
        assert!(seen[2] && seen[3] && seen[4]);
        assert!(depth(&view, 3, &mut rng) <= 3);
    }

    #[test]
    fn hand_knowledge_targets_first_unprotected_rival() {
        let mut hands = BTreeMap::new();
        hands.insert(PlayerId::new("r0"), vec![CardKind::Defuse]);
        hands.insert(PlayerId::new("r1"), vec![CardKind::Defuse]);
        hands.insert(PlayerId::new("r2"), vec![CardKind::Skip]);
        let state = FullState {
            hands,
            ..FullState::default()
        };
        let model = OpponentModel::fair().with_full_state(&state);
        let view = view_with(3);
        assert_eq!(PlacementPlanner::targeted_depth(&view, 10, &model), 2);
        assert_eq!(PlacementPlanner::targeted_depth(&view, 1, &model), 1);

        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(
            PlacementPlanner::choose_depth(&view, 10, &model, &BotParams::default(), &mut rng),
            2
        );
    }

    #[test]
    fn everyone_protected_goes_on_top() {
        let mut hands = BTreeMap::new();
        hands.insert(PlayerId::new("r0"), vec![CardKind::Defuse]);
        let state = FullState {
            hands,
            ..FullState::default()
        };
        let model = OpponentModel::fair().with_full_state(&state);
        assert_eq!(PlacementPlanner::targeted_depth(&view_with(3), 10, &model), 0);
    }
}
