use super::BotParams;
use kittens_core::model::action::Action;
use kittens_core::model::card::CardKind;
use kittens_core::model::event::{EventKind, GameEvent};
use kittens_core::model::view::BotView;

/// Decides whether to spend a nope on someone else's action.
pub struct ReactPlanner;

impl ReactPlanner {
    pub fn react(view: &BotView<'_>, trigger: &GameEvent, params: &BotParams) -> Option<Action> {
        Self::react_with_reason(view, trigger, params).map(|(action, _)| action)
    }

    pub fn react_with_reason(
        view: &BotView<'_>,
        trigger: &GameEvent,
        params: &BotParams,
    ) -> Option<(Action, &'static str)> {
        let hand = view.my_hand();
        let nope = hand.find_kind(CardKind::Nope)?;
        let me = view.my_id();
        if trigger.is_by(me) {
            return None;
        }
        if !matches!(trigger.kind, EventKind::CardPlayed | EventKind::ComboPlayed) {
            return None;
        }

        let has_defuse = hand.has_defuse();
        let card_kind = trigger.data.card_kind;

        if card_kind == Some(CardKind::Attack) {
            let one_on_one = view.active_player_count() == 2;
            let fragile = !has_defuse || hand.len() <= params.fragile_hand_size;
            if one_on_one || fragile {
                return Some((Action::play(nope), "attack"));
            }
        }

        if card_kind == Some(CardKind::Favor) && trigger.targets(me) && has_defuse {
            return Some((Action::play(nope), "favor_guard_defuse"));
        }

        let combo_size = trigger.data.combo_size.unwrap_or(0);
        if trigger.targets(me) && combo_size >= 2 && (combo_size >= 3 || has_defuse) {
            return Some((Action::play(nope), "combo_on_me"));
        }

        None
    }
}
