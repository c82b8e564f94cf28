use super::{BotContext, ComboCandidate, ComboPlanner};
use kittens_core::model::action::{Action, ComboKind};
use kittens_core::model::card::CardKind;
use kittens_core::model::player::PlayerId;

/// Normal-turn policy. Rules are checked top to bottom; the first that applies wins.
pub struct TurnPlanner;

impl TurnPlanner {
    pub fn choose(ctx: &BotContext<'_>) -> Action {
        Self::choose_with_reason(ctx).0
    }

    pub fn choose_with_reason(ctx: &BotContext<'_>) -> (Action, &'static str) {
        let hand = ctx.hand();
        let dangerous = ctx.is_dangerous_to_draw();

        if let Some(action) = profitable_combo(ctx) {
            return (action, "combo");
        }

        if dangerous {
            for kind in [CardKind::Skip, CardKind::Attack, CardKind::Shuffle] {
                if let Some(card) = hand.find_kind(kind) {
                    return (Action::play(card), "dodge_danger");
                }
            }
        }

        if ctx.known.is_empty() {
            if let Some(card) = hand.find_kind(CardKind::SeeTheFuture) {
                return (Action::play(card), "gather_foreknowledge");
            }
        }

        if ctx.known.next_is_kitten() {
            if let Some(card) = hand.find_kind(CardKind::Shuffle) {
                return (Action::play(card), "bury_known_kitten");
            }
        }

        if let Some(card) = hand.find_kind(CardKind::Favor) {
            if let Some(target) = select_target(ctx) {
                return (Action::play_at(card, target), "favor");
            }
        }

        if dangerous {
            for kind in [CardKind::Skip, CardKind::Attack] {
                if let Some(card) = hand.find_kind(kind) {
                    return (Action::play(card), "dodge_danger_late");
                }
            }
        }

        (Action::Draw, "draw")
    }
}

fn profitable_combo(ctx: &BotContext<'_>) -> Option<Action> {
    let lacks_defuse = !ctx.hand().has_defuse();

    for candidate in ComboPlanner::find_all(ctx.hand()) {
        let action = match candidate.kind {
            ComboKind::Triple if lacks_defuse => {
                triple_target(ctx).map(|target| combo_action(candidate, Some(target)))
            }
            ComboKind::Triple => None,
            ComboKind::Pair => pair_target(ctx).map(|target| combo_action(candidate, Some(target))),
            ComboKind::FiveDistinct if lacks_defuse => Some(combo_action(candidate, None)),
            ComboKind::FiveDistinct => None,
        };
        if action.is_some() {
            return action;
        }
    }
    None
}

fn combo_action(candidate: ComboCandidate, target: Option<PlayerId>) -> Action {
    let requested_kind = match candidate.kind {
        ComboKind::Pair => None,
        ComboKind::Triple | ComboKind::FiveDistinct => Some(CardKind::Defuse),
    };
    Action::PlayCombo {
        cards: candidate.cards,
        target,
        requested_kind,
    }
}

/// Favor target: a rival known to lack a defuse, otherwise the biggest hand.
pub(crate) fn select_target(ctx: &BotContext<'_>) -> Option<PlayerId> {
    let view = ctx.view;
    view.other_players()
        .iter()
        .find(|rival| {
            ctx.model.lacks_defuse(rival) && view.card_count(rival).unwrap_or(0) > 0
        })
        .cloned()
        .or_else(|| largest_hand(ctx, |_| true))
}

/// Demanding a defuse only makes sense from someone who might hold one.
fn triple_target(ctx: &BotContext<'_>) -> Option<PlayerId> {
    largest_hand(ctx, |rival| !ctx.model.lacks_defuse(rival))
        .filter(|rival| ctx.view.card_count(rival).unwrap_or(0) > 0)
}

fn pair_target(ctx: &BotContext<'_>) -> Option<PlayerId> {
    let min_cards = ctx.params.pair_min_target_cards;
    let aware = ctx.features.variant().uses_profiles();
    largest_hand(ctx, |rival| {
        let count = ctx.view.card_count(rival).unwrap_or(0);
        count >= min_cards || (aware && ctx.model.veto_unlikely(rival, ctx.params))
    })
    .filter(|rival| ctx.view.card_count(rival).unwrap_or(0) > 0)
}

/// Highest visible card count among rivals passing `eligible`; ties go to the earlier seat.
fn largest_hand<F>(ctx: &BotContext<'_>, eligible: F) -> Option<PlayerId>
where
    F: Fn(&PlayerId) -> bool,
{
    let view = ctx.view;
    let mut best: Option<(&PlayerId, usize)> = None;
    for rival in view.other_players().iter().filter(|rival| eligible(rival)) {
        let count = view.card_count(rival).unwrap_or(0);
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((rival, count)),
        }
    }
    best.map(|(rival, _)| rival.clone())
}
