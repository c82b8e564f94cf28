use kittens_bot::{Bot, BotFeatures, BotParams, BotVariant, StrategyBot};
use kittens_core::game::{FullState, SharedState};
use kittens_core::model::action::{Action, ComboKind};
use kittens_core::model::card::{Card, CardKind};
use kittens_core::model::event::GameEvent;
use kittens_core::model::hand::Hand;
use kittens_core::model::player::PlayerId;
use kittens_core::model::view::BotView;
use kittens_core::profile::{OpponentProfile, ProfileRegistry};
use std::collections::BTreeMap;

fn heads_up(hand: &[CardKind], pile: usize) -> BotView<'static> {
    BotView::new("me", Hand::from_kinds(hand), pile).with_rival("rival", 5)
}

#[test]
fn quiet_turn_draws() {
    let mut bot = StrategyBot::fair(11);
    let view = heads_up(&[CardKind::Skip, CardKind::TacoCat], 10);
    assert_eq!(bot.take_turn(&view), Action::Draw);
}

#[test]
fn peeked_kitten_is_skipped() {
    let mut bot = StrategyBot::fair(11);
    let view = heads_up(&[CardKind::Skip], 10);
    bot.on_event(
        &GameEvent::future_seen(
            "me",
            vec![CardKind::ExplodingKitten, CardKind::Nope, CardKind::Favor],
        ),
        &view,
    );
    assert_eq!(bot.take_turn(&view), Action::play(Card::new(CardKind::Skip)));

    // The kitten was drawn by someone else; the next card is known safe.
    bot.on_event(&GameEvent::card_drawn("rival"), &view);
    assert_eq!(bot.known().to_vec(), vec![CardKind::Nope, CardKind::Favor]);
    assert_eq!(bot.take_turn(&view), Action::Draw);
}

#[test]
fn foreknowledge_round_trip() {
    let mut bot = StrategyBot::fair(0);
    let view = heads_up(&[], 20);
    bot.on_event(
        &GameEvent::future_seen("me", vec![CardKind::Attack, CardKind::Skip, CardKind::Nope]),
        &view,
    );
    bot.on_event(&GameEvent::card_drawn("rival"), &view);
    assert_eq!(bot.known().to_vec(), vec![CardKind::Skip, CardKind::Nope]);

    bot.on_event(&GameEvent::deck_shuffled(), &view);
    assert!(bot.known().is_empty());
}

#[test]
fn someone_elses_peek_is_not_ours() {
    let mut bot = StrategyBot::fair(0);
    let view = heads_up(&[], 20);
    bot.on_event(&GameEvent::future_seen("rival", vec![CardKind::ExplodingKitten]), &view);
    assert!(bot.known().is_empty());
}

#[test]
fn pair_goes_after_the_big_hand() {
    let mut bot = StrategyBot::fair(0);
    let view = BotView::new("me", Hand::from_kinds(&[CardKind::BeardCat, CardKind::BeardCat]), 20)
        .with_rival("rival", 6);
    let action = bot.take_turn(&view);
    assert_eq!(action.combo_kind(), Some(ComboKind::Pair));
    assert_eq!(action.target(), Some(&PlayerId::new("rival")));
    assert!(view.my_hand().contains_all(action.cards()));
}

#[test]
fn aware_bot_pairs_against_a_timid_small_hand() {
    let mut registry = ProfileRegistry::new();
    registry.insert(PlayerId::new("rival"), OpponentProfile::new(0.1, 0.2));
    let features = BotFeatures::default().with_variant(BotVariant::OpponentAware);
    let view = BotView::new("me", Hand::from_kinds(&[CardKind::BeardCat, CardKind::BeardCat]), 20)
        .with_rival("rival", 2);

    let mut aware =
        StrategyBot::new(features, BotParams::default(), 0).with_profiles(registry.clone());
    assert_eq!(aware.take_turn(&view).combo_kind(), Some(ComboKind::Pair));

    let mut fair = StrategyBot::fair(0).with_profiles(registry);
    assert_eq!(fair.take_turn(&view), Action::Draw);
}

#[test]
fn targets_always_come_from_the_view() {
    let hands: [&[CardKind]; 4] = [
        &[CardKind::Favor, CardKind::Defuse],
        &[CardKind::TacoCat, CardKind::TacoCat, CardKind::TacoCat],
        &[CardKind::BeardCat, CardKind::BeardCat, CardKind::Skip],
        &[
            CardKind::TacoCat,
            CardKind::BeardCat,
            CardKind::RainbowRalphingCat,
            CardKind::HairyPotatoCat,
            CardKind::Cattermelon,
        ],
    ];
    for hand in hands {
        for pile in [1, 4, 30] {
            let view = BotView::new("me", Hand::from_kinds(hand), pile)
                .with_rival("a", 7)
                .with_rival("b", 0)
                .with_rival("c", 3);
            let mut bot = StrategyBot::fair(5);
            let action = bot.take_turn(&view);
            if let Some(target) = action.target() {
                assert!(view.is_rival(target), "{action} targets {target}");
            }
            assert!(view.my_hand().contains_all(action.cards()), "{action}");
        }
    }
}

#[test]
fn attack_in_a_duel_is_noped() {
    let mut bot = StrategyBot::fair(0);
    let duel = heads_up(&[CardKind::Nope, CardKind::Defuse, CardKind::Skip, CardKind::Favor], 10);
    let attack = GameEvent::card_played("rival", CardKind::Attack);
    assert_eq!(
        bot.react(&duel, &attack),
        Some(Action::play(Card::new(CardKind::Nope)))
    );

    let crowded = BotView::new(
        "me",
        Hand::from_kinds(&[
            CardKind::Nope,
            CardKind::Defuse,
            CardKind::Skip,
            CardKind::Favor,
            CardKind::Shuffle,
            CardKind::TacoCat,
        ]),
        10,
    )
    .with_rival("a", 5)
    .with_rival("b", 5)
    .with_rival("c", 5);
    let attack = GameEvent::card_played("a", CardKind::Attack);
    assert_eq!(bot.react(&crowded, &attack), None);
}

#[test]
fn harmless_cards_are_let_through() {
    let mut bot = StrategyBot::fair(0);
    let view = heads_up(&[CardKind::Nope], 10);
    for kind in [CardKind::Skip, CardKind::SeeTheFuture, CardKind::Shuffle] {
        assert_eq!(bot.react(&view, &GameEvent::card_played("rival", kind)), None);
    }
}

#[test]
fn duel_placement_is_on_top() {
    let mut bot = StrategyBot::fair(9);
    let view = heads_up(&[], 12);
    for pile in [1, 2, 12, 40] {
        assert_eq!(bot.choose_defuse_position(&view, pile), 0);
    }
}

#[test]
fn own_insert_is_remembered() {
    let mut bot = StrategyBot::fair(9);
    let view = heads_up(&[], 12);
    bot.on_event(
        &GameEvent::future_seen("me", vec![CardKind::Skip, CardKind::Nope, CardKind::Favor]),
        &view,
    );
    bot.on_event(&GameEvent::kitten_inserted("me", Some(1)), &view);
    assert_eq!(
        bot.known().to_vec(),
        vec![CardKind::Skip, CardKind::ExplodingKitten, CardKind::Nope, CardKind::Favor]
    );

    bot.on_event(&GameEvent::kitten_inserted("rival", None), &view);
    assert!(bot.known().is_empty());
}

#[test]
fn kitten_hidden_on_top_is_not_drawn_back() {
    let mut bot = StrategyBot::fair(9);
    let view = heads_up(&[CardKind::Skip], 10);
    bot.on_event(&GameEvent::kitten_inserted("me", Some(0)), &view);
    assert_eq!(bot.known().to_vec(), vec![CardKind::ExplodingKitten]);
    assert_eq!(bot.take_turn(&view), Action::play(Card::new(CardKind::Skip)));
}

#[test]
fn donation_keeps_the_defuse() {
    let mut bot = StrategyBot::fair(0);
    let requester = PlayerId::new("rival");
    let view = heads_up(&[CardKind::Defuse, CardKind::Nope], 10);
    assert_eq!(
        bot.choose_card_to_give(&view, &requester).map(|card| card.kind),
        Some(CardKind::Nope)
    );

    let last = heads_up(&[CardKind::Defuse], 10);
    assert_eq!(
        bot.choose_card_to_give(&last, &requester).map(|card| card.kind),
        Some(CardKind::Defuse)
    );

    assert_eq!(bot.choose_card_to_give(&heads_up(&[], 10), &requester), None);
}

fn omniscient_bot(state: &SharedState) -> StrategyBot {
    let features = BotFeatures::default().with_variant(BotVariant::Omniscient);
    StrategyBot::new(features, BotParams::default(), 2)
        .with_state_probe(true, Box::new(state.clone()))
}

#[test]
fn omniscient_placement_hunts_the_unprotected() {
    let mut hands = BTreeMap::new();
    hands.insert(PlayerId::new("a"), vec![CardKind::Defuse]);
    hands.insert(PlayerId::new("b"), vec![CardKind::Nope]);
    hands.insert(PlayerId::new("c"), vec![CardKind::Defuse]);
    let state = SharedState::new(FullState {
        draw_pile: vec![CardKind::Skip; 8],
        discard_pile: Vec::new(),
        hands,
    });
    let view = BotView::new("me", Hand::new(), 8)
        .with_rival("a", 3)
        .with_rival("b", 1)
        .with_rival("c", 4);

    let mut bot = omniscient_bot(&state);
    assert_eq!(bot.choose_defuse_position(&view, 8), 1);

    // "b" picks up a defuse; everyone is protected now.
    assert!(state.update(|full| {
        if let Some(hand) = full.hands.get_mut(&PlayerId::new("b")) {
            hand.push(CardKind::Defuse);
        }
    }));
    assert_eq!(bot.choose_defuse_position(&view, 8), 0);
}

#[test]
fn omniscient_dealt_game_stays_legal() {
    let players: Vec<PlayerId> = ["me", "a", "b"].into_iter().map(PlayerId::new).collect();
    let dealt = FullState::deal(&players, 42);
    let my_hand = Hand::from_kinds(dealt.hand_of(&players[0]).unwrap_or_default());
    let pile = dealt.draw_pile.len();
    let view = BotView::new("me", my_hand, pile).with_rival("a", 8).with_rival("b", 8);

    let state = SharedState::new(dealt);
    let mut bot = omniscient_bot(&state);
    let action = bot.take_turn(&view);
    if let Some(target) = action.target() {
        assert!(view.is_rival(target));
    }
    assert!(view.my_hand().contains_all(action.cards()));
    assert!(bot.choose_defuse_position(&view, pile) <= pile);
}
