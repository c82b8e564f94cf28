use super::Bot;
use crate::bot::{
    BotContext, BotFeatures, BotParams, BotVariant, DonationPlanner, KnownUpcoming, OpponentModel,
    PlacementPlanner, ReactPlanner, RuntimeIntrospector, TurnPlanner,
};
use kittens_core::game::{FullState, StateProbe};
use kittens_core::model::action::Action;
use kittens_core::model::card::Card;
use kittens_core::model::event::GameEvent;
use kittens_core::model::player::PlayerId;
use kittens_core::model::view::BotView;
use kittens_core::profile::ProfileRegistry;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{Level, event};

const EXPLODE_LINE: &str = "The odds were not on my side today.";

/// The rule-based engine instance.
///
/// Owns the only state carried between calls: the foreknowledge queue, the
/// profile table and, for trusted harnesses, the state introspector.
pub struct StrategyBot {
    name: String,
    features: BotFeatures,
    params: BotParams,
    known: KnownUpcoming,
    profiles: ProfileRegistry,
    introspector: Option<RuntimeIntrospector>,
    rng: SmallRng,
}

impl StrategyBot {
    pub fn new(features: BotFeatures, params: BotParams, seed: u64) -> Self {
        Self {
            name: format!("strategie-{}", features.variant()),
            features,
            params,
            known: KnownUpcoming::new(),
            profiles: ProfileRegistry::new(),
            introspector: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn fair(seed: u64) -> Self {
        Self::new(BotFeatures::default(), BotParams::default(), seed)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_profiles(mut self, profiles: ProfileRegistry) -> Self {
        self.profiles = profiles;
        self
    }

    /// Attach the authoritative-state capability. Ignored unless the harness
    /// vouches for it with `trusted_debug_access`.
    pub fn with_state_probe(
        mut self,
        trusted_debug_access: bool,
        probe: Box<dyn StateProbe>,
    ) -> Self {
        if trusted_debug_access {
            self.introspector = Some(RuntimeIntrospector::new(probe));
        } else {
            event!(
                target: "kittens_bot::introspect",
                Level::WARN,
                bot = %self.name,
                "state probe offered without trusted debug access; ignoring it",
            );
        }
        self
    }

    pub fn features(&self) -> BotFeatures {
        self.features
    }

    pub fn params(&self) -> &BotParams {
        &self.params
    }

    pub fn known(&self) -> &KnownUpcoming {
        &self.known
    }

    pub fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }

    /// Omniscient degrades to opponent-aware without an injected probe.
    pub fn effective_variant(&self) -> BotVariant {
        match self.features.variant() {
            BotVariant::Omniscient if self.introspector.is_none() => BotVariant::OpponentAware,
            variant => variant,
        }
    }

    fn authoritative_state(&mut self) -> Option<FullState> {
        if self.effective_variant() != BotVariant::Omniscient {
            return None;
        }
        self.introspector
            .as_mut()
            .and_then(|introspector| introspector.peek_authoritative_state().cloned())
    }

    fn foreknowledge(&self, full_state: Option<&FullState>) -> KnownUpcoming {
        match full_state {
            Some(state) => KnownUpcoming::from_kinds(state.draw_pile.iter().copied()),
            None => self.known.clone(),
        }
    }

    /// Features as seen by the planners, with the variant actually in force.
    fn decision_features(&self, full_state: Option<&FullState>) -> BotFeatures {
        let variant = match self.effective_variant() {
            BotVariant::Omniscient if full_state.is_none() => BotVariant::OpponentAware,
            variant => variant,
        };
        self.features.with_variant(variant)
    }
}

fn opponent_model<'a>(
    features: BotFeatures,
    profiles: &'a ProfileRegistry,
    full_state: Option<&'a FullState>,
) -> OpponentModel<'a> {
    let mut model = OpponentModel::fair();
    if features.variant().uses_profiles() {
        model = model.with_profiles(profiles);
    }
    if let Some(state) = full_state {
        model = model.with_full_state(state);
    }
    model
}

impl Bot for StrategyBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn take_turn(&mut self, view: &BotView<'_>) -> Action {
        let full_state = self.authoritative_state();
        let features = self.decision_features(full_state.as_ref());
        let known = self.foreknowledge(full_state.as_ref());
        let model = opponent_model(features, &self.profiles, full_state.as_ref());
        let ctx = BotContext::new(view, &known, &model, &self.params, features);

        let (action, reason) = TurnPlanner::choose_with_reason(&ctx);
        log_turn_decision(&self.name, &ctx, &action, reason);
        action
    }

    fn on_event(&mut self, game_event: &GameEvent, view: &BotView<'_>) {
        self.known.observe(game_event, view.my_id());
    }

    fn react(&mut self, view: &BotView<'_>, trigger: &GameEvent) -> Option<Action> {
        let decision = ReactPlanner::react_with_reason(view, trigger, &self.params);
        if tracing::enabled!(Level::INFO) {
            event!(
                target: "kittens_bot::react",
                Level::INFO,
                bot = %self.name,
                trigger = ?trigger.kind,
                card = ?trigger.data.card_kind,
                combo_size = trigger.data.combo_size,
                targeted = trigger.targets(view.my_id()),
                veto = decision.is_some(),
                reason = decision.as_ref().map(|(_, reason)| *reason).unwrap_or("no_threat"),
            );
        }
        decision.map(|(action, _)| action)
    }

    fn choose_defuse_position(&mut self, view: &BotView<'_>, draw_pile_size: usize) -> usize {
        let full_state = self.authoritative_state();
        let features = self.decision_features(full_state.as_ref());
        let model = opponent_model(features, &self.profiles, full_state.as_ref());
        let depth = PlacementPlanner::choose_depth(
            view,
            draw_pile_size,
            &model,
            &self.params,
            &mut self.rng,
        );

        event!(
            target: "kittens_bot::placement",
            Level::INFO,
            bot = %self.name,
            players = view.active_player_count(),
            pile = draw_pile_size,
            targeted = model.has_hand_knowledge(),
            depth,
        );
        depth
    }

    fn choose_card_to_give(&mut self, view: &BotView<'_>, requester: &PlayerId) -> Option<Card> {
        let card = DonationPlanner::choose(view.my_hand());
        event!(
            target: "kittens_bot::donate",
            Level::INFO,
            bot = %self.name,
            requester = %requester,
            hand_size = view.my_hand().len(),
            given = ?card.map(|card| card.kind),
        );
        card
    }

    fn on_explode(&mut self, view: &BotView<'_>) {
        view.say(EXPLODE_LINE);
        event!(
            target: "kittens_bot::turn",
            Level::INFO,
            bot = %self.name,
            known = self.known.len(),
            "exploded",
        );
    }
}

fn log_turn_decision(name: &str, ctx: &BotContext<'_>, action: &Action, reason: &str) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    event!(
        target: "kittens_bot::turn",
        Level::INFO,
        bot = %name,
        variant = %ctx.features.variant(),
        risk = ctx.draw_probability(),
        dangerous = ctx.is_dangerous_to_draw(),
        known = ctx.known.len(),
        hand_size = ctx.hand().len(),
        pile = ctx.view.draw_pile_count(),
        chosen = %action,
        reason,
    );

    if ctx.features.decision_details() {
        let hand = ctx
            .hand()
            .iter()
            .map(|card| card.kind.label())
            .collect::<Vec<_>>()
            .join(",");
        let upcoming = ctx
            .known
            .iter()
            .map(|kind| kind.label())
            .collect::<Vec<_>>()
            .join(",");
        event!(
            target: "kittens_bot::turn",
            Level::DEBUG,
            bot = %name,
            hand = %hand,
            upcoming = %upcoming,
            rivals = ctx.view.other_players().len(),
        );
    }
}
