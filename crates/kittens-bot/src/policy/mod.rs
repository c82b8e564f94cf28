mod strategy;

pub use strategy::StrategyBot;

use kittens_core::model::action::Action;
use kittens_core::model::card::Card;
use kittens_core::model::event::GameEvent;
use kittens_core::model::player::PlayerId;
use kittens_core::model::view::BotView;

/// Entry points the game engine calls on a seated bot.
///
/// Every decision method must return a usable value; lookups that come up
/// empty fall back to cautious defaults instead of failing.
pub trait Bot: Send {
    fn name(&self) -> &str;

    /// Choose the action for a normal turn.
    fn take_turn(&mut self, view: &BotView<'_>) -> Action;

    /// Passive notification after every engine event. Used for tracking only.
    fn on_event(&mut self, game_event: &GameEvent, view: &BotView<'_>);

    /// Optionally answer someone else's action with a nope.
    fn react(&mut self, view: &BotView<'_>, trigger: &GameEvent) -> Option<Action>;

    /// Depth at which to hide a defused kitten, in `0..=draw_pile_size`.
    fn choose_defuse_position(&mut self, view: &BotView<'_>, draw_pile_size: usize) -> usize;

    /// Card handed over to a favor. `None` only for an empty hand.
    fn choose_card_to_give(&mut self, view: &BotView<'_>, requester: &PlayerId) -> Option<Card>;

    /// Terminal notification; the bot is out of the game.
    fn on_explode(&mut self, _view: &BotView<'_>) {}
}
