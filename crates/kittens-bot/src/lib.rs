pub mod bot;
pub mod policy;

pub use bot::{
    BotContext, BotFeatures, BotParams, BotVariant, ComboCandidate, ComboPlanner,
    DonationPlanner, KnownUpcoming, OpponentModel, PlacementPlanner, ReactPlanner, RiskEstimator,
    RuntimeIntrospector, TurnPlanner,
};
pub use policy::{Bot, StrategyBot};
