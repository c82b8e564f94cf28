/// Tunable thresholds for the heuristic planners.
///
/// The bench harness may override individual values from its YAML config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotParams {
    /// A rival needs at least this many cards before a blind pair steal is worth it (default: 5)
    pub pair_min_target_cards: usize,

    /// Profiles with a veto chance below this are treated as unlikely to nope (default: 0.25)
    pub veto_unlikely_below: f32,

    /// Hands this small are fragile enough to nope any attack (default: 3)
    pub fragile_hand_size: usize,

    /// Kitten depth with exactly three players alive (default: 2)
    pub three_player_depth: usize,

    /// Random kitten depth range with four or more players (default: 2..=4)
    pub random_depth_min: usize,
    pub random_depth_max: usize,
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            pair_min_target_cards: 5,
            veto_unlikely_below: 0.25,
            fragile_hand_size: 3,
            three_player_depth: 2,
            random_depth_min: 2,
            random_depth_max: 4,
        }
    }
}
