use super::BotParams;
use kittens_core::game::FullState;
use kittens_core::model::card::CardKind;
use kittens_core::model::player::PlayerId;
use kittens_core::profile::{OpponentProfile, ProfileRegistry};

/// What we believe about rivals for the current decision.
///
/// Unknown always reads as "the rival is protected": they have a defuse and a
/// nope until proven otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpponentModel<'a> {
    profiles: Option<&'a ProfileRegistry>,
    full_state: Option<&'a FullState>,
}

impl<'a> OpponentModel<'a> {
    pub fn fair() -> Self {
        Self::default()
    }

    pub fn with_profiles(mut self, profiles: &'a ProfileRegistry) -> Self {
        self.profiles = Some(profiles);
        self
    }

    pub fn with_full_state(mut self, full_state: &'a FullState) -> Self {
        self.full_state = Some(full_state);
        self
    }

    pub fn has_profiles(&self) -> bool {
        self.profiles.is_some()
    }

    pub fn has_hand_knowledge(&self) -> bool {
        self.full_state.is_some()
    }

    pub fn full_state(&self) -> Option<&'a FullState> {
        self.full_state
    }

    pub fn profile(&self, rival: &PlayerId) -> OpponentProfile {
        self.profiles
            .map(|registry| registry.profile_or_default(rival))
            .unwrap_or_default()
    }

    pub fn lacks_defuse(&self, rival: &PlayerId) -> bool {
        self.full_state
            .and_then(|state| state.holds(rival, CardKind::Defuse))
            == Some(false)
    }

    /// Only the omniscient path can see a rival's hand; profiles give tendencies.
    pub fn veto_unlikely(&self, rival: &PlayerId, params: &BotParams) -> bool {
        if let Some(holds_nope) = self
            .full_state
            .and_then(|state| state.holds(rival, CardKind::Nope))
        {
            return !holds_nope;
        }
        match self.profiles.and_then(|registry| registry.get(rival)) {
            Some(profile) => profile.veto_chance() < params.veto_unlikely_below,
            None => false,
        }
    }
}
