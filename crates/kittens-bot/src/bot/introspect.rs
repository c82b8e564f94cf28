//! Omniscient state access for the debug/test-only bot variant.
//!
//! The introspector reads the authoritative state through a [`StateProbe`]
//! that a trusted harness injected at construction. It caches the first
//! snapshot and re-probes the generation stamp before every reuse. Any probe
//! failure reads as "no information" and the caller falls back to the fair path.

use kittens_core::game::{FullState, StateProbe};
use tracing::{Level, event};

pub struct RuntimeIntrospector {
    probe: Box<dyn StateProbe>,
    cached: Option<(u64, FullState)>,
}

impl RuntimeIntrospector {
    pub fn new(probe: Box<dyn StateProbe>) -> Self {
        Self {
            probe,
            cached: None,
        }
    }

    pub fn peek_authoritative_state(&mut self) -> Option<&FullState> {
        let Some(generation) = self.probe.generation() else {
            event!(
                target: "kittens_bot::introspect",
                Level::DEBUG,
                reason = "generation_unavailable",
            );
            self.cached = None;
            return None;
        };

        let stale = self
            .cached
            .as_ref()
            .is_none_or(|(seen, _)| *seen != generation);
        if stale {
            match self.probe.snapshot() {
                Some(state) => {
                    event!(
                        target: "kittens_bot::introspect",
                        Level::TRACE,
                        generation,
                        draw_pile = state.draw_pile.len(),
                        "refreshed authoritative snapshot",
                    );
                    self.cached = Some((generation, state));
                }
                None => {
                    event!(
                        target: "kittens_bot::introspect",
                        Level::DEBUG,
                        generation,
                        reason = "snapshot_unavailable",
                    );
                    self.cached = None;
                    return None;
                }
            }
        }
        self.cached.as_ref().map(|(_, state)| state)
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn cached_generation(&self) -> Option<u64> {
        self.cached.as_ref().map(|(generation, _)| *generation)
    }
}

impl std::fmt::Debug for RuntimeIntrospector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeIntrospector")
            .field("cached_generation", &self.cached_generation())
            .finish()
    }
}
