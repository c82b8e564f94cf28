pub mod full_state;

pub use full_state::{FullState, SharedState, StateProbe};
