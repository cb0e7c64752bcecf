pub mod address;
pub mod state;

pub use address::{Candidate, KeptAddress, Prefix};
pub use state::{RunState, StateFile};
