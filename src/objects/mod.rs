pub mod resource_state;
pub mod state;
pub mod usage;

pub use resource_state::ResourceStateTracker;

pub use state::TrackedState;
pub use state::STATE_BITS;
pub use state::MAX_RAW_STATE;

pub use usage::ResourceUsage;
