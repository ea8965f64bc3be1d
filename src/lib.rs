//! Per-resource and per-subresource usage state tracking for GPU resources that need access
//! barriers during command recording.

pub mod objects;

#[cfg(any(test, feature = "test_utils"))]
pub use util::test;

pub mod prelude {
    pub use crate::objects::resource_state::ResourceStateTracker;
    pub use crate::objects::state::TrackedState;
    pub use crate::objects::usage::ResourceUsage;
}
