use std::fmt::Debug;

use ash::vk;
use static_assertions::const_assert_eq;

/// The number of bits a [`TrackedState`] may occupy in its raw form.
pub const STATE_BITS: u32 = 31u32;

/// The largest raw value a [`TrackedState`] may encode to.
pub const MAX_RAW_STATE: u32 = u32::MAX >> (32u32 - STATE_BITS);

/// A value that can be stored in a [`crate::objects::ResourceStateTracker`].
///
/// The tracker packs the uniform state of a resource together with its granularity flag into a
/// single u32. Because of this every state must be representable in [`STATE_BITS`] bits. That is
/// [`TrackedState::into_raw`] must never return a value greater than [`MAX_RAW_STATE`] and
/// [`TrackedState::from_raw`] must return the original state for any value produced by
/// [`TrackedState::into_raw`].
pub trait TrackedState: Copy + Eq + Debug {
    /// The sentinel used to mark unknown or uninitialized state. Must be distinguishable from
    /// every real state.
    const INVALID: Self;

    fn into_raw(self) -> u32;

    fn from_raw(raw: u32) -> Self;
}

impl TrackedState for vk::ImageLayout {
    // VK_IMAGE_LAYOUT_MAX_ENUM
    const INVALID: Self = vk::ImageLayout::from_raw(0x7FFFFFFFi32);

    #[inline]
    fn into_raw(self) -> u32 {
        debug_assert!(self.as_raw() >= 0, "Negative image layout {:?} cannot be tracked", self);
        self.as_raw() as u32
    }

    #[inline]
    fn from_raw(raw: u32) -> Self {
        vk::ImageLayout::from_raw(raw as i32)
    }
}

const_assert_eq!(MAX_RAW_STATE, 0x7FFFFFFFu32);
const_assert_eq!(MAX_RAW_STATE.count_ones(), STATE_BITS);
