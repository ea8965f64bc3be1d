//! Tracking of per-resource or per-subresource usage state for gpu resources that need access
//! barriers during command recording.

use std::fmt::{Debug, Formatter};

use static_assertions::{assert_eq_size, const_assert_eq};

use crate::objects::state::{MAX_RAW_STATE, TrackedState};
use crate::objects::usage::ResourceUsage;

/// Tracks the usage state of a single gpu resource.
///
/// Most resources are only ever transitioned as a whole so the tracker starts out storing a
/// single state for the entire resource. If per subresource tracking was requested during
/// [`ResourceStateTracker::initialize`] the first write to an individual subresource switches the
/// tracker to storing one state per subresource. The tracker stays in that mode until the whole
/// resource is set again with [`ResourceStateTracker::set_resource_state`] (or an equivalent call
/// to [`ResourceStateTracker::set_subresource_state`]).
///
/// The tracker is meant to be embedded into the object representing the resource and does not
/// perform any synchronization.
pub struct ResourceStateTracker<S: TrackedState> {
    /// The uniform state in the low 31 bits and the all subresources same flag in the high bit.
    payload: u32,

    /// One state per subresource. Only valid if the all subresources same flag is not set.
    subresource_states: Box<[S]>,
}

impl<S: TrackedState> ResourceStateTracker<S> {
    const STATE_MASK: u32 = MAX_RAW_STATE;
    const ALL_SAME_MASK: u32 = 1u32 << 31;

    /// Creates a new uninitialized tracker.
    pub fn new() -> Self {
        let mut result = Self {
            payload: Self::ALL_SAME_MASK,
            subresource_states: Box::default(),
        };
        result.set_packed_state(S::INVALID);
        result
    }

    /// Initializes the tracker for a resource with `subresource_count` subresources that are all
    /// in `initial_state`.
    ///
    /// Storage for per subresource states is only allocated if `per_subresource_tracking` is set
    /// and the resource has more than 1 subresource.
    ///
    /// The tracker must not already be initialized and `subresource_count` must not be 0.
    pub fn initialize(&mut self, subresource_count: u32, initial_state: S, per_subresource_tracking: bool) {
        if self.is_initialized() {
            Self::contract_violation("Called ResourceStateTracker::initialize on an already initialized tracker");
        }
        if subresource_count == 0 {
            Self::contract_violation("Called ResourceStateTracker::initialize with a subresource count of 0");
        }

        self.subresource_states = if per_subresource_tracking && subresource_count > 1 {
            // Filling with the invalid state doubles as poisoning since the slots are not live yet
            vec![S::INVALID; subresource_count as usize].into_boxed_slice()
        } else {
            Box::default()
        };

        self.set_all_same(true);
        self.set_packed_state(initial_state);
    }

    pub fn is_initialized(&self) -> bool {
        self.get_packed_state() != S::INVALID || !self.subresource_states.is_empty()
    }

    /// Returns the tracker to the uninitialized state and frees any per subresource storage.
    ///
    /// Calling this on an uninitialized tracker does nothing.
    pub fn release(&mut self) {
        self.set_all_same(true);
        self.set_packed_state(S::INVALID);
        self.subresource_states = Box::default();
    }

    /// Returns true if a single state is currently tracked for the whole resource.
    #[inline]
    pub fn are_all_subresources_same(&self) -> bool {
        (self.payload & Self::ALL_SAME_MASK) == Self::ALL_SAME_MASK
    }

    /// Returns the number of allocated per subresource states. This is 0 if per subresource
    /// tracking is not used for this resource.
    #[inline]
    pub fn get_subresources_count(&self) -> u32 {
        self.subresource_states.len() as u32
    }

    /// Returns true if every subresource of the resource is in `state`.
    pub fn check_resource_state(&self, state: S) -> bool {
        debug_assert!(self.is_initialized(), "Queried state of an uninitialized tracker");

        if self.are_all_subresources_same() {
            self.get_uniform_state() == state
        } else {
            self.get_slots().iter().all(|slot| *slot == state)
        }
    }

    /// Returns the state of a single subresource.
    ///
    /// If a single state is tracked for the whole resource `index` is ignored.
    pub fn get_subresource_state(&self, index: u32) -> S {
        debug_assert!(self.is_initialized(), "Queried state of an uninitialized tracker");

        if self.are_all_subresources_same() {
            return self.get_uniform_state();
        }

        let slots = self.get_slots();
        debug_assert!((index as usize) < slots.len(), "Subresource index {:?} out of range for resource with {:?} subresources", index, slots.len());
        slots[index as usize]
    }

    /// Returns the state of the whole resource if a single state is currently tracked.
    pub fn get_resource_state(&self) -> Option<S> {
        if self.are_all_subresources_same() {
            Some(self.get_uniform_state())
        } else {
            None
        }
    }

    /// Returns the state of every subresource if states are currently tracked per subresource.
    pub fn get_subresource_states(&self) -> Option<&[S]> {
        if self.are_all_subresources_same() {
            None
        } else {
            Some(self.get_slots())
        }
    }

    /// Sets the state of the whole resource.
    ///
    /// Any per subresource storage is kept for later use but its content is no longer valid.
    pub fn set_resource_state(&mut self, state: S) {
        self.set_all_same(true);
        self.set_packed_state(state);

        #[cfg(any(debug_assertions, feature = "poison_inactive_state"))]
        self.subresource_states.fill(S::INVALID);
    }

    /// Sets the state of a single subresource.
    ///
    /// If `index` is [`None`] or the resource does not use per subresource tracking this is
    /// identical to calling [`ResourceStateTracker::set_resource_state`]. Otherwise if a single
    /// state is currently tracked for the whole resource it is first copied to every subresource.
    pub fn set_subresource_state(&mut self, index: Option<u32>, state: S) {
        let index = match index {
            Some(index) if self.subresource_states.len() > 1 => index as usize,
            _ => {
                self.set_resource_state(state);
                return;
            }
        };

        debug_assert!(index < self.subresource_states.len(), "Subresource index {:?} out of range for resource with {:?} subresources", index, self.subresource_states.len());

        if self.are_all_subresources_same() {
            let current = self.get_uniform_state();
            log::trace!("Switching to per subresource tracking with {:?} subresources in {:?}", self.subresource_states.len(), current);

            self.subresource_states.fill(current);
            self.set_all_same(false);

            #[cfg(any(debug_assertions, feature = "poison_inactive_state"))]
            self.set_packed_state(S::INVALID);
        }

        self.subresource_states[index] = state;
    }

    #[inline]
    fn get_uniform_state(&self) -> S {
        debug_assert!(self.are_all_subresources_same(), "Read uniform state while tracking per subresource");
        self.get_packed_state()
    }

    #[inline]
    fn get_slots(&self) -> &[S] {
        debug_assert!(!self.are_all_subresources_same(), "Read subresource states while tracking the whole resource");
        &self.subresource_states
    }

    #[inline]
    fn get_packed_state(&self) -> S {
        S::from_raw(self.payload & Self::STATE_MASK)
    }

    #[inline]
    fn set_packed_state(&mut self, state: S) {
        let raw = state.into_raw();
        debug_assert_eq!(raw & !Self::STATE_MASK, 0u32, "State {:?} does not fit into 31 bits", state);
        self.payload = (self.payload & !Self::STATE_MASK) | (raw & Self::STATE_MASK);
    }

    #[inline]
    fn set_all_same(&mut self, all_same: bool) {
        let mut tmp = self.payload & !Self::ALL_SAME_MASK;
        if all_same {
            tmp |= Self::ALL_SAME_MASK;
        }
        self.payload = tmp;
    }

    #[cold]
    fn contract_violation(msg: &str) {
        log::error!("{}", msg);
        if cfg!(debug_assertions) {
            panic!("{}", msg);
        }
    }
}

impl<S: TrackedState> Default for ResourceStateTracker<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TrackedState> Debug for ResourceStateTracker<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.are_all_subresources_same() {
            f.write_fmt(format_args!("ResourceStateTracker(Uniform({:?}))", self.get_uniform_state()))
        } else {
            f.write_fmt(format_args!("ResourceStateTracker(PerSubresource({:?}))", self.get_slots()))
        }
    }
}

// Make sure we didnt mess up the bitmasks
const_assert_eq!(MAX_RAW_STATE & (1u32 << 31), 0u32);
const_assert_eq!(MAX_RAW_STATE | (1u32 << 31), u32::MAX);
assert_eq_size!(ResourceStateTracker<ResourceUsage>, [usize; 3]);
