//! # Timing
//!
//! Budget arithmetic for the scheduler: how an element's seconds are split
//! into phases ([`DurationAllocator`]) and how the scene keeps track of its
//! nominal length ([`TimelineAccumulator`]).

pub mod accumulator;
pub mod allocator;

pub use accumulator::TimelineAccumulator;
pub use allocator::{Allocation, ContentShape, DurationAllocator, Role};
